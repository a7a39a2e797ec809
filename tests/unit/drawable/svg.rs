use super::*;

#[test]
fn lookup_by_id_shares_state() {
    let mut doc = SvgDocument::new();
    doc.add_shape("far", DrawableKind::Path, "#345").unwrap();

    let mut handle = doc.require("far").unwrap();
    handle.set_path_data("M 0,0 V 10 H 0 Z");

    assert_eq!(
        doc.get_element_by_id("far").unwrap().path_data(),
        "M 0,0 V 10 H 0 Z"
    );
    assert!(doc.get_element_by_id("near").is_none());
    assert!(matches!(
        doc.require("near"),
        Err(RidgelineError::Drawable(_))
    ));
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut doc = SvgDocument::new();
    doc.add_shape("a", DrawableKind::Path, "black").unwrap();
    assert!(doc.add_shape("a", DrawableKind::Polygon, "black").is_err());
}

#[test]
fn geometry_of_the_wrong_form_is_ignored() {
    let mut doc = SvgDocument::new();
    let mut poly = doc.add_shape("p", DrawableKind::Polygon, "red").unwrap();
    poly.set_path_data("M 0,0 Z");
    poly.set_points(&[Vector2::new(1.0, 2.0)]);
    assert_eq!(poly.path_data(), "");
    assert_eq!(poly.points(), vec![Vector2::new(1.0, 2.0)]);
}

#[test]
fn serializes_paths_and_polygons() {
    let mut doc = SvgDocument::new();
    let mut path = doc.add_shape("m", DrawableKind::Path, "#123").unwrap();
    let mut poly = doc.add_shape("g", DrawableKind::Polygon, "a\"b").unwrap();
    path.set_path_data("M 0,1 L 2 3 V 4 H 0 Z");
    poly.set_points(&[Vector2::new(0.0, 0.0), Vector2::new(5.0, -1.0)]);

    let vb = Viewport::new(0.0, -50.0, 100.0, 50.0).unwrap();
    let svg = doc.to_svg_string(&vb);
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"viewBox="0 -50 100 50""#));
    assert!(svg.contains(r##"<path id="m" fill="#123" d="M 0,1 L 2 3 V 4 H 0 Z"/>"##));
    assert!(svg.contains(r#"points="0,0 5,-1""#));
    assert!(svg.contains("a&quot;b"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn shapes_of_other_kinds_are_left_out() {
    let mut doc = SvgDocument::new();
    doc.add_shape("a-->b", DrawableKind::Other("text".into()), "black")
        .unwrap();
    doc.add_shape("kept", DrawableKind::Path, "black").unwrap();

    let svg = doc.to_svg_string(&Viewport::new(0.0, 0.0, 10.0, 10.0).unwrap());
    assert!(!svg.contains("a-->b"));
    assert!(!svg.contains("<!--"));
    assert!(svg.contains(r#"id="kept""#));
}
