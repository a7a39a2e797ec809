pub(crate) mod command;
pub(crate) mod context;
pub(crate) mod element;
pub(crate) mod options;
pub(crate) mod polygon;
pub(crate) mod scrolling;
pub(crate) mod strategy;
