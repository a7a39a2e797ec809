pub(crate) mod catmull_rom;
