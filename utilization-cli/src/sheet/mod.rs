//! Spreadsheet import and template export

pub mod reader;
pub mod template;

pub use reader::read_dataset;
pub use template::write_template;
