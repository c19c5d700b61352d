pub mod apply;
pub mod preview;
pub mod template;
