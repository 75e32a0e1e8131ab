// src/config/mod.rs
pub mod consts;
pub mod options;
pub mod sections;

pub use options::RunOptions;
pub use sections::{RowParser, Section, SectionFormat, SECTIONS};
