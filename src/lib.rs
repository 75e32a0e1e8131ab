// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod file;
pub mod merge;
pub mod scrape;
pub mod specs;
pub mod store;

pub use config::{RunOptions, Section, SECTIONS};
pub use crate::core::{HttpTransport, Page, Transport};
pub use error::{Result, ScrapeError};
pub use scrape::RunSummary;
