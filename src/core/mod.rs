//! Core data model: size catalog and error taxonomy

mod catalog;
mod error;

pub use catalog::*;
pub use error::*;
