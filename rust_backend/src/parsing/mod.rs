//! Parsers for observation inputs and star catalogs.
//!
//! This module turns the raw text supplied by front ends into validated domain
//! values, and loads the offline star catalog used for target lookups.
//!
//! # Parsers
//!
//! - [`input`]: Parse latitude/longitude, dates, times and target lists
//! - [`catalog_parser`]: Parse JSON star catalogs
//!
//! # Example
//!
//! ```no_run
//! use novascope_rust::parsing::catalog_parser::parse_catalog_json;
//! use std::path::Path;
//!
//! let stars = parse_catalog_json(Path::new("bright_stars.json"))
//!     .expect("Failed to parse catalog");
//! ```

pub mod catalog_parser;
pub mod input;


pub use catalog_parser::CatalogEntry;
