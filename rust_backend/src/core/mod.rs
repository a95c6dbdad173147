//! Core domain models for star observability.
//!
//! This module defines the fundamental data structures used throughout the
//! NovaScope backend, representing observers, targets, time windows, and the
//! errors raised while computing them.

pub mod domain;
pub mod error;

pub use error::{ObservationError, ObservationResult};
