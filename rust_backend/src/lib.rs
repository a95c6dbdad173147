//! NovaScope backend: star observability calculations.
//!
//! Given an observer's position, local date and time, and a list of stars,
//! computes when each star rises and sets in local civil time and whether it
//! is above the horizon right now.
//!
//! # Pipeline
//!
//! 1. [`time::compute_julian_day`] for the observation moment
//! 2. [`algorithms::solve_crossing`] for rise/set in Local Sidereal Time
//! 3. [`time::to_local_civil_time`] for both bounds, with the same Julian Day
//! 4. [`algorithms::classify`] against the observer's clock time
//!
//! [`services::ObservationService`] runs the pipeline over injected target and
//! timezone resolvers, and [`services::report`] formats the results.

pub mod algorithms;
pub mod config;
pub mod core;
pub mod parsing;
pub mod resolvers;
pub mod services;
pub mod time;

pub use crate::config::NovaScopeConfig;
pub use crate::core::{ObservationError, ObservationResult};
