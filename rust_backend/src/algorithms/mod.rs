//! Observability algorithms.
//!
//! This module provides the astronomical decisions of the pipeline: when a
//! target crosses the horizon and whether it is up at the observer's clock
//! time.
//!
//! # Components
//!
//! - [`hour_angle`]: Rise/set times in Local Sidereal Time, circumpolar detection
//! - [`visibility`]: Observable/Unobservable classification of a civil window
//!
//! # Example
//!
//! ```
//! use novascope_rust::algorithms::{classify, solve_crossing};
//! use novascope_rust::core::domain::{HorizonCrossing, VisibilityVerdict};
//!
//! let crossing = solve_crossing(0.0, 12.0, 0.0);
//! assert!(matches!(crossing, HorizonCrossing::Crosses { .. }));
//! assert_eq!(classify(12.0, 6.0, 18.0), VisibilityVerdict::Observable);
//! ```

pub mod hour_angle;
pub mod visibility;

pub use hour_angle::{
    crossing_for, half_day_arc, half_day_arc_hours, solve, solve_crossing, solve_for_target,
};
pub use visibility::{classify, classify_crossing, classify_with, VisibilityPolicy};
