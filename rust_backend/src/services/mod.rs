//! Service layer for observation requests.
//!
//! This module sits between the front ends and the calculation core. It
//! orchestrates resolver calls, runs the pipeline for single and batch
//! requests, and formats results for display.

pub mod observation;
pub mod report;


pub use observation::{
    evaluate_target, BatchEntry, BatchReport, ObservationService, ObservationSettings,
    TargetObservation, DEFAULT_MAX_BATCH_SIZE,
};
pub use report::{render_batch, render_single, BatchTable, ObservationRow};
