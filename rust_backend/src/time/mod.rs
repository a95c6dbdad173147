pub mod format;
pub mod julian;
pub mod sidereal;

// Re-export the calculation entry points used by services and benchmarks
pub use format::{format_hms, format_utc_offset, parse_hms};
pub use julian::compute_julian_day;
pub use sidereal::{convert_window, greenwich_sidereal_at_midnight, to_local_civil_time, wrap_hours};
