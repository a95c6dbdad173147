//! Display helpers for decimal-hour quantities.

use super::sidereal::wrap_hours;
use crate::core::error::{ObservationError, ObservationResult};

/// Placeholder rendered for non-finite hour values.
pub const INVALID_HMS: &str = "--:--:--";

/// Format decimal hours as `HH:MM:SS`.
///
/// Every field is floored, so the rendered time never runs ahead of the value.
/// Inputs outside `[0, 24)` are wrapped into the day first; NaN and infinities
/// render as [`INVALID_HMS`].
///
/// # Example
/// ```
/// use novascope_rust::time::format_hms;
///
/// assert_eq!(format_hms(6.5), "06:30:00");
/// assert_eq!(format_hms(23.999), "23:59:56");
/// ```
pub fn format_hms(decimal_hours: f64) -> String {
    if !decimal_hours.is_finite() {
        return INVALID_HMS.to_string();
    }

    let value = wrap_hours(decimal_hours);
    let hours = value.floor();
    let minutes_total = (value - hours) * 60.0;
    let minutes = minutes_total.floor();
    let seconds = ((minutes_total - minutes) * 60.0).floor();

    format!(
        "{:02}:{:02}:{:02}",
        (hours as u32).min(23),
        (minutes as u32).min(59),
        (seconds as u32).min(59)
    )
}

/// Parse an `HH:MM:SS` (or `HH:MM`) string back into decimal hours.
///
/// # Returns
/// * `Ok(f64)` in `[0, 24)`
/// * `Err(ObservationError::InvalidNumericInput)` for malformed fields
/// * `Err(ObservationError::InvalidTimeOfDay)` for out-of-range fields
pub fn parse_hms(text: &str) -> ObservationResult<f64> {
    let trimmed = text.trim();
    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(ObservationError::numeric("time", trimmed));
    }

    let mut fields = [0u32; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<u32>()
            .map_err(|_| ObservationError::numeric("time", trimmed))?;
    }
    let [hour, minute, second] = fields;

    if hour > 23 || minute > 59 || second > 59 {
        return Err(ObservationError::InvalidTimeOfDay {
            hour,
            minute,
            second,
        });
    }

    Ok(hour as f64 + minute as f64 / 60.0 + second as f64 / 3600.0)
}

/// Render a UTC offset the way the result screens label it, e.g. `GMT +5.5`.
///
/// Whole hours keep one decimal; fractional offsets print every digit they
/// carry, so quarter-hour zones are not rounded away.
///
/// # Example
/// ```
/// use novascope_rust::time::format_utc_offset;
///
/// assert_eq!(format_utc_offset(2.0), "GMT +2.0");
/// assert_eq!(format_utc_offset(-3.5), "GMT -3.5");
/// assert_eq!(format_utc_offset(5.75), "GMT +5.75");
/// assert_eq!(format_utc_offset(0.0), "GMT 0.0");
/// ```
pub fn format_utc_offset(offset_hours: f64) -> String {
    if offset_hours == 0.0 {
        return "GMT 0.0".to_string();
    }

    let sign = if offset_hours > 0.0 { "+" } else { "" };
    if offset_hours.fract() == 0.0 {
        format!("GMT {}{:.1}", sign, offset_hours)
    } else {
        format!("GMT {}{}", sign, offset_hours)
    }
}
