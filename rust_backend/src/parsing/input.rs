//! Parsing of user-entered observation fields.
//!
//! Front ends hand the core raw text (form fields, command-line arguments).
//! Every parser here reports the offending field by name so the caller can
//! point the user at it.

use crate::core::domain::{CalendarDate, ObservationMoment, ObserverLocation, TimeOfDay};
use crate::core::error::{ObservationError, ObservationResult};

/// Parse a finite floating point value from a named field.
pub fn parse_number(field: &str, text: &str) -> ObservationResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ObservationError::numeric(field, trimmed)),
    }
}

/// Parse latitude and longitude fields into a validated location.
///
/// # Example
/// ```
/// use novascope_rust::parsing::input::parse_location;
///
/// let location = parse_location("40.4168", "-3.7038").unwrap();
/// assert_eq!(location.longitude.value(), -3.7038);
/// assert!(parse_location("forty", "-3.7").is_err());
/// ```
pub fn parse_location(latitude: &str, longitude: &str) -> ObservationResult<ObserverLocation> {
    let latitude = parse_number("latitude", latitude)?;
    let longitude = parse_number("longitude", longitude)?;
    ObserverLocation::new(latitude, longitude)
}

/// Parse a `YYYY-MM-DD` date. Astronomical years may be negative (`-0044-03-15`).
///
/// Only the shape is checked here; calendar ranges are validated by the Julian
/// Day calculation.
pub fn parse_date(text: &str) -> ObservationResult<CalendarDate> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let parts: Vec<&str> = body.split('-').collect();
    if parts.len() != 3 {
        return Err(ObservationError::numeric("date", trimmed));
    }

    let year: i32 = parts[0]
        .parse()
        .map_err(|_| ObservationError::numeric("year", parts[0]))?;
    let month: u32 = parts[1]
        .parse()
        .map_err(|_| ObservationError::numeric("month", parts[1]))?;
    let day: u32 = parts[2]
        .parse()
        .map_err(|_| ObservationError::numeric("day", parts[2]))?;

    Ok(CalendarDate::new(if negative { -year } else { year }, month, day))
}

/// Parse separate hour, minute and second fields.
pub fn parse_time_fields(hour: &str, minute: &str, second: &str) -> ObservationResult<TimeOfDay> {
    let parse = |field: &str, text: &str| -> ObservationResult<u32> {
        let trimmed = text.trim();
        trimmed
            .parse::<u32>()
            .map_err(|_| ObservationError::numeric(field, trimmed))
    };

    TimeOfDay::new(
        parse("hour", hour)?,
        parse("minute", minute)?,
        parse("second", second)?,
    )
}

/// Parse an `HH:MM:SS` or `HH:MM` time of day.
pub fn parse_time(text: &str) -> ObservationResult<TimeOfDay> {
    let trimmed = text.trim();
    let parts: Vec<&str> = trimmed.split(':').collect();
    match parts.as_slice() {
        [h, m] => parse_time_fields(h, m, "0"),
        [h, m, s] => parse_time_fields(h, m, s),
        _ => Err(ObservationError::numeric("time", trimmed)),
    }
}

/// Parse date and time fields into an observation moment.
pub fn parse_moment(date: &str, time: &str) -> ObservationResult<ObservationMoment> {
    Ok(ObservationMoment::new(parse_date(date)?, parse_time(time)?))
}

/// Split a list of target names separated by commas, semicolons or newlines.
///
/// Blank entries are dropped; order is preserved.
pub fn parse_target_list(text: &str) -> Vec<String> {
    text.split(|c: char| matches!(c, ',' | ';' | '\n'))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
