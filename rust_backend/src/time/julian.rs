//! Gregorian calendar date to Julian Day conversion.

use crate::core::domain::{CalendarDate, JulianDay, TimeOfDay};
use crate::core::error::{ObservationError, ObservationResult};

/// Earliest year accepted by the calendar algorithm.
pub const MIN_YEAR: i32 = -4712;

/// Constant offset of the algorithm, folding in the Julian calendar epoch.
const EPOCH_OFFSET: f64 = 1720994.5;

/// Convert a local civil date and time into a Julian Day.
///
/// Uses the Meeus-style Gregorian algorithm: January and February are counted
/// as months 13 and 14 of the previous year, and the Gregorian leap-day
/// correction `B = 2 - A + floor(A / 4)` is applied with `A = floor(year / 100)`.
///
/// Every `floor` is a mathematical floor. For non-negative operands this equals
/// truncation; for years before 1 CE it keeps the day count continuous where
/// truncation would drift by one day.
///
/// # Arguments
/// * `date` - Gregorian calendar date
/// * `time` - Time of day
///
/// # Returns
/// * `Ok(JulianDay)` for a valid date
/// * `Err(ObservationError::InvalidDate)` when year < -4712, month is outside
///   1..=12, or day is outside 1..=31
///
/// # Example
/// ```
/// use novascope_rust::core::domain::{CalendarDate, TimeOfDay};
/// use novascope_rust::time::compute_julian_day;
///
/// let jd = compute_julian_day(&CalendarDate::new(2024, 1, 1), &TimeOfDay::midnight()).unwrap();
/// assert!((jd.value() - 2460310.5).abs() < 0.01);
/// ```
pub fn compute_julian_day(date: &CalendarDate, time: &TimeOfDay) -> ObservationResult<JulianDay> {
    validate_date(date)?;
    TimeOfDay::new(time.hour, time.minute, time.second)?;

    let (year, month) = if date.month < 3 {
        (date.year as i64 - 1, date.month as i64 + 12)
    } else {
        (date.year as i64, date.month as i64)
    };

    let a = year.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);

    let jd = EPOCH_OFFSET
        + (365.25 * year as f64).floor()
        + (30.6001 * (month + 1) as f64).floor()
        + date.day as f64
        + b as f64
        + time.day_fraction();

    log::debug!("Julian Day for {} {}: {}", date, time, jd);
    Ok(JulianDay::new(jd))
}

/// Check the calendar fields accepted by [`compute_julian_day`].
pub fn validate_date(date: &CalendarDate) -> ObservationResult<()> {
    let invalid = |reason: &str| ObservationError::InvalidDate {
        year: date.year,
        month: date.month,
        day: date.day,
        reason: reason.to_string(),
    };

    if date.year < MIN_YEAR {
        return Err(invalid("year must be -4712 or later"));
    }
    if !(1..=12).contains(&date.month) {
        return Err(invalid("month must be within 1..=12"));
    }
    if date.day == 0 {
        return Err(invalid("day must be positive"));
    }
    if date.day > 31 {
        return Err(invalid("day must be 31 or less"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jd(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> f64 {
        compute_julian_day(
            &CalendarDate::new(year, month, day),
            &TimeOfDay::new(h, m, s).unwrap(),
        )
        .unwrap()
        .value()
    }

    #[test]
    fn test_new_year_2024() {
        assert!((jd(2024, 1, 1, 0, 0, 0) - 2460310.5).abs() < 0.01);
    }

    #[test]
    fn test_j2000_epoch() {
        assert!((jd(2000, 1, 1, 12, 0, 0) - JulianDay::J2000).abs() < 1e-9);
    }

    #[test]
    fn test_march_is_not_shifted() {
        // 1987-06-19 12:00 is JD 2446966.0 (Meeus, example 7.a)
        assert!((jd(1987, 6, 19, 12, 0, 0) - 2446966.0).abs() < 1e-9);
        // 1988-03-01 00:00 follows a leap day
        assert!((jd(1988, 3, 1, 0, 0, 0) - jd(1988, 2, 29, 0, 0, 0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_of_day_fraction() {
        let midnight = jd(2024, 6, 1, 0, 0, 0);
        assert!((jd(2024, 6, 1, 18, 0, 0) - midnight - 0.75).abs() < 1e-9);
        assert!((jd(2024, 6, 1, 0, 0, 36) - midnight - 36.0 / 86400.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_years_use_floor() {
        // Proleptic Gregorian 0000-01-01 00:00 is JD 1721059.5
        assert!((jd(0, 1, 1, 0, 0, 0) - 1721059.5).abs() < 1e-9);
        // Year 0 is a leap year in the proleptic calendar
        assert!((jd(0, 3, 1, 0, 0, 0) - jd(0, 2, 28, 0, 0, 0) - 2.0).abs() < 1e-9);
        // Day count stays continuous across the 1 BCE / 1 CE boundary
        assert!((jd(1, 1, 1, 0, 0, 0) - jd(0, 12, 31, 0, 0, 0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_dates() {
        let midnight = TimeOfDay::midnight();
        for date in [
            CalendarDate::new(-4713, 1, 1),
            CalendarDate::new(2024, 0, 1),
            CalendarDate::new(2024, 13, 1),
            CalendarDate::new(2024, 1, 0),
            CalendarDate::new(2024, 1, 32),
        ] {
            let result = compute_julian_day(&date, &midnight);
            assert!(
                matches!(result, Err(ObservationError::InvalidDate { .. })),
                "{} should be rejected",
                date
            );
        }
    }

    #[test]
    fn test_earliest_year_accepted() {
        assert!(compute_julian_day(&CalendarDate::new(MIN_YEAR, 1, 1), &TimeOfDay::midnight()).is_ok());
    }

    #[test]
    fn test_out_of_range_time_rejected() {
        let time = TimeOfDay {
            hour: 24,
            minute: 0,
            second: 0,
        };
        let result = compute_julian_day(&CalendarDate::new(2024, 1, 1), &time);
        assert!(matches!(result, Err(ObservationError::InvalidTimeOfDay { hour: 24, .. })));
    }
}
