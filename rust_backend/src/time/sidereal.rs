//! Local Sidereal Time to Local Civil Time conversion.
//!
//! Uses the IAU 1982 approximation of Greenwich Sidereal Time at 0h UT and a
//! constant sidereal-to-solar rate. Good to a few seconds over the modern era,
//! which is all the rise/set calculation needs.

use qtty::{Degrees, HourAngle};

use crate::core::domain::{CivilWindow, JulianDay};

/// GMST at 0h UT, constant term (hours).
const GST0_C0: f64 = 6.697374558;
/// GMST at 0h UT, linear term (hours per Julian century).
const GST0_C1: f64 = 2400.051336;
/// GMST at 0h UT, quadratic term (hours per Julian century squared).
const GST0_C2: f64 = 0.000025862;
/// Solar hours per sidereal hour.
pub const SIDEREAL_TO_SOLAR: f64 = 0.9972695663;

/// Normalize an hour quantity into `[0, 24)`.
#[inline]
pub fn wrap_hours(hours: f64) -> f64 {
    let wrapped = hours.rem_euclid(24.0);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs
    if wrapped >= 24.0 {
        0.0
    } else {
        wrapped
    }
}

/// Greenwich Sidereal Time at 0h UT for the day containing `julian_day`, in hours.
pub fn greenwich_sidereal_at_midnight(julian_day: JulianDay) -> f64 {
    let t = julian_day.centuries_since_j2000();
    wrap_hours(GST0_C0 + GST0_C1 * t + GST0_C2 * t * t)
}

/// Convert Local Sidereal Time into Greenwich Sidereal Time.
///
/// Longitude is in degrees, east-positive.
pub fn local_to_greenwich_sidereal(lst: f64, longitude_deg: f64) -> f64 {
    let longitude = Degrees::new(longitude_deg).to::<HourAngle>();
    wrap_hours(lst - longitude.value())
}

/// Convert a Local Sidereal Time into the observer's Local Civil Time.
///
/// # Arguments
/// * `lst` - Local Sidereal Time in decimal hours
/// * `julian_day` - Julian Day of the observation
/// * `longitude_deg` - Observer longitude in degrees, east-positive
/// * `utc_offset_hours` - Observer UTC offset in hours (may be fractional)
///
/// # Returns
/// Local Civil Time in decimal hours, `[0, 24)`
///
/// # Example
/// ```
/// use novascope_rust::core::domain::JulianDay;
/// use novascope_rust::time::to_local_civil_time;
///
/// let jd = JulianDay::new(2460310.5);
/// let lct = to_local_civil_time(6.75, jd, 0.0, 0.0);
/// assert!((0.0..24.0).contains(&lct));
/// assert_eq!(lct, to_local_civil_time(6.75 + 24.0, jd, 0.0, 0.0));
/// ```
pub fn to_local_civil_time(
    lst: f64,
    julian_day: JulianDay,
    longitude_deg: f64,
    utc_offset_hours: f64,
) -> f64 {
    let gst = local_to_greenwich_sidereal(lst, longitude_deg);
    let gst0 = greenwich_sidereal_at_midnight(julian_day);

    let mut ut = (gst - gst0) * SIDEREAL_TO_SOLAR;
    if ut < 0.0 {
        ut += 24.0;
    }

    wrap_hours(ut + utc_offset_hours)
}

/// Convert both bounds of a sidereal rise/set pair with the same Julian Day.
pub fn convert_window(
    rise_lst: f64,
    set_lst: f64,
    julian_day: JulianDay,
    longitude_deg: f64,
    utc_offset_hours: f64,
) -> CivilWindow {
    CivilWindow::new(
        to_local_civil_time(rise_lst, julian_day, longitude_deg, utc_offset_hours),
        to_local_civil_time(set_lst, julian_day, longitude_deg, utc_offset_hours),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD_2024: f64 = 2460310.5;

    #[test]
    fn test_wrap_hours() {
        assert_eq!(wrap_hours(25.5), 1.5);
        assert_eq!(wrap_hours(-1.5), 22.5);
        assert_eq!(wrap_hours(24.0), 0.0);
        assert_eq!(wrap_hours(-1e-18), 0.0);
    }

    #[test]
    fn test_gst_at_j2000() {
        let gst0 = greenwich_sidereal_at_midnight(JulianDay::new(JulianDay::J2000));
        assert!((gst0 - GST0_C0).abs() < 1e-12);
    }

    #[test]
    fn test_gst_2024() {
        // GMST at 2024-01-01 0h UT is about 6h 40m 30s
        let gst0 = greenwich_sidereal_at_midnight(JulianDay::new(JD_2024));
        assert!((gst0 - 6.675).abs() < 0.01, "gst0 = {}", gst0);
    }

    #[test]
    fn test_lst_equal_to_gst0_is_midnight_ut() {
        let jd = JulianDay::new(JD_2024);
        let gst0 = greenwich_sidereal_at_midnight(jd);
        let lct = to_local_civil_time(gst0, jd, 0.0, 0.0);
        assert!(lct < 1e-9 || lct > 24.0 - 1e-9, "lct = {}", lct);
    }

    #[test]
    fn test_longitude_shifts_greenwich_time() {
        // 15 degrees east is one sidereal hour ahead of Greenwich
        assert!((local_to_greenwich_sidereal(10.0, 15.0) - 9.0).abs() < 1e-12);
        assert!((local_to_greenwich_sidereal(0.5, 15.0) - 23.5).abs() < 1e-12);
        assert!((local_to_greenwich_sidereal(10.0, -30.0) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_utc_offset_applied_after_conversion() {
        let jd = JulianDay::new(JD_2024);
        let utc = to_local_civil_time(12.0, jd, 0.0, 0.0);
        let ist = to_local_civil_time(12.0, jd, 0.0, 5.5);
        assert!((wrap_hours(ist - utc) - 5.5).abs() < 1e-9);

        let west = to_local_civil_time(12.0, jd, 0.0, -8.0);
        assert!((wrap_hours(utc - west) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_window_uses_same_day() {
        let jd = JulianDay::new(JD_2024);
        let window = convert_window(3.0, 15.0, jd, -3.7, 1.0);
        assert_eq!(window.rise_lct, to_local_civil_time(3.0, jd, -3.7, 1.0));
        assert_eq!(window.set_lct, to_local_civil_time(15.0, jd, -3.7, 1.0));
    }
}
