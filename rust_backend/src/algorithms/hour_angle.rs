//! Rise and set times in Local Sidereal Time from the hour angle at the horizon.
//!
//! A star at declination δ seen from latitude φ crosses the horizon at hour
//! angle `H = ±acos(-tan δ · tan φ)`. Rise and set are that half-arc either
//! side of the star's right ascension. No refraction or parallax correction is
//! applied: "horizon" here is the geometric horizon.

use qtty::{Degrees, HourAngle, HourAngles, Radians};

use crate::core::domain::{CelestialTarget, HorizonCrossing, ObserverLocation, SiderealWindow};
use crate::time::wrap_hours;

/// Distance from ±90° below which a latitude is treated as a geographic pole.
const POLE_TOLERANCE_DEG: f64 = 1e-9;

/// Distance from 0° below which a latitude is treated as the equator.
const EQUATOR_TOLERANCE_DEG: f64 = 1e-9;

/// Half of the time the target spends above the horizon, in sidereal hours.
///
/// Returns `None` when the target does not cross the horizon (circumpolar or
/// never rising), and at the poles where `cos φ` vanishes.
///
/// On the equator `tan φ` is zero and every target, the celestial poles
/// included, is above the horizon for half a sidereal day.
pub fn half_day_arc(latitude: Degrees, declination: Degrees) -> Option<HourAngles> {
    if is_pole(latitude) {
        return None;
    }
    if latitude.abs().value() < EQUATOR_TOLERANCE_DEG {
        return Some(Degrees::new(90.0).to::<HourAngle>());
    }

    let ar = declination.sin() / latitude.cos();
    let h1 = declination.tan() * latitude.tan();

    if ar.abs() < 1.0 && h1.abs() < 1.0 {
        let arc = Radians::new((-h1).clamp(-1.0, 1.0).acos());
        Some(arc.to::<HourAngle>())
    } else {
        None
    }
}

/// [`half_day_arc`] on raw degree values, returning decimal hours.
pub fn half_day_arc_hours(latitude_deg: f64, declination_deg: f64) -> Option<f64> {
    half_day_arc(Degrees::new(latitude_deg), Degrees::new(declination_deg)).map(|h| h.value())
}

/// Horizon crossing for unit-typed coordinates.
pub fn crossing_for(
    latitude: Degrees,
    right_ascension: HourAngles,
    declination: Degrees,
) -> HorizonCrossing {
    match half_day_arc(latitude, declination) {
        Some(h) => {
            let rise_lst = wrap_hours((right_ascension - h).value());
            let set_lst = wrap_hours((right_ascension + h).value());
            log::debug!(
                "Crossing at lat {} dec {}: half arc {:.4}h, rise {:.4} set {:.4} LST",
                latitude.value(),
                declination.value(),
                h.value(),
                rise_lst,
                set_lst
            );
            HorizonCrossing::Crosses { rise_lst, set_lst }
        }
        None if declination.value() * latitude.value() > 0.0 => HorizonCrossing::AlwaysVisible,
        None => HorizonCrossing::NeverVisible,
    }
}

/// Compute when a target crosses the horizon, in Local Sidereal Time.
///
/// # Arguments
/// * `latitude_deg` - Observer latitude in degrees
/// * `right_ascension_hours` - Target right ascension in hours
/// * `declination_deg` - Target declination in degrees
///
/// # Returns
/// * `HorizonCrossing::Crosses` with rise/set LST in `[0, 24)`
/// * `HorizonCrossing::AlwaysVisible` when the target stays above the horizon,
///   i.e. it lies in the observer's hemisphere closer to the pole than the
///   horizon
/// * `HorizonCrossing::NeverVisible` otherwise
///
/// At a geographic pole (±90°) the horizon is the celestial equator: targets
/// in the observer's hemisphere are always visible, anything else (including
/// a target exactly on the equator) is reported as never visible. On the
/// equator a celestial pole lies on the horizon and is reported as crossing
/// it, six sidereal hours either side of its right ascension, matching the
/// limit of targets just off the pole.
///
/// # Example
/// ```
/// use novascope_rust::algorithms::solve_crossing;
/// use novascope_rust::core::domain::HorizonCrossing;
///
/// assert_eq!(solve_crossing(45.0, 2.5, 90.0), HorizonCrossing::AlwaysVisible);
/// assert_eq!(solve_crossing(45.0, 2.5, -80.0), HorizonCrossing::NeverVisible);
/// assert!(solve_crossing(45.0, 2.5, 10.0).crosses());
/// ```
pub fn solve_crossing(
    latitude_deg: f64,
    right_ascension_hours: f64,
    declination_deg: f64,
) -> HorizonCrossing {
    crossing_for(
        Degrees::new(latitude_deg),
        HourAngles::new(right_ascension_hours),
        Degrees::new(declination_deg),
    )
}

/// Legacy form of [`solve_crossing`]: `None`/`None` for any target that does not
/// cross the horizon.
pub fn solve(
    latitude_deg: f64,
    right_ascension_hours: f64,
    declination_deg: f64,
) -> SiderealWindow {
    solve_crossing(latitude_deg, right_ascension_hours, declination_deg).into()
}

/// [`solve_crossing`] for validated domain inputs.
pub fn solve_for_target(location: &ObserverLocation, target: &CelestialTarget) -> HorizonCrossing {
    crossing_for(location.latitude, target.right_ascension, target.declination)
}

fn is_pole(latitude: Degrees) -> bool {
    (90.0 - latitude.abs().value()).abs() < POLE_TOLERANCE_DEG
}
