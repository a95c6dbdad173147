//! Domain models for star observability calculations.
//!
//! This module provides the value types threaded through the calculation
//! pipeline: where the observer stands, when they observe, what they look at,
//! and the sidereal/civil windows derived from those inputs.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};
use qtty::{Degrees, HourAngle, HourAngles};
use serde::{Deserialize, Serialize};

use super::error::{ObservationError, ObservationResult};
use crate::time::wrap_hours;

/// Geographic position of the observer.
///
/// Longitude is east-positive. Both serialize as plain degree values.
///
/// # Examples
///
/// ```
/// use novascope_rust::core::domain::ObserverLocation;
///
/// let madrid = ObserverLocation::new(40.4168, -3.7038).unwrap();
/// assert_eq!(madrid.latitude.value(), 40.4168);
///
/// assert!(ObserverLocation::new(95.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

impl ObserverLocation {
    /// Creates a location, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> ObservationResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ObservationError::coordinate("latitude", latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ObservationError::coordinate("longitude", longitude));
        }
        Ok(Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        })
    }
}

/// Gregorian calendar date, local to the observer.
///
/// Construction is unchecked; range validation belongs to the Julian Day
/// calculation, which reports `InvalidDate` with the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Civil time of day with whole-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeOfDay {
    /// Creates a time of day, rejecting fields outside `00:00:00..=23:59:59`.
    ///
    /// # Examples
    ///
    /// ```
    /// use novascope_rust::core::domain::TimeOfDay;
    ///
    /// let t = TimeOfDay::new(21, 30, 0).unwrap();
    /// assert_eq!(t.decimal_hours(), 21.5);
    ///
    /// assert!(TimeOfDay::new(24, 0, 0).is_err());
    /// ```
    pub fn new(hour: u32, minute: u32, second: u32) -> ObservationResult<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(ObservationError::InvalidTimeOfDay {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    pub fn midnight() -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    /// Time of day as decimal hours in `[0, 24)`.
    pub fn decimal_hours(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0 + self.second as f64 / 3600.0
    }

    /// Fraction of the day elapsed, in `[0, 1)`.
    pub fn day_fraction(&self) -> f64 {
        self.decimal_hours() / 24.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Civil date and time of the observation, local to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObservationMoment {
    pub date: CalendarDate,
    pub time: TimeOfDay,
}

impl ObservationMoment {
    pub fn new(date: CalendarDate, time: TimeOfDay) -> Self {
        Self { date, time }
    }

    /// Builds a moment from a naive local date/time, dropping sub-second precision.
    pub fn from_naive(datetime: &NaiveDateTime) -> Self {
        Self {
            date: CalendarDate::new(datetime.year(), datetime.month(), datetime.day()),
            time: TimeOfDay {
                hour: datetime.hour(),
                minute: datetime.minute(),
                // Leap seconds are reported by chrono as second 59 + nanos.
                second: datetime.second().min(59),
            },
        }
    }

    /// The observer's wall-clock time in decimal hours (LCT-now).
    pub fn local_civil_hours(&self) -> f64 {
        self.time.decimal_hours()
    }
}

impl fmt::Display for ObservationMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

/// A star to observe, identified by name with equatorial coordinates.
///
/// Right ascension is an hour angle in `[0, 24)`, declination in degrees
/// `[-90, 90]`.
///
/// # Examples
///
/// ```
/// use novascope_rust::core::domain::CelestialTarget;
///
/// let vega = CelestialTarget::new("Vega", 18.6156, 38.7837).unwrap();
/// assert_eq!(vega.name, "Vega");
/// assert_eq!(vega.declination.value(), 38.7837);
///
/// let same = CelestialTarget::from_degrees("Vega", 279.234, 38.7837).unwrap();
/// assert!((same.right_ascension.value() - 18.6156).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialTarget {
    pub name: String,
    pub right_ascension: HourAngles,
    pub declination: Degrees,
}

impl CelestialTarget {
    pub fn new(
        name: impl Into<String>,
        right_ascension_hours: f64,
        declination_degrees: f64,
    ) -> ObservationResult<Self> {
        if !right_ascension_hours.is_finite() || !(0.0..24.0).contains(&right_ascension_hours) {
            return Err(ObservationError::coordinate(
                "right_ascension",
                right_ascension_hours,
            ));
        }
        if !declination_degrees.is_finite() || !(-90.0..=90.0).contains(&declination_degrees) {
            return Err(ObservationError::coordinate(
                "declination",
                declination_degrees,
            ));
        }
        Ok(Self {
            name: name.into(),
            right_ascension: HourAngles::new(right_ascension_hours),
            declination: Degrees::new(declination_degrees),
        })
    }

    /// Creates a target from a right ascension given in degrees.
    pub fn from_degrees(
        name: impl Into<String>,
        right_ascension_degrees: f64,
        declination_degrees: f64,
    ) -> ObservationResult<Self> {
        if !right_ascension_degrees.is_finite() {
            return Err(ObservationError::coordinate(
                "right_ascension",
                right_ascension_degrees,
            ));
        }
        let hours = Degrees::new(right_ascension_degrees)
            .to::<HourAngle>()
            .value();
        Self::new(name, wrap_hours(hours), declination_degrees)
    }
}

/// Continuous day count used as the time argument of the sidereal formulas.
///
/// Computed once per [`ObservationMoment`] and shared by every bound derived
/// in the same calculation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDay(f64);

impl JulianDay {
    /// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
    pub const J2000: f64 = 2451545.0;

    /// Days in a Julian century.
    pub const DAYS_PER_CENTURY: f64 = 36525.0;

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw Julian Day value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        (self.0 - Self::J2000) / Self::DAYS_PER_CENTURY
    }
}

impl From<f64> for JulianDay {
    fn from(v: f64) -> Self {
        JulianDay::new(v)
    }
}

/// Whether and when a target crosses the observer's horizon, in LST hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HorizonCrossing {
    /// The target rises and sets once per sidereal day.
    Crosses { rise_lst: f64, set_lst: f64 },
    /// Circumpolar: the target never drops below the horizon.
    AlwaysVisible,
    /// The target never climbs above the horizon.
    NeverVisible,
}

impl HorizonCrossing {
    pub fn crosses(&self) -> bool {
        matches!(self, HorizonCrossing::Crosses { .. })
    }

    /// Collapses the crossing into the two-`Option` window, losing the
    /// circumpolar/never-rises distinction.
    pub fn sidereal_window(&self) -> SiderealWindow {
        SiderealWindow::from(*self)
    }
}

/// Rise and set in Local Sidereal Time, decimal hours in `[0, 24)`.
///
/// A `None`/`None` pair marks a target that does not cross the horizon, without
/// saying whether it is circumpolar or never rises; use [`HorizonCrossing`]
/// when the distinction matters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SiderealWindow {
    pub rise_lst: Option<f64>,
    pub set_lst: Option<f64>,
}

impl SiderealWindow {
    /// Returns both bounds when the target crosses the horizon.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.rise_lst, self.set_lst) {
            (Some(rise), Some(set)) => Some((rise, set)),
            _ => None,
        }
    }
}

impl From<HorizonCrossing> for SiderealWindow {
    fn from(crossing: HorizonCrossing) -> Self {
        match crossing {
            HorizonCrossing::Crosses { rise_lst, set_lst } => SiderealWindow {
                rise_lst: Some(rise_lst),
                set_lst: Some(set_lst),
            },
            HorizonCrossing::AlwaysVisible | HorizonCrossing::NeverVisible => {
                SiderealWindow::default()
            }
        }
    }
}

/// Rise and set in the observer's Local Civil Time, decimal hours in `[0, 24)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CivilWindow {
    pub rise_lct: f64,
    pub set_lct: f64,
}

impl CivilWindow {
    pub fn new(rise_lct: f64, set_lct: f64) -> Self {
        Self { rise_lct, set_lct }
    }

    /// Returns `true` when the window runs past local midnight (rise after set).
    pub fn spans_midnight(&self) -> bool {
        self.rise_lct > self.set_lct
    }

    /// Hours the target spends above the horizon, accounting for midnight.
    pub fn duration_hours(&self) -> f64 {
        (self.set_lct - self.rise_lct).rem_euclid(24.0)
    }
}

/// Observability classification of a target at the observer's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisibilityVerdict {
    Observable,
    Unobservable,
}

impl VisibilityVerdict {
    pub fn is_observable(&self) -> bool {
        matches!(self, VisibilityVerdict::Observable)
    }
}

impl From<bool> for VisibilityVerdict {
    fn from(observable: bool) -> Self {
        if observable {
            VisibilityVerdict::Observable
        } else {
            VisibilityVerdict::Unobservable
        }
    }
}

impl fmt::Display for VisibilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisibilityVerdict::Observable => write!(f, "Observable"),
            VisibilityVerdict::Unobservable => write!(f, "Unobservable"),
        }
    }
}
