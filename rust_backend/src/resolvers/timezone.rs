//! Offline timezone resolvers.
//!
//! None of these model daylight saving; the `instant` argument is accepted for
//! resolvers backed by a real timezone database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use qtty::{Degrees, HourAngle};
use serde::{Deserialize, Serialize};

use super::TimezoneResolver;
use crate::core::error::{ObservationError, ObservationResult};

/// Always answers with the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedOffsetResolver {
    pub offset_hours: f64,
}

impl FixedOffsetResolver {
    pub fn new(offset_hours: f64) -> Self {
        Self { offset_hours }
    }
}

#[async_trait]
impl TimezoneResolver for FixedOffsetResolver {
    async fn offset_for(&self, _: f64, _: f64, _: DateTime<Utc>) -> ObservationResult<f64> {
        Ok(self.offset_hours)
    }
}

/// Nautical timezone: one hour per 15 degrees of longitude, clamped to +/-12.
///
/// # Example
/// ```
/// use novascope_rust::resolvers::LongitudeZoneResolver;
///
/// assert_eq!(LongitudeZoneResolver::offset_for_longitude(-3.7), 0.0);
/// assert_eq!(LongitudeZoneResolver::offset_for_longitude(139.7), 9.0);
/// assert_eq!(LongitudeZoneResolver::offset_for_longitude(-180.0), -12.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LongitudeZoneResolver;

impl LongitudeZoneResolver {
    pub fn offset_for_longitude(longitude: f64) -> f64 {
        Degrees::new(longitude)
            .to::<HourAngle>()
            .value()
            .round()
            .clamp(-12.0, 12.0)
    }
}

#[async_trait]
impl TimezoneResolver for LongitudeZoneResolver {
    async fn offset_for(
        &self,
        _latitude: f64,
        longitude: f64,
        _instant: DateTime<Utc>,
    ) -> ObservationResult<f64> {
        if !longitude.is_finite() {
            return Err(ObservationError::TimezoneResolution {
                reason: format!("longitude {} is not a number", longitude),
            });
        }
        Ok(Self::offset_for_longitude(longitude))
    }
}

/// A rectangular region with a fixed UTC offset.
///
/// Bounds are inclusive. Configured under `[[timezone.zones]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRule {
    pub name: String,
    #[serde(default = "default_min_latitude")]
    pub min_latitude: f64,
    #[serde(default = "default_max_latitude")]
    pub max_latitude: f64,
    #[serde(default = "default_min_longitude")]
    pub min_longitude: f64,
    #[serde(default = "default_max_longitude")]
    pub max_longitude: f64,
    pub offset_hours: f64,
}

fn default_min_latitude() -> f64 {
    -90.0
}

fn default_max_latitude() -> f64 {
    90.0
}

fn default_min_longitude() -> f64 {
    -180.0
}

fn default_max_longitude() -> f64 {
    180.0
}

impl ZoneRule {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }
}

/// Looks the position up in an ordered list of zones; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct ZoneTableResolver {
    zones: Vec<ZoneRule>,
}

impl ZoneTableResolver {
    pub fn new(zones: Vec<ZoneRule>) -> Self {
        Self { zones }
    }

    pub fn zones(&self) -> &[ZoneRule] {
        &self.zones
    }

    /// Find the zone covering a position.
    pub fn find(&self, latitude: f64, longitude: f64) -> Option<&ZoneRule> {
        self.zones.iter().find(|z| z.contains(latitude, longitude))
    }
}

#[async_trait]
impl TimezoneResolver for ZoneTableResolver {
    async fn offset_for(
        &self,
        latitude: f64,
        longitude: f64,
        _instant: DateTime<Utc>,
    ) -> ObservationResult<f64> {
        match self.find(latitude, longitude) {
            Some(zone) => {
                log::debug!(
                    "({}, {}) resolved to zone '{}' ({:+})",
                    latitude,
                    longitude,
                    zone.name,
                    zone.offset_hours
                );
                Ok(zone.offset_hours)
            }
            None => Err(ObservationError::TimezoneResolution {
                reason: format!("no zone covers ({}, {})", latitude, longitude),
            }),
        }
    }
}
