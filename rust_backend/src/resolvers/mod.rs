//! Capability traits for the external lookups of the observation pipeline.
//!
//! The calculation core never talks to a live service. Star coordinates and
//! UTC offsets are obtained through two small traits that front ends implement
//! over whatever service they use (an astronomical name resolver, a timezone
//! database) and that tests implement offline.
//!
//! # Module Organization
//!
//! - [`catalog`]: In-memory star catalog implementing [`TargetResolver`]
//! - [`timezone`]: Offline [`TimezoneResolver`] implementations
//!
//! # Example
//!
//! ```ignore
//! async fn lookup<T: TargetResolver, Z: TimezoneResolver>(targets: &T, zones: &Z) -> ObservationResult<()> {
//!     let vega = targets.resolve("Vega").await?;
//!     let offset = zones.offset_for(40.4, -3.7, Utc::now()).await?;
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::domain::CelestialTarget;
use crate::core::error::ObservationResult;

pub mod catalog;
pub mod timezone;

pub use catalog::LocalCatalog;
pub use timezone::{FixedOffsetResolver, LongitudeZoneResolver, ZoneRule, ZoneTableResolver};

/// Resolves target names into equatorial coordinates.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`: batch requests resolve targets from
/// several tasks at once.
#[async_trait]
pub trait TargetResolver: Send + Sync {
    /// Look up a target by name.
    ///
    /// # Returns
    /// * `Ok(CelestialTarget)` with right ascension and declination
    /// * `Err(ObservationError::CatalogLookup)` if the name is unknown or the
    ///   service is unavailable
    async fn resolve(&self, name: &str) -> ObservationResult<CelestialTarget>;

    /// List up to `limit` target names, in the resolver's natural order.
    async fn names(&self, limit: usize) -> ObservationResult<Vec<String>>;
}

/// Resolves the UTC offset in force at a geographic position.
#[async_trait]
pub trait TimezoneResolver: Send + Sync {
    /// UTC offset in hours (possibly fractional) at `instant`.
    ///
    /// # Returns
    /// * `Ok(f64)` offset in hours, east-positive
    /// * `Err(ObservationError::TimezoneResolution)` if no zone applies
    async fn offset_for(
        &self,
        latitude: f64,
        longitude: f64,
        instant: DateTime<Utc>,
    ) -> ObservationResult<f64>;
}
