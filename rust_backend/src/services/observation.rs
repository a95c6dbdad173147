//! Observation orchestration.
//!
//! Ties the calculation pipeline to the injected resolvers:
//!
//! 1. Julian Day of the observation moment (once per request)
//! 2. UTC offset at the observer's position (once per request, falls back on failure)
//! 3. Per target: catalog lookup, LST rise/set, LCT conversion, classification
//!
//! Batch requests resolve each target on its own tokio task and report results
//! in the order the names were given. A target that fails to resolve is
//! reported next to the others rather than aborting the batch.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::{classify_crossing, solve_for_target, VisibilityPolicy};
use crate::core::domain::{
    CelestialTarget, CivilWindow, HorizonCrossing, JulianDay, ObservationMoment,
    ObserverLocation, VisibilityVerdict,
};
use crate::core::error::{ObservationError, ObservationResult};
use crate::resolvers::{TargetResolver, TimezoneResolver};
use crate::time::{compute_julian_day, convert_window};

/// Largest batch accepted by default.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 50;

/// Tunables for [`ObservationService`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationSettings {
    pub policy: VisibilityPolicy,
    /// Offset used when the timezone resolver fails.
    pub fallback_utc_offset: f64,
    pub max_batch_size: usize,
}

impl Default for ObservationSettings {
    fn default() -> Self {
        Self {
            policy: VisibilityPolicy::default(),
            fallback_utc_offset: 0.0,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

/// Everything computed for one target at one moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetObservation {
    pub target: CelestialTarget,
    pub crossing: HorizonCrossing,
    /// Rise/set in local civil time; `None` when the target does not cross the horizon.
    pub window: Option<CivilWindow>,
    pub julian_day: JulianDay,
    /// Observer's clock time in decimal hours.
    pub lct_now: f64,
    pub utc_offset: f64,
    pub verdict: VisibilityVerdict,
}

impl TargetObservation {
    pub fn is_observable(&self) -> bool {
        self.verdict.is_observable()
    }
}

/// One line of a batch request.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// Position of the name in the request.
    pub index: usize,
    pub name: String,
    pub outcome: ObservationResult<TargetObservation>,
}

/// Ordered results of a batch request.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub moment: ObservationMoment,
    pub utc_offset: f64,
    pub observable_only: bool,
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Successful observations that are currently observable.
    pub fn observable(&self) -> impl Iterator<Item = &TargetObservation> {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.as_ref().ok())
            .filter(|obs| obs.is_observable())
    }

    /// Entries whose lookup or calculation failed.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ObservationError)> {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.as_ref().err().map(|err| (e.name.as_str(), err)))
    }

    pub fn observable_count(&self) -> usize {
        self.observable().count()
    }
}

/// Evaluate a target whose coordinates are already known.
///
/// Pure and synchronous: the Julian Day is computed from `moment` and shared by
/// the rise and set conversions.
///
/// # Arguments
/// * `location` - Observer position
/// * `moment` - Observer's local date and time
/// * `target` - Target coordinates
/// * `utc_offset` - Observer's UTC offset in hours
/// * `policy` - How windows running past midnight are treated
///
/// # Example
/// ```
/// use novascope_rust::algorithms::VisibilityPolicy;
/// use novascope_rust::core::domain::{CelestialTarget, ObserverLocation};
/// use novascope_rust::parsing::input::parse_moment;
/// use novascope_rust::services::evaluate_target;
///
/// let location = ObserverLocation::new(40.4168, -3.7038).unwrap();
/// let moment = parse_moment("2024-01-01", "22:00:00").unwrap();
/// let vega = CelestialTarget::new("Vega", 18.6156, 38.7837).unwrap();
///
/// let obs = evaluate_target(&location, &moment, &vega, 1.0, VisibilityPolicy::Linear).unwrap();
/// assert!(obs.window.is_some());
/// ```
pub fn evaluate_target(
    location: &ObserverLocation,
    moment: &ObservationMoment,
    target: &CelestialTarget,
    utc_offset: f64,
    policy: VisibilityPolicy,
) -> ObservationResult<TargetObservation> {
    let julian_day = compute_julian_day(&moment.date, &moment.time)?;
    Ok(evaluate_with_julian_day(
        location,
        moment,
        julian_day,
        target.clone(),
        utc_offset,
        policy,
    ))
}

fn evaluate_with_julian_day(
    location: &ObserverLocation,
    moment: &ObservationMoment,
    julian_day: JulianDay,
    target: CelestialTarget,
    utc_offset: f64,
    policy: VisibilityPolicy,
) -> TargetObservation {
    let crossing = solve_for_target(location, &target);
    let window = match crossing {
        HorizonCrossing::Crosses { rise_lst, set_lst } => Some(convert_window(
            rise_lst,
            set_lst,
            julian_day,
            location.longitude.value(),
            utc_offset,
        )),
        HorizonCrossing::AlwaysVisible | HorizonCrossing::NeverVisible => None,
    };
    let lct_now = moment.local_civil_hours();
    let verdict = classify_crossing(policy, &crossing, window.as_ref(), lct_now);

    log::debug!(
        "{}: crossing={:?} window={:?} now={:.4} -> {}",
        target.name,
        crossing,
        window,
        lct_now,
        verdict
    );

    TargetObservation {
        target,
        crossing,
        window,
        julian_day,
        lct_now,
        utc_offset,
        verdict,
    }
}

/// Runs observations against injected target and timezone resolvers.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use novascope_rust::parsing::input::{parse_location, parse_moment};
/// use novascope_rust::resolvers::{LocalCatalog, LongitudeZoneResolver};
/// use novascope_rust::services::{ObservationService, ObservationSettings};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let catalog = LocalCatalog::from_json_file("data/bright_stars.json")?;
///     let service = ObservationService::new(
///         Arc::new(catalog),
///         Arc::new(LongitudeZoneResolver),
///         ObservationSettings::default(),
///     );
///
///     let location = parse_location("40.4168", "-3.7038")?;
///     let moment = parse_moment("2024-01-01", "22:00:00")?;
///     let vega = service.observe_single(&location, &moment, "Vega").await?;
///     println!("{}", vega.verdict);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ObservationService {
    targets: Arc<dyn TargetResolver>,
    timezones: Arc<dyn TimezoneResolver>,
    settings: ObservationSettings,
}

impl ObservationService {
    pub fn new(
        targets: Arc<dyn TargetResolver>,
        timezones: Arc<dyn TimezoneResolver>,
        settings: ObservationSettings,
    ) -> Self {
        Self {
            targets,
            timezones,
            settings,
        }
    }

    pub fn settings(&self) -> &ObservationSettings {
        &self.settings
    }

    /// UTC offset at the observer's position.
    ///
    /// A resolver failure is logged and replaced by the configured fallback
    /// offset; it never aborts the calculation.
    pub async fn resolve_offset(
        &self,
        location: &ObserverLocation,
        moment: &ObservationMoment,
    ) -> f64 {
        let instant = approximate_instant(moment);
        match self
            .timezones
            .offset_for(location.latitude.value(), location.longitude.value(), instant)
            .await
        {
            Ok(offset) if offset.is_finite() => offset,
            Ok(offset) => {
                log::warn!(
                    "Timezone resolver returned {}; using fallback offset {}",
                    offset,
                    self.settings.fallback_utc_offset
                );
                self.settings.fallback_utc_offset
            }
            Err(e) => {
                log::warn!(
                    "{}; using fallback offset {}",
                    e,
                    self.settings.fallback_utc_offset
                );
                self.settings.fallback_utc_offset
            }
        }
    }

    /// Evaluate a target with known coordinates, resolving only the offset.
    pub async fn observe_target(
        &self,
        location: &ObserverLocation,
        moment: &ObservationMoment,
        target: &CelestialTarget,
    ) -> ObservationResult<TargetObservation> {
        let julian_day = compute_julian_day(&moment.date, &moment.time)?;
        let utc_offset = self.resolve_offset(location, moment).await;
        Ok(evaluate_with_julian_day(
            location,
            moment,
            julian_day,
            target.clone(),
            utc_offset,
            self.settings.policy,
        ))
    }

    /// Look a target up by name and evaluate it.
    pub async fn observe_single(
        &self,
        location: &ObserverLocation,
        moment: &ObservationMoment,
        name: &str,
    ) -> ObservationResult<TargetObservation> {
        let julian_day = compute_julian_day(&moment.date, &moment.time)?;
        let target = self.targets.resolve(name.trim()).await?;
        let utc_offset = self.resolve_offset(location, moment).await;
        Ok(evaluate_with_julian_day(
            location,
            moment,
            julian_day,
            target,
            utc_offset,
            self.settings.policy,
        ))
    }

    /// Pick one catalog target at random and evaluate it.
    ///
    /// # Returns
    /// * `Ok(TargetObservation)` for the chosen target
    /// * `Err(ObservationError::CatalogLookup)` if the catalog is empty or unavailable
    pub async fn observe_random<R: Rng + ?Sized>(
        &self,
        location: &ObserverLocation,
        moment: &ObservationMoment,
        rng: &mut R,
    ) -> ObservationResult<TargetObservation> {
        let names = self.targets.names(usize::MAX).await?;
        let name = names
            .choose(rng)
            .cloned()
            .ok_or_else(|| ObservationError::catalog("*", "catalog is empty"))?;
        log::info!("Randomly selected '{}' from {} targets", name, names.len());
        self.observe_single(location, moment, &name).await
    }

    /// Evaluate a list of targets at the same place and moment.
    ///
    /// # Arguments
    /// * `names` - Target names, in the order results should be reported
    /// * `observable_only` - Drop targets that are not observable; failed
    ///   lookups are always kept
    ///
    /// # Returns
    /// * `Ok(BatchReport)` with one entry per kept name, in request order
    /// * `Err(ObservationError::BatchTooLarge)` if `names` exceeds the configured limit
    /// * `Err(ObservationError::InvalidDate)` / `InvalidTimeOfDay` for a bad moment
    pub async fn observe_batch(
        &self,
        location: &ObserverLocation,
        moment: &ObservationMoment,
        names: &[String],
        observable_only: bool,
    ) -> ObservationResult<BatchReport> {
        if names.len() > self.settings.max_batch_size {
            return Err(ObservationError::BatchTooLarge {
                requested: names.len(),
                limit: self.settings.max_batch_size,
            });
        }

        let julian_day = compute_julian_day(&moment.date, &moment.time)?;
        let utc_offset = self.resolve_offset(location, moment).await;

        let handles: Vec<_> = names
            .iter()
            .map(|name| {
                let targets = Arc::clone(&self.targets);
                let name = name.trim().to_string();
                let location = *location;
                let moment = *moment;
                let policy = self.settings.policy;
                tokio::spawn(async move {
                    let target = targets.resolve(&name).await?;
                    Ok::<_, ObservationError>(evaluate_with_julian_day(
                        &location, &moment, julian_day, target, utc_offset, policy,
                    ))
                })
            })
            .collect();

        let mut entries = Vec::with_capacity(names.len());
        for (index, (name, handle)) in names.iter().zip(handles).enumerate() {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(ObservationError::catalog(
                    name,
                    format!("lookup task failed: {}", e),
                )),
            };
            if let Err(e) = &outcome {
                log::warn!("Skipping '{}': {}", name, e);
            }
            entries.push(BatchEntry {
                index,
                name: name.trim().to_string(),
                outcome,
            });
        }

        if observable_only {
            entries.retain(|e| match &e.outcome {
                Ok(obs) => obs.is_observable(),
                Err(_) => true,
            });
        }

        let report = BatchReport {
            moment: *moment,
            utc_offset,
            observable_only,
            entries,
        };
        log::info!(
            "Batch of {} targets at {}: {} observable, {} failed",
            names.len(),
            moment,
            report.observable_count(),
            report.failures().count()
        );
        Ok(report)
    }

    /// Run a batch over the first `count` targets the resolver lists.
    ///
    /// `count` is held to the batch limit even when the catalog is smaller.
    pub async fn observe_catalog_sample(
        &self,
        location: &ObserverLocation,
        moment: &ObservationMoment,
        count: usize,
        observable_only: bool,
    ) -> ObservationResult<BatchReport> {
        if count > self.settings.max_batch_size {
            return Err(ObservationError::BatchTooLarge {
                requested: count,
                limit: self.settings.max_batch_size,
            });
        }

        let names = self.targets.names(count).await?;
        self.observe_batch(location, moment, &names, observable_only)
            .await
    }
}

/// Observation moment read as a UTC instant, for timezone lookups.
///
/// Dates outside chrono's range fall back to the current instant.
fn approximate_instant(moment: &ObservationMoment) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(moment.date.year, moment.date.month, moment.date.day)
        .and_then(|d| d.and_hms_opt(moment.time.hour, moment.time.minute, moment.time.second))
        .map(|naive| naive.and_utc())
        .unwrap_or_else(Utc::now)
}
