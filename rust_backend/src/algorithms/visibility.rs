//! Observability of a target at the observer's local civil time.

use serde::{Deserialize, Serialize};

use crate::core::domain::{CivilWindow, HorizonCrossing, VisibilityVerdict};

/// How a rise/set window is compared against the observer's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityPolicy {
    /// `rise <= now <= set` on the plain `[0, 24)` line. A window running past
    /// midnight (rise > set) is never observable under this policy.
    #[default]
    Linear,
    /// As `Linear`, but a window with rise > set is read as running through
    /// midnight: `now >= rise || now <= set`.
    WrapAware,
}

impl VisibilityPolicy {
    /// Classify `lct_now` against the window `[lct_rise, lct_set]`.
    pub fn classify(&self, lct_now: f64, lct_rise: f64, lct_set: f64) -> VisibilityVerdict {
        let observable = match self {
            VisibilityPolicy::Linear => lct_rise <= lct_now && lct_now <= lct_set,
            VisibilityPolicy::WrapAware if lct_rise > lct_set => {
                lct_now >= lct_rise || lct_now <= lct_set
            }
            VisibilityPolicy::WrapAware => lct_rise <= lct_now && lct_now <= lct_set,
        };
        VisibilityVerdict::from(observable)
    }
}

/// Classify with the default [`VisibilityPolicy::Linear`] rule.
///
/// # Example
/// ```
/// use novascope_rust::algorithms::classify;
/// use novascope_rust::core::domain::VisibilityVerdict;
///
/// assert_eq!(classify(21.0, 19.5, 23.0), VisibilityVerdict::Observable);
/// // Windows crossing midnight are reported unobservable by this rule
/// assert_eq!(classify(23.0, 22.0, 2.0), VisibilityVerdict::Unobservable);
/// ```
pub fn classify(lct_now: f64, lct_rise: f64, lct_set: f64) -> VisibilityVerdict {
    VisibilityPolicy::Linear.classify(lct_now, lct_rise, lct_set)
}

/// Classify with an explicit policy.
pub fn classify_with(
    policy: VisibilityPolicy,
    lct_now: f64,
    lct_rise: f64,
    lct_set: f64,
) -> VisibilityVerdict {
    policy.classify(lct_now, lct_rise, lct_set)
}

/// Classify a full horizon crossing.
///
/// Targets that never set are observable at any hour and targets that never
/// rise at none; only crossing targets consult the civil window.
pub fn classify_crossing(
    policy: VisibilityPolicy,
    crossing: &HorizonCrossing,
    window: Option<&CivilWindow>,
    lct_now: f64,
) -> VisibilityVerdict {
    match (crossing, window) {
        (HorizonCrossing::AlwaysVisible, _) => VisibilityVerdict::Observable,
        (HorizonCrossing::NeverVisible, _) => VisibilityVerdict::Unobservable,
        (HorizonCrossing::Crosses { .. }, Some(window)) => {
            policy.classify(lct_now, window.rise_lct, window.set_lct)
        }
        (HorizonCrossing::Crosses { .. }, None) => VisibilityVerdict::Unobservable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VisibilityVerdict::*;

    #[test]
    fn test_boundaries_are_inclusive() {
        let (rise, set) = (5.25, 17.75);
        assert_eq!(classify(rise, rise, set), Observable);
        assert_eq!(classify(set, rise, set), Observable);
        assert_eq!(classify(rise - 1e-9, rise, set), Unobservable);
        assert_eq!(classify(set + 1e-9, rise, set), Unobservable);
    }

    #[test]
    fn test_linear_keeps_midnight_gap() {
        assert_eq!(classify(23.0, 22.0, 2.0), Unobservable);
        assert_eq!(classify(1.0, 22.0, 2.0), Unobservable);
    }

    #[test]
    fn test_wrap_aware_covers_midnight() {
        let policy = VisibilityPolicy::WrapAware;
        assert_eq!(policy.classify(23.0, 22.0, 2.0), Observable);
        assert_eq!(policy.classify(1.0, 22.0, 2.0), Observable);
        assert_eq!(policy.classify(22.0, 22.0, 2.0), Observable);
        assert_eq!(policy.classify(12.0, 22.0, 2.0), Unobservable);
        // Same-day windows behave like Linear
        assert_eq!(policy.classify(10.0, 8.0, 16.0), Observable);
        assert_eq!(policy.classify(7.0, 8.0, 16.0), Unobservable);
        assert_eq!(classify_with(policy, 23.0, 22.0, 2.0), Observable);
    }

    #[test]
    fn test_classify_crossing() {
        let window = CivilWindow::new(8.0, 16.0);
        let crossing = HorizonCrossing::Crosses {
            rise_lst: 1.0,
            set_lst: 9.0,
        };
        let linear = VisibilityPolicy::Linear;

        assert_eq!(
            classify_crossing(linear, &crossing, Some(&window), 12.0),
            Observable
        );
        assert_eq!(classify_crossing(linear, &crossing, None, 12.0), Unobservable);
        assert_eq!(
            classify_crossing(linear, &HorizonCrossing::AlwaysVisible, None, 3.0),
            Observable
        );
        assert_eq!(
            classify_crossing(linear, &HorizonCrossing::NeverVisible, Some(&window), 12.0),
            Unobservable
        );
    }

    #[test]
    fn test_policy_deserializes_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: VisibilityPolicy,
        }
        let parsed: Wrapper = toml::from_str("policy = \"wrap_aware\"").unwrap();
        assert_eq!(parsed.policy, VisibilityPolicy::WrapAware);
    }
}
