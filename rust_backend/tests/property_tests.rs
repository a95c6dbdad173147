//! Property tests for the calculation pipeline.

use novascope_rust::algorithms::{classify, solve_crossing, VisibilityPolicy};
use novascope_rust::core::domain::{CalendarDate, HorizonCrossing, JulianDay, TimeOfDay, VisibilityVerdict};
use novascope_rust::time::{compute_julian_day, format_hms, parse_hms, to_local_civil_time};
use proptest::prelude::*;

fn date_strategy() -> impl Strategy<Value = CalendarDate> {
    (-4712i32..=3000, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| CalendarDate::new(y, m, d))
}

fn time_strategy() -> impl Strategy<Value = TimeOfDay> {
    (0u32..24, 0u32..60, 0u32..60).prop_map(|(h, m, s)| TimeOfDay::new(h, m, s).unwrap())
}

proptest! {
    #[test]
    fn prop_julian_day_is_monotonic(
        a in (date_strategy(), time_strategy()),
        b in (date_strategy(), time_strategy()),
    ) {
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let jd_early = compute_julian_day(&early.0, &early.1).unwrap();
        let jd_late = compute_julian_day(&late.0, &late.1).unwrap();
        prop_assert!(jd_early.value() <= jd_late.value());
    }

    #[test]
    fn prop_format_parse_round_trip(x in 0.0f64..24.0) {
        let parsed = parse_hms(&format_hms(x)).unwrap();
        prop_assert!(parsed <= x + 1e-9);
        prop_assert!(x - parsed <= 1.0 / 3600.0 + 1e-9);
    }

    #[test]
    fn prop_format_is_total(x in proptest::num::f64::ANY) {
        let text = format_hms(x);
        prop_assert_eq!(text.len(), 8);
    }

    #[test]
    fn prop_lst_conversion_periodic(
        lst in 0.0f64..24.0,
        jd in 2415020.5f64..2488069.5,
        lon in -180.0f64..=180.0,
        offset in -12.0f64..=14.0,
    ) {
        let jd = JulianDay::new(jd);
        let a = to_local_civil_time(lst, jd, lon, offset);
        let b = to_local_civil_time(lst + 24.0, jd, lon, offset);
        prop_assert!((0.0..24.0).contains(&a));
        let diff = (a - b).abs();
        prop_assert!(diff < 1e-6 || (24.0 - diff) < 1e-6, "a = {}, b = {}", a, b);
    }

    #[test]
    fn prop_crossing_bounds_in_range(
        lat in -89.9f64..89.9,
        ra in 0.0f64..24.0,
        dec in -89.9f64..89.9,
    ) {
        if let HorizonCrossing::Crosses { rise_lst, set_lst } = solve_crossing(lat, ra, dec) {
            prop_assert!((0.0..24.0).contains(&rise_lst));
            prop_assert!((0.0..24.0).contains(&set_lst));
        }
    }

    #[test]
    fn prop_classify_bounds_inclusive(rise in 0.0f64..23.0, span in 0.0f64..1.0) {
        let set = rise + span;
        prop_assert_eq!(classify(rise, rise, set), VisibilityVerdict::Observable);
        prop_assert_eq!(classify(set, rise, set), VisibilityVerdict::Observable);
        prop_assert_eq!(classify(rise - 1e-6, rise, set), VisibilityVerdict::Unobservable);
    }

    #[test]
    fn prop_wrap_aware_agrees_on_same_day_windows(
        now in 0.0f64..24.0,
        rise in 0.0f64..12.0,
        span in 0.0f64..12.0,
    ) {
        let set = rise + span;
        prop_assert_eq!(
            VisibilityPolicy::WrapAware.classify(now, rise, set),
            VisibilityPolicy::Linear.classify(now, rise, set)
        );
    }
}
