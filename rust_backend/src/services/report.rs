//! Presentation of observation results.
//!
//! Turns [`TargetObservation`]s and [`BatchReport`]s into display rows with
//! `HH:MM:SS` times and a `GMT +x.x` timezone label, either as plain text or as
//! serializable structures for JSON output.

use serde::Serialize;

use crate::core::domain::{HorizonCrossing, VisibilityVerdict};
use crate::core::error::ObservationError;
use crate::services::observation::{BatchReport, TargetObservation};
use crate::time::format::{format_hms, format_utc_offset, INVALID_HMS};

/// One display line for a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationRow {
    pub name: String,
    pub rise: String,
    pub now: String,
    pub set: String,
    pub timezone: String,
    /// `crosses`, `always_visible` or `never_visible`; empty for failed lookups.
    pub horizon: String,
    pub verdict: Option<VisibilityVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ObservationRow {
    pub fn from_observation(obs: &TargetObservation) -> Self {
        let (rise, set) = match obs.window {
            Some(window) => (format_hms(window.rise_lct), format_hms(window.set_lct)),
            None => (INVALID_HMS.to_string(), INVALID_HMS.to_string()),
        };
        Self {
            name: obs.target.name.clone(),
            rise,
            now: format_hms(obs.lct_now),
            set,
            timezone: format_utc_offset(obs.utc_offset),
            horizon: horizon_label(&obs.crossing).to_string(),
            verdict: Some(obs.verdict),
            error: None,
        }
    }

    pub fn from_failure(name: &str, lct_now: f64, utc_offset: f64, error: &ObservationError) -> Self {
        Self {
            name: name.to_string(),
            rise: INVALID_HMS.to_string(),
            now: format_hms(lct_now),
            set: INVALID_HMS.to_string(),
            timezone: format_utc_offset(utc_offset),
            horizon: String::new(),
            verdict: None,
            error: Some(error.to_string()),
        }
    }

    /// Text of the observability column.
    pub fn status(&self) -> String {
        match (&self.verdict, &self.error) {
            (Some(verdict), _) => verdict.to_string(),
            (None, Some(error)) => format!("Error: {}", error),
            (None, None) => String::new(),
        }
    }
}

fn horizon_label(crossing: &HorizonCrossing) -> &'static str {
    match crossing {
        HorizonCrossing::Crosses { .. } => "crosses",
        HorizonCrossing::AlwaysVisible => "always_visible",
        HorizonCrossing::NeverVisible => "never_visible",
    }
}

/// Multi-line description of a single target.
///
/// # Example
/// ```
/// use novascope_rust::algorithms::VisibilityPolicy;
/// use novascope_rust::core::domain::{CelestialTarget, ObserverLocation};
/// use novascope_rust::parsing::input::parse_moment;
/// use novascope_rust::services::{evaluate_target, render_single};
///
/// let location = ObserverLocation::new(0.0, 0.0).unwrap();
/// let moment = parse_moment("2024-01-01", "12:00:00").unwrap();
/// let star = CelestialTarget::new("Test", 6.0, 0.0).unwrap();
/// let obs = evaluate_target(&location, &moment, &star, 0.0, VisibilityPolicy::Linear).unwrap();
///
/// let text = render_single(&obs);
/// assert!(text.starts_with("Test Observability"));
/// assert!(text.contains("Local Observation Time: 12:00:00 (GMT 0.0)"));
/// ```
pub fn render_single(obs: &TargetObservation) -> String {
    let row = ObservationRow::from_observation(obs);
    let mut lines = vec![
        format!("{} Observability", row.name),
        format!("Local Observation Time: {} ({})", row.now, row.timezone),
    ];
    match obs.crossing {
        HorizonCrossing::Crosses { .. } => {
            lines.push(format!("Rise Time: {} ({})", row.rise, row.timezone));
            lines.push(format!("Set Time: {} ({})", row.set, row.timezone));
        }
        HorizonCrossing::AlwaysVisible => {
            lines.push("Circumpolar: never sets at this latitude".to_string());
        }
        HorizonCrossing::NeverVisible => {
            lines.push("Never rises at this latitude".to_string());
        }
    }
    lines.push(format!("Observability: {}", row.status()));
    lines.join("\n")
}

/// Display form of a batch request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchTable {
    pub title: String,
    pub timezone: String,
    pub rows: Vec<ObservationRow>,
    /// Set when nothing in the table is observable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl BatchTable {
    pub fn from_report(report: &BatchReport) -> Self {
        let timezone = format_utc_offset(report.utc_offset);
        let lct_now = report.moment.local_civil_hours();

        let rows: Vec<ObservationRow> = report
            .entries
            .iter()
            .map(|entry| match &entry.outcome {
                Ok(obs) => ObservationRow::from_observation(obs),
                Err(e) => ObservationRow::from_failure(&entry.name, lct_now, report.utc_offset, e),
            })
            .collect();

        let nothing_to_show =
            report.is_empty() || (report.observable_only && report.observable_count() == 0);
        let summary = nothing_to_show.then(|| {
            format!(
                "No stars are observable at {} {}",
                format_hms(lct_now),
                timezone
            )
        });

        Self {
            title: format!(
                "Stars Observation Results in {} {} at {}",
                report.moment.time, timezone, report.moment.date
            ),
            timezone,
            rows,
            summary,
        }
    }

    /// Render as an aligned text table.
    pub fn render(&self) -> String {
        let headers = [
            "Star".to_string(),
            format!("LCT Rise ({})", self.timezone),
            format!("LCT Observer ({})", self.timezone),
            format!("LCT Set ({})", self.timezone),
            "Observability".to_string(),
        ];
        let cells: Vec<[String; 5]> = self
            .rows
            .iter()
            .map(|r| {
                [
                    r.name.clone(),
                    r.rise.clone(),
                    r.now.clone(),
                    r.set.clone(),
                    r.status(),
                ]
            })
            .collect();

        let mut widths = headers.clone().map(|h| h.chars().count());
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let format_line = |row: &[String; 5]| {
            row.iter()
                .zip(widths.iter())
                .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = vec![self.title.clone(), String::new(), format_line(&headers)];
        out.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        out.extend(cells.iter().map(format_line));
        if let Some(summary) = &self.summary {
            out.push(String::new());
            out.push(summary.clone());
        }
        out.join("\n")
    }
}

/// Plain-text rendering of a batch report.
pub fn render_batch(report: &BatchReport) -> String {
    BatchTable::from_report(report).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::VisibilityPolicy;
    use crate::core::domain::{CalendarDate, CelestialTarget, ObservationMoment, ObserverLocation, TimeOfDay};
    use crate::services::observation::{evaluate_target, BatchEntry};

    fn moment() -> ObservationMoment {
        ObservationMoment::new(
            CalendarDate::new(2024, 1, 1),
            TimeOfDay::new(21, 30, 0).unwrap(),
        )
    }

    fn observe(name: &str, dec: f64) -> TargetObservation {
        let location = ObserverLocation::new(40.0, 0.0).unwrap();
        let target = CelestialTarget::new(name, 2.5, dec).unwrap();
        evaluate_target(&location, &moment(), &target, 1.0, VisibilityPolicy::Linear).unwrap()
    }

    fn report(entries: Vec<BatchEntry>, observable_only: bool) -> BatchReport {
        BatchReport {
            moment: moment(),
            utc_offset: 1.0,
            observable_only,
            entries,
        }
    }

    #[test]
    fn test_row_for_circumpolar_target() {
        let obs = observe("Polaris", 89.26);
        let row = ObservationRow::from_observation(&obs);
        assert_eq!(row.rise, INVALID_HMS);
        assert_eq!(row.set, INVALID_HMS);
        assert_eq!(row.now, "21:30:00");
        assert_eq!(row.timezone, "GMT +1.0");
        assert_eq!(row.horizon, "always_visible");
        assert_eq!(row.status(), "Observable");
    }

    #[test]
    fn test_render_single_never_rises() {
        let text = render_single(&observe("Deep South", -80.0));
        assert!(text.contains("Never rises"));
        assert!(text.ends_with("Observability: Unobservable"));
    }

    #[test]
    fn test_batch_table_keeps_failures() {
        let entries = vec![
            BatchEntry {
                index: 0,
                name: "Polaris".to_string(),
                outcome: Ok(observe("Polaris", 89.26)),
            },
            BatchEntry {
                index: 1,
                name: "Nowhere".to_string(),
                outcome: Err(ObservationError::catalog("Nowhere", "no such object in catalog")),
            },
        ];
        let table = BatchTable::from_report(&report(entries, false));

        assert_eq!(table.rows.len(), 2);
        assert!(table.summary.is_none());
        assert!(table.rows[1].status().starts_with("Error:"));
        assert_eq!(
            table.title,
            "Stars Observation Results in 21:30:00 GMT +1.0 at 2024-01-01"
        );

        let text = table.render();
        assert!(text.contains("LCT Rise (GMT +1.0)"));
        assert!(text.contains("Nowhere"));
    }

    #[test]
    fn test_summary_when_nothing_observable() {
        let table = BatchTable::from_report(&report(vec![], true));
        assert_eq!(
            table.summary.as_deref(),
            Some("No stars are observable at 21:30:00 GMT +1.0")
        );
        assert!(render_batch(&report(vec![], true)).ends_with("No stars are observable at 21:30:00 GMT +1.0"));
    }

    #[test]
    fn test_json_omits_empty_error() {
        let row = ObservationRow::from_observation(&observe("Polaris", 89.26));
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["verdict"], "Observable");
    }
}
