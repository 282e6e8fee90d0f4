//! Text rendering of dashboard frames
//!
//! A frame shows the latest values, a two-series chart drawn as sparklines
//! over the most recent [`CHART_POINTS`] samples, and the tail of the
//! anomaly log:
//!
//! ```text
//! ── Live Simulation ─────────────────────────────
//! Latest Vibration:   6.42 mm/s
//! Latest Sound Level: 71.90 dB
//!
//! Vibration (mm/s) ▂▅▇▃▁▄█▆  [0.31 .. 9.87]
//! Sound Level (dB) ▆▃▁▇▅▂▄█  [33.02 .. 88.64]
//!                  10:15:02 → 10:15:06
//!
//! Recent Anomalies:
//!   10:15:05 - High vibration detected: 9.87 mm/s
//! ```

use std::fmt::Write;

use twinsim_core::constants::session::{NO_ANOMALIES_MESSAGE, RECENT_ANOMALY_LIMIT};
use twinsim_core::time::ctime_label;
use twinsim_core::{AnomalyReport, Event, HistoryPoint, SessionState};

/// Samples shown in the chart
pub const CHART_POINTS: usize = 60;

const RULE_WIDTH: usize = 50;
const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render one dashboard frame
pub fn frame(title: &str, state: &SessionState) -> String {
    let mut out = String::new();
    let rule = RULE_WIDTH.saturating_sub(title.chars().count() + 4);
    let _ = writeln!(out, "── {title} {}", "─".repeat(rule));

    match state.latest() {
        Some(point) => {
            let _ = writeln!(out, "Latest Vibration:   {:.2} mm/s", point.vibration_mm_s);
            let _ = writeln!(out, "Latest Sound Level: {:.2} dB", point.sound_db);
        }
        None => {
            let _ = writeln!(out, "Latest Vibration:   --");
            let _ = writeln!(out, "Latest Sound Level: --");
        }
    }
    out.push('\n');

    let history = state.history();
    let window = &history[history.len().saturating_sub(CHART_POINTS)..];
    if let (Some(first), Some(last)) = (window.first(), window.last()) {
        let vibration: Vec<f64> = window.iter().map(|p| p.vibration_mm_s).collect();
        let sound: Vec<f64> = window.iter().map(|p| p.sound_db).collect();
        let _ = writeln!(out, "Vibration (mm/s) {}", series(&vibration));
        let _ = writeln!(out, "Sound Level (dB) {}", series(&sound));
        let _ = writeln!(out, "{:17}{}", "", axis(first, last));
        out.push('\n');
    }

    let _ = writeln!(out, "Recent Anomalies:");
    let recent = state.recent_anomalies(RECENT_ANOMALY_LIMIT);
    if recent.is_empty() {
        let _ = writeln!(out, "  {NO_ANOMALIES_MESSAGE}");
    }
    for entry in recent {
        let _ = writeln!(out, "  {entry}");
    }
    out
}

/// Render one console cycle
pub fn console_event(event: &Event, report: &AnomalyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Event at {}:", ctime_label(event.timestamp()));
    let _ = writeln!(out, "  Vibration: {:.2} mm/s", event.vibration_mm_s());
    let _ = writeln!(out, "  Sound Level: {:.2} dB", event.sound_db());

    if report.is_empty() {
        let _ = writeln!(out, "  No anomalies detected.");
    } else {
        let _ = writeln!(out, "  Anomalies Detected:");
        for anomaly in report {
            let _ = writeln!(out, "   - {anomaly}");
        }
    }

    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    out
}

/// Scale values onto block characters; non-finite values become blanks
pub fn sparkline(values: &[f64]) -> String {
    let Some((min, max)) = bounds(values) else {
        return " ".repeat(values.len());
    };
    let span = max - min;

    values
        .iter()
        .map(|&value| {
            if !value.is_finite() {
                ' '
            } else if span == 0.0 {
                LEVELS[LEVELS.len() / 2]
            } else {
                let level = ((value - min) / span * (LEVELS.len() - 1) as f64).round() as usize;
                LEVELS[level.min(LEVELS.len() - 1)]
            }
        })
        .collect()
}

fn series(values: &[f64]) -> String {
    match bounds(values) {
        Some((min, max)) => format!("{}  [{min:.2} .. {max:.2}]", sparkline(values)),
        None => sparkline(values),
    }
}

fn axis(first: &HistoryPoint, last: &HistoryPoint) -> String {
    if first.label == last.label {
        first.label.clone()
    } else {
        format!("{} → {}", first.label, last.label)
    }
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}
