//! Reconciliation between the source and the star schema.
//!
//! Compares four aggregates over a trailing window of whole days and flags any
//! whose relative drift exceeds a threshold. Read-only on both sides.

use std::fmt;

use anyhow::{Context, anyhow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use diesel::SqliteConnection;
use tracing::{info, warn};

use crate::dates::date_key;
use crate::source::SourceStore;
use crate::warehouse::stats;

/// Percent difference of `target` relative to `source`.
///
/// 0 when both are zero, 100 when exactly one is, otherwise
/// `|source - target| / max(source, 1) * 100`.
pub fn pct_diff(source: f64, target: f64) -> f64 {
    match (source == 0.0, target == 0.0) {
        (true, true) => 0.0,
        (true, false) | (false, true) => 100.0,
        (false, false) => (source - target).abs() / source.max(1.0) * 100.0,
    }
}

/// One compared aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// Human-readable name, e.g. "rental count".
    pub name: &'static str,
    /// Whether the metric is restricted to the window.
    pub windowed: bool,
    /// Source-side value.
    pub source: f64,
    /// Target-side value.
    pub target: f64,
    /// [`pct_diff`] of the two.
    pub diff_pct: f64,
}

impl Metric {
    fn new(name: &'static str, windowed: bool, source: f64, target: f64) -> Self {
        Self {
            name,
            windowed,
            source,
            target,
            diff_pct: pct_diff(source, target),
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Window length in days.
    pub window_days: u32,
    /// Drift allowed per metric, in percent.
    pub threshold_pct: f64,
    /// First instant inside the window (midnight).
    pub window_start: NaiveDateTime,
    /// Every compared metric.
    pub metrics: Vec<Metric>,
    /// One line per metric over the threshold.
    pub problems: Vec<String>,
    /// True iff `problems` is empty.
    pub ok: bool,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "validation since {} ({} days, threshold {}%)",
            self.window_start.date(),
            self.window_days,
            self.threshold_pct
        )?;
        for m in &self.metrics {
            writeln!(
                f,
                "  {:<16} source {:>12.2}  target {:>12.2}  diff {:>6.2}%",
                m.name, m.source, m.target, m.diff_pct
            )?;
        }
        if self.ok {
            write!(f, "ok")
        } else {
            write!(f, "{} problem(s):", self.problems.len())?;
            for p in &self.problems {
                write!(f, "\n  - {p}")?;
            }
            Ok(())
        }
    }
}

/// First calendar day of a `window_days` window ending at `now`.
///
/// Errors when the window reaches before the earliest representable date.
pub fn window_start_day(now: NaiveDateTime, window_days: u32) -> anyhow::Result<NaiveDate> {
    TimeDelta::try_days(i64::from(window_days))
        .and_then(|span| now.checked_sub_signed(span))
        .map(|start| start.date())
        .ok_or_else(|| {
            anyhow!("validation window of {window_days} days starts before the earliest supported date")
        })
}

/// Validate the last `window_days` days as of now.
pub fn validate(
    source: &mut dyn SourceStore,
    target: &mut SqliteConnection,
    window_days: u32,
    threshold_pct: f64,
) -> anyhow::Result<ValidationReport> {
    validate_at(
        source,
        target,
        window_days,
        threshold_pct,
        Utc::now().naive_utc(),
    )
}

/// [`validate`] with an explicit "now".
///
/// The window starts at midnight of `now - window_days`. The source filters on
/// timestamps `>=` that instant and the target on date keys `>=` that day, so
/// both count the same whole days.
pub fn validate_at(
    source: &mut dyn SourceStore,
    target: &mut SqliteConnection,
    window_days: u32,
    threshold_pct: f64,
    now: NaiveDateTime,
) -> anyhow::Result<ValidationReport> {
    let start_day = window_start_day(now, window_days)?;
    let window_start = start_day.and_time(NaiveTime::MIN);
    let from_key = date_key(start_day);
    info!(window_days, %window_start, "validating");

    let src_films = source.film_count().context("source film count")?;
    let tgt_films = stats::film_count(target).context("target film count")?;
    let src_rentals = source
        .rental_count_since(window_start)
        .context("source rental count")?;
    let tgt_rentals =
        stats::rental_count_since_key(target, from_key).context("target rental count")?;
    let (src_pay_n, src_pay_sum) = source
        .payment_totals_since(window_start)
        .context("source payment totals")?;
    let (tgt_pay_n, tgt_pay_sum) =
        stats::payment_totals_since_key(target, from_key).context("target payment totals")?;

    let metrics = vec![
        Metric::new("film count", false, src_films as f64, tgt_films as f64),
        Metric::new("rental count", true, src_rentals as f64, tgt_rentals as f64),
        Metric::new("payment count", true, src_pay_n as f64, tgt_pay_n as f64),
        Metric::new("payment total", true, src_pay_sum, tgt_pay_sum),
    ];

    let problems: Vec<String> = metrics
        .iter()
        .filter(|m| m.diff_pct > threshold_pct)
        .map(|m| {
            let scope = if m.windowed {
                format!(" (last {window_days} days)")
            } else {
                String::new()
            };
            format!(
                "{} differs by {:.2}% > {}%{} (source={} target={})",
                m.name, m.diff_pct, threshold_pct, scope, m.source, m.target
            )
        })
        .collect();

    for m in &metrics {
        info!(
            metric = m.name,
            source = m.source,
            target = m.target,
            diff_pct = m.diff_pct,
            "metric compared"
        );
    }
    let ok = problems.is_empty();
    if ok {
        info!("validation passed");
    } else {
        warn!(problems = problems.len(), "validation found drift");
    }

    Ok(ValidationReport {
        window_days,
        threshold_pct,
        window_start,
        metrics,
        problems,
        ok,
    })
}
