pub mod chart;
pub mod counters;
pub mod ids;
pub mod report;
pub mod score;
pub mod summary;

use crate::config::{Config, FieldsConfig};
use crate::core::chart::{ChartAdapter, SnapshotChart};
use crate::core::report::{FinalSummary, ReportDocument, ReportRow, TaggedRow};
use crate::core::score::Policy;
use crate::core::summary::HealthSummary;
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

/// Feeds every row into the session, one increment per row, in document order.
pub fn fold_rows<C: ChartAdapter>(
    summary: &mut HealthSummary<C>,
    rows: &[ReportRow<'_>],
    fields: &FieldsConfig,
) -> Vec<TaggedRow> {
    rows.iter()
        .map(|row| {
            let id = summary.next_id();
            let events = row.events(fields);
            debug!(id, section = row.section, name = row.name(), "folding row");
            summary.add(events);

            TaggedRow {
                id,
                section: row.section.to_string(),
                name: row.name().map(str::to_string),
                events,
            }
        })
        .collect()
}

pub fn run_summary(report_path: &Path, cfg: &Config) -> Result<FinalSummary> {
    let document = ReportDocument::load(report_path)?;
    Ok(summarize(&document, cfg))
}

pub fn summarize(document: &ReportDocument, cfg: &Config) -> FinalSummary {
    let policy: Policy = cfg.general.policy;
    let mut summary = HealthSummary::with_chart(cfg.weight_profile(), SnapshotChart::default());

    let rows = document.rows(&cfg.report.sections);
    let tagged = fold_rows(&mut summary, &rows, &cfg.report.fields);

    let counters = *summary.counters();
    let weights = *summary.weights();
    let chart = summary.into_chart();
    info!(
        rows = tagged.len(),
        updates = chart.updates(),
        failed = counters.has_errors(),
        "health summary ready"
    );

    FinalSummary {
        project: document.project_name().map(str::to_string),
        policy,
        weights,
        counters,
        breakdown: chart.latest().clone(),
        verdict: score::verdict_for(&counters),
        rows: tagged,
        chart_updates: chart.updates(),
        exit: report::evaluate_exit(&counters, cfg.general.fail_on),
    }
}

pub fn run_total(report_path: &Path, cfg: &Config, key: &str) -> Result<f64> {
    let document = ReportDocument::load(report_path)?;
    let rows = document.rows(&cfg.report.sections);
    let total = report::column_total(&rows, key);
    debug!(key, rows = rows.len(), total, "column total computed");
    Ok(total)
}
