use crate::config::{FailOn, FieldsConfig};
use crate::core::counters::Counters;
use crate::core::score::{self, Breakdown, Policy, Slice, Verdict, WeightProfile};
use crate::utils::fs as fs_utils;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

const BAR_WIDTH: usize = 40;

/// Section name used when the whole document is a bare array of rows.
pub const ROOT_SECTION: &str = ".";

#[derive(Debug, Clone)]
pub struct ReportDocument {
    root: Value,
}

impl ReportDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let resolved = fs_utils::resolve_report_path(path)?;
        let text = fs_utils::read_report_text(&resolved)?;
        let document = Self::parse(&text)
            .with_context(|| format!("failed parsing report {}", resolved.display()))?;
        info!(path = %resolved.display(), "report loaded");
        Ok(document)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let root = serde_json::from_str(text).context("report is not valid JSON")?;
        Ok(Self { root })
    }

    pub fn project_name(&self) -> Option<&str> {
        self.root.get("project_name").and_then(Value::as_str)
    }

    pub fn rows<'a>(&'a self, sections: &'a [String]) -> Vec<ReportRow<'a>> {
        if let Value::Array(items) = &self.root {
            return object_rows(ROOT_SECTION, items);
        }

        let mut rows = Vec::new();
        for section in sections {
            match lookup(&self.root, section) {
                Some(Value::Array(items)) => rows.extend(object_rows(section, items)),
                Some(_) => debug!(section = %section, "section is not a list of rows, skipped"),
                None => debug!(section = %section, "section missing from report"),
            }
        }
        rows
    }
}

fn lookup<'a>(root: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .filter(|part| !part.is_empty())
        .try_fold(root, |node, part| node.get(part))
}

fn object_rows<'a>(section: &'a str, items: &'a [Value]) -> Vec<ReportRow<'a>> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|fields| ReportRow { section, fields })
        .collect()
}

/// One read-only row of the report document.
#[derive(Debug, Clone, Copy)]
pub struct ReportRow<'a> {
    pub section: &'a str,
    pub fields: &'a Map<String, Value>,
}

impl<'a> ReportRow<'a> {
    pub fn name(&self) -> Option<&'a str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn count(&self, key: &str) -> Option<u64> {
        self.fields.get(key).map(count_value)
    }

    /// Events carried by this row. Absent categories count as zero.
    pub fn events(&self, fields: &FieldsConfig) -> Counters {
        Counters::new(
            self.first_count(&fields.success),
            self.first_count(&fields.info),
            self.first_count(&fields.warning),
            self.first_count(&fields.error),
        )
    }

    fn first_count(&self, aliases: &[String]) -> u64 {
        aliases
            .iter()
            .find_map(|alias| self.count(alias))
            .unwrap_or(0)
    }
}

fn count_value(value: &Value) -> u64 {
    match value {
        Value::Bool(true) => 1,
        Value::Number(number) => number.as_u64().unwrap_or_else(|| {
            number
                .as_f64()
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(|v| v.trunc() as u64)
                .unwrap_or(0)
        }),
        _ => 0,
    }
}

/// Sum of the raw numeric `key` over every row carrying it. Fractions and
/// negative values are kept, `true` adds one, other values are skipped.
pub fn column_total(rows: &[ReportRow<'_>], key: &str) -> f64 {
    rows.iter()
        .filter_map(|row| match row.fields.get(key)? {
            Value::Number(number) => number.as_f64(),
            Value::Bool(true) => Some(1.0),
            _ => None,
        })
        .sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct TaggedRow {
    pub id: u64,
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub events: Counters,
}

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone)]
pub struct FinalSummary {
    pub project: Option<String>,
    pub policy: Policy,
    pub weights: WeightProfile,
    pub counters: Counters,
    pub breakdown: Breakdown,
    pub verdict: Verdict,
    pub rows: Vec<TaggedRow>,
    pub chart_updates: usize,
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub policy: Policy,
    pub weights: WeightProfile,
    pub verdict: Verdict,
    pub counters: Counters,
    pub breakdown: Breakdown,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<TaggedRow>,
    pub ok: bool,
}

impl JsonSummary {
    pub fn from_summary(summary: &FinalSummary, with_rows: bool) -> Self {
        Self {
            project: summary.project.clone(),
            policy: summary.policy,
            weights: summary.weights,
            verdict: summary.verdict,
            counters: summary.counters,
            breakdown: summary.breakdown.clone(),
            rows: if with_rows {
                summary.rows.clone()
            } else {
                Vec::new()
            },
            ok: summary.exit.ok,
        }
    }
}

pub fn evaluate_exit(counters: &Counters, fail_on: FailOn) -> ExitStatus {
    let mut reasons = Vec::new();

    let errors_fail = matches!(fail_on, FailOn::Error | FailOn::Warning);
    if errors_fail && counters.error > 0 {
        reasons.push(format!("{} error(s) recorded", counters.error));
    }
    if fail_on == FailOn::Warning && counters.warning > 0 {
        reasons.push(format!("{} warning(s) recorded", counters.warning));
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

pub fn print_human(summary: &FinalSummary, show_rows: bool) {
    let headline = score::label_for_verdict(summary.verdict);
    let headline = match summary.verdict {
        Verdict::Failed => headline.red().bold(),
        Verdict::Degraded => headline.yellow().bold(),
        Verdict::Healthy => headline.green().bold(),
        Verdict::Empty => headline.dimmed(),
    };
    println!("Anonymization Health: {} (policy: {})", headline, summary.policy);
    if let Some(project) = &summary.project {
        println!("project: {}", project);
    }

    println!();
    for slice in summary.breakdown.slices() {
        if summary.breakdown.is_failure() && slice.value == 0 {
            continue;
        }
        println!("{}", render_slice(slice));
    }

    let c = &summary.counters;
    println!();
    println!(
        "events: {} success, {} info, {} warning, {} error across {} row(s)",
        c.success,
        c.info,
        c.warning,
        c.error,
        summary.rows.len()
    );

    if show_rows && !summary.rows.is_empty() {
        println!();
        for row in &summary.rows {
            let e = &row.events;
            println!(
                "#{:<4} {}/{}  success={} info={} warning={} error={}",
                row.id,
                row.section,
                row.name.as_deref().unwrap_or("-"),
                e.success,
                e.info,
                e.warning,
                e.error
            );
        }
    }

    println!();
    if summary.exit.ok {
        println!("exit: OK");
    } else {
        println!("exit: FAILED ({})", summary.exit.reason_line());
    }
}

fn render_slice(slice: &Slice) -> String {
    let filled = usize::from(slice.value) * BAR_WIDTH / 100;
    let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));
    let bar = match slice.label {
        score::SUCCESS_LABEL => bar.as_str().green(),
        score::INFO_LABEL => bar.as_str().blue(),
        score::WARNING_LABEL => bar.as_str().yellow(),
        _ => bar.as_str().red(),
    };
    format!("{:<22} {} {:>3}%", slice.label, bar, slice.value)
}
