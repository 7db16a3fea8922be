use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a report may live under a job project directory.
const REPORT_CANDIDATES: &[&str] = &[
    "report.json",
    "report/report.json",
    "resources/data/report.js",
    "report/resources/data/report.js",
];

static JS_ASSIGNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:(?:var|let|const)\s+)?[A-Za-z_$][A-Za-z0-9_$.]*\s*=\s*")
        .expect("valid js assignment regex")
});

pub fn resolve_report_path(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if !path.exists() {
        bail!("report not found: {}", path.display());
    }

    REPORT_CANDIDATES
        .iter()
        .map(|candidate| path.join(candidate))
        .find(|candidate| candidate.is_file())
        .with_context(|| {
            format!(
                "no report file in {} (looked for {})",
                path.display(),
                REPORT_CANDIDATES.join(", ")
            )
        })
}

pub fn read_report_text(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading report {}", path.display()))?;
    Ok(strip_js_assignment(&content).to_string())
}

/// Turns `jsondata = {...};` into `{...}`. Plain JSON passes through untouched.
pub fn strip_js_assignment(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }

    match JS_ASSIGNMENT_RE.find(trimmed) {
        Some(m) => trimmed[m.end()..].trim_end().trim_end_matches(';').trim_end(),
        None => trimmed,
    }
}
