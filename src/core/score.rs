use crate::core::counters::Counters;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SUCCESS_LABEL: &str = "Success";
pub const INFO_LABEL: &str = "Infos";
pub const WARNING_LABEL: &str = "Warnings";
pub const FAILURE_LABEL: &str = "Anonymization failed";

/// Named scoring strategy, picked once per report view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// A single warning outweighs a hundred successes.
    #[default]
    Severity,
    /// Plain proportional split.
    Equal,
}

impl Policy {
    pub fn weights(self) -> WeightProfile {
        match self {
            Self::Severity => WeightProfile {
                success: 1.0,
                info: 0.1,
                warning: 100.0,
            },
            Self::Equal => WeightProfile {
                success: 1.0,
                info: 1.0,
                warning: 1.0,
            },
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Severity => write!(f, "severity"),
            Self::Equal => write!(f, "equal"),
        }
    }
}

/// Per-category multipliers. Errors never enter the weighted total.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightProfile {
    pub success: f64,
    pub info: f64,
    pub warning: f64,
}

impl Default for WeightProfile {
    fn default() -> Self {
        Policy::default().weights()
    }
}

impl WeightProfile {
    pub fn is_valid(&self) -> bool {
        [self.success, self.info, self.warning]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Slice {
    pub label: &'static str,
    pub value: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<u8>,
}

impl Slice {
    fn new(label: &'static str, value: u8) -> Self {
        Self {
            label,
            value,
            data: Some(value),
        }
    }
}

/// Ordered slices handed to a chart.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Breakdown(Vec<Slice>);

impl Breakdown {
    pub fn empty() -> Self {
        Self(vec![
            Slice::new(SUCCESS_LABEL, 0),
            Slice::new(INFO_LABEL, 0),
            Slice::new(WARNING_LABEL, 0),
        ])
    }

    pub fn failure() -> Self {
        Self(vec![
            Slice::new(FAILURE_LABEL, 0),
            Slice::new(FAILURE_LABEL, 0),
            Slice::new(FAILURE_LABEL, 0),
            Slice::new(FAILURE_LABEL, 100),
        ])
    }

    pub fn slices(&self) -> &[Slice] {
        &self.0
    }

    pub fn values(&self) -> Vec<u8> {
        self.0.iter().map(|slice| slice.value).collect()
    }

    pub fn is_failure(&self) -> bool {
        self.0.len() == 4 && self.0.iter().all(|slice| slice.label == FAILURE_LABEL)
    }
}

pub fn calculate_breakdown(counters: &Counters, weights: &WeightProfile) -> Breakdown {
    if counters.has_errors() {
        return Breakdown::failure();
    }

    let (mut success, mut info, mut warning) = weighted(counters, weights, 1.0);
    let mut total = success + info + warning;

    if total.is_infinite() {
        // Huge weights overflow the total; shares only depend on weight ratios.
        let scale = weights.success.max(weights.info).max(weights.warning);
        (success, info, warning) = weighted(counters, weights, scale);
        total = success + info + warning;
    }

    if !(total.is_finite() && total > 0.0) {
        return Breakdown::empty();
    }

    Breakdown(vec![
        Slice::new(SUCCESS_LABEL, percent(success, total)),
        Slice::new(INFO_LABEL, percent(info, total)),
        Slice::new(WARNING_LABEL, percent(warning, total)),
    ])
}

fn weighted(counters: &Counters, weights: &WeightProfile, scale: f64) -> (f64, f64, f64) {
    (
        weights.success / scale * counters.success as f64,
        weights.info / scale * counters.info as f64,
        weights.warning / scale * counters.warning as f64,
    )
}

fn percent(weighted: f64, total: f64) -> u8 {
    (weighted / total * 100.0).round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Failed,
    Degraded,
    Healthy,
    Empty,
}

pub fn verdict_for(counters: &Counters) -> Verdict {
    if counters.error > 0 {
        Verdict::Failed
    } else if counters.warning > 0 {
        Verdict::Degraded
    } else if counters.success > 0 || counters.info > 0 {
        Verdict::Healthy
    } else {
        Verdict::Empty
    }
}

pub fn label_for_verdict(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Failed => "Anonymization failed",
        Verdict::Degraded => "Completed with warnings",
        Verdict::Healthy => "Anonymization succeeded",
        Verdict::Empty => "Nothing processed",
    }
}
