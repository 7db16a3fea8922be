use crate::core::chart::{ChartAdapter, NoChart};
use crate::core::counters::Counters;
use crate::core::ids::IdGenerator;
use crate::core::score::{self, Breakdown, WeightProfile};
use tracing::{debug, warn};

/// Per-view health state: counters, the derived breakdown, and the chart fed from it.
///
/// Every [`HealthSummary::increment`] recomputes the breakdown and pushes it to the
/// chart before returning, so readers never observe counters and breakdown out of sync.
#[derive(Debug)]
pub struct HealthSummary<C: ChartAdapter = NoChart> {
    counters: Counters,
    weights: WeightProfile,
    breakdown: Breakdown,
    ids: IdGenerator,
    chart: C,
}

impl HealthSummary<NoChart> {
    pub fn new(weights: WeightProfile) -> Self {
        Self::with_chart(weights, NoChart)
    }
}

impl<C: ChartAdapter> HealthSummary<C> {
    pub fn with_chart(weights: WeightProfile, mut chart: C) -> Self {
        let counters = Counters::default();
        let breakdown = score::calculate_breakdown(&counters, &weights);
        chart.set_data(&breakdown);

        Self {
            counters,
            weights,
            breakdown,
            ids: IdGenerator::new(),
            chart,
        }
    }

    pub fn increment(&mut self, success: u64, info: u64, warning: u64, error: u64) -> &Breakdown {
        self.add(Counters::new(success, info, warning, error))
    }

    pub fn add(&mut self, delta: Counters) -> &Breakdown {
        let was_failed = self.counters.has_errors();
        self.counters.add(delta);

        self.breakdown = score::calculate_breakdown(&self.counters, &self.weights);
        debug!(
            success = self.counters.success,
            info = self.counters.info,
            warning = self.counters.warning,
            error = self.counters.error,
            values = ?self.breakdown.values(),
            "breakdown recomputed"
        );
        if !was_failed && self.counters.has_errors() {
            warn!(errors = self.counters.error, "error recorded, health summary overridden");
        }

        self.chart.set_data(&self.breakdown);
        &self.breakdown
    }

    pub fn next_id(&mut self) -> u64 {
        self.ids.next_id()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn breakdown(&self) -> &Breakdown {
        &self.breakdown
    }

    pub fn weights(&self) -> &WeightProfile {
        &self.weights
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn is_failed(&self) -> bool {
        self.counters.has_errors()
    }

    pub fn into_chart(self) -> C {
        self.chart
    }
}
