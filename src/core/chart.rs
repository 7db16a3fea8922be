use crate::core::score::Breakdown;

/// Receives every recomputed breakdown of a health session.
pub trait ChartAdapter {
    fn set_data(&mut self, breakdown: &Breakdown);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoChart;

impl ChartAdapter for NoChart {
    fn set_data(&mut self, _breakdown: &Breakdown) {}
}

/// Keeps the last breakdown it was handed, for rendering once folding is done.
#[derive(Debug, Clone)]
pub struct SnapshotChart {
    latest: Breakdown,
    updates: usize,
}

impl Default for SnapshotChart {
    fn default() -> Self {
        Self {
            latest: Breakdown::empty(),
            updates: 0,
        }
    }
}

impl SnapshotChart {
    pub fn latest(&self) -> &Breakdown {
        &self.latest
    }

    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl ChartAdapter for SnapshotChart {
    fn set_data(&mut self, breakdown: &Breakdown) {
        self.latest = breakdown.clone();
        self.updates += 1;
    }
}
