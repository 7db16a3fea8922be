use serde::Serialize;

/// Running event totals for one report view. Values only ever grow.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Counters {
    pub success: u64,
    pub info: u64,
    pub warning: u64,
    pub error: u64,
}

impl Counters {
    pub fn new(success: u64, info: u64, warning: u64, error: u64) -> Self {
        Self {
            success,
            info,
            warning,
            error,
        }
    }

    pub fn add(&mut self, delta: Counters) {
        self.success = self.success.saturating_add(delta.success);
        self.info = self.info.saturating_add(delta.info);
        self.warning = self.warning.saturating_add(delta.warning);
        self.error = self.error.saturating_add(delta.error);
    }

    pub fn has_errors(&self) -> bool {
        self.error > 0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}
