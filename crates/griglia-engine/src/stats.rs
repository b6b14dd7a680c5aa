//! Per-application manipulation outcome statistics.
//!
//! Every dispatcher call records one attempt under the application
//! name and the resolved method. The counters later bias method
//! selection toward whatever has actually worked for that
//! application. Counts are unweighted; there is no recency decay.

use std::collections::HashMap;

use griglia_core::ManipulationMethod;

/// Attempt/success counters for one (application, method) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodCount {
    pub attempts: u32,
    pub successes: u32,
}

impl MethodCount {
    /// Success ratio; zero when nothing was attempted.
    pub fn rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            f64::from(self.successes) / f64::from(self.attempts)
        }
    }
}

/// Outcome counters keyed by application name, independent per
/// application.
#[derive(Debug, Clone, Default)]
pub struct OutcomeStatistics {
    by_app: HashMap<String, HashMap<ManipulationMethod, MethodCount>>,
}

impl OutcomeStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one attempt for `app` under `method`.
    pub fn record(&mut self, app: &str, method: ManipulationMethod, success: bool) {
        let count = self
            .by_app
            .entry(app.to_string())
            .or_default()
            .entry(method)
            .or_default();
        count.attempts += 1;
        if success {
            count.successes += 1;
        }
    }

    /// Counters for one (application, method) pair.
    pub fn count(&self, app: &str, method: ManipulationMethod) -> MethodCount {
        self.by_app
            .get(app)
            .and_then(|m| m.get(&method))
            .copied()
            .unwrap_or_default()
    }

    /// Total attempts recorded for an application across all methods.
    pub fn attempts(&self, app: &str) -> u32 {
        self.by_app
            .get(app)
            .map(|m| m.values().map(|c| c.attempts).sum())
            .unwrap_or(0)
    }

    /// The best-performing method for an application, if any outcome
    /// data exists.
    ///
    /// Highest success ratio wins; ties resolve in the fixed
    /// [`ManipulationMethod::ALL`] order so the result is
    /// deterministic.
    pub fn best_method(&self, app: &str) -> Option<ManipulationMethod> {
        let methods = self.by_app.get(app)?;
        let mut best: Option<(ManipulationMethod, f64)> = None;
        for method in ManipulationMethod::ALL {
            let Some(count) = methods.get(&method) else {
                continue;
            };
            if count.attempts == 0 {
                continue;
            }
            let rate = count.rate();
            if best.is_none_or(|(_, r)| rate > r) {
                best = Some((method, rate));
            }
        }
        best.map(|(m, _)| m)
    }
}
