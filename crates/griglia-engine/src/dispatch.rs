//! Manipulation strategy dispatch.
//!
//! Every public operation resolves to a boolean: transient failures
//! are absorbed by the paired fallback or the retry loop, and the
//! outcome is recorded into [`OutcomeStatistics`] under the owning
//! application name either way. Nothing here returns an error to the
//! caller.

use std::thread;
use std::time::Duration;

use griglia_core::patterns::{AppPattern, find_pattern};
use griglia_core::{
    ArrangeConfig, ManagedWindow, ManipulationMethod, Point, PrimaryBackend, Rect, ScriptBackend,
    ScriptCommand, Size,
};

use crate::stats::OutcomeStatistics;

/// Selects and executes manipulation methods against the two backend
/// channels.
pub struct Dispatcher<'a> {
    primary: &'a dyn PrimaryBackend,
    script: &'a dyn ScriptBackend,
    patterns: Vec<AppPattern>,
    stats: OutcomeStatistics,
    tuning: ArrangeConfig,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        primary: &'a dyn PrimaryBackend,
        script: &'a dyn ScriptBackend,
        patterns: Vec<AppPattern>,
        tuning: ArrangeConfig,
    ) -> Self {
        Self {
            primary,
            script,
            patterns,
            stats: OutcomeStatistics::new(),
            tuning,
        }
    }

    /// Accumulated outcome statistics.
    pub fn stats(&self) -> &OutcomeStatistics {
        &self.stats
    }

    /// Resolves the method to use for an application.
    ///
    /// Order: pattern-table override, then the statistically best
    /// method when outcome data exists, then the primary API.
    pub fn resolve_method(&self, app: &str) -> ManipulationMethod {
        if let Some(pattern) = find_pattern(&self.patterns, app)
            && let Some(method) = pattern.method
        {
            return method;
        }
        if let Some(method) = self.stats.best_method(app) {
            return method;
        }
        ManipulationMethod::PrimaryApi
    }

    /// Moves a window to `target`, recording the outcome.
    pub fn move_window(&mut self, window: &ManagedWindow, target: Point) -> bool {
        let method = self.resolve_method(&window.app);
        let ok = self.execute_move(window, target, method);
        self.stats.record(&window.app, method, ok);
        griglia_core::log_debug!(
            "move {:?} via {}: {}",
            window.title,
            method.as_str(),
            if ok { "ok" } else { "failed" }
        );
        ok
    }

    /// Resizes a window, recording the outcome.
    pub fn resize(&mut self, window: &ManagedWindow, size: Size) -> bool {
        let method = self.resolve_method(&window.app);
        let ok = self.execute_resize(window, size, method);
        self.stats.record(&window.app, method, ok);
        ok
    }

    /// Moves and resizes in one operation; success requires both.
    pub fn set_frame(&mut self, window: &ManagedWindow, frame: Rect) -> bool {
        self.set_frame_using(window, frame, None)
    }

    /// [`Self::set_frame`] with an explicit method, used by the
    /// classifier's workarounds. `None` falls back to normal
    /// resolution.
    pub fn set_frame_using(
        &mut self,
        window: &ManagedWindow,
        frame: Rect,
        method: Option<ManipulationMethod>,
    ) -> bool {
        let method = method.unwrap_or_else(|| self.resolve_method(&window.app));
        let moved = self.execute_move(window, frame.origin(), method);
        let resized = self.execute_resize(window, frame.size(), method);
        let ok = moved && resized;
        self.stats.record(&window.app, method, ok);
        griglia_core::log_debug!(
            "set_frame {:?} via {}: moved={} resized={}",
            window.title,
            method.as_str(),
            moved,
            resized
        );
        ok
    }

    /// Raises a window via the scripting channel.
    ///
    /// Activation through scripting is empirically more reliable than
    /// the primary raise, so no primary attempt is made.
    pub fn bring_to_front(&mut self, window: &ManagedWindow) -> bool {
        let ok = self
            .script
            .run(&window.app, &window.title, ScriptCommand::Raise)
            .unwrap_or(false);
        self.stats
            .record(&window.app, ManipulationMethod::ScriptingFallback, ok);
        ok
    }

    fn execute_move(&self, window: &ManagedWindow, target: Point, method: ManipulationMethod) -> bool {
        match method {
            ManipulationMethod::PrimaryApi => {
                self.primary_move(window, target) || self.script_move(window, target)
            }
            ManipulationMethod::ScriptingFallback => {
                self.script_move(window, target) || self.primary_move(window, target)
            }
            ManipulationMethod::PrimaryWithRetry => self.retry_move(window, target),
            ManipulationMethod::GradualMovement => self.gradual_move(window, target),
        }
    }

    fn execute_resize(&self, window: &ManagedWindow, size: Size, method: ManipulationMethod) -> bool {
        match method {
            ManipulationMethod::ScriptingFallback => {
                self.script_resize(window, size) || self.primary_resize(window, size)
            }
            // Retry and gradual are movement strategies; their resize
            // half takes the direct primary-with-fallback path.
            _ => self.primary_resize(window, size) || self.script_resize(window, size),
        }
    }

    fn primary_move(&self, window: &ManagedWindow, target: Point) -> bool {
        self.primary.set_position(window, target).is_ok()
    }

    fn script_move(&self, window: &ManagedWindow, target: Point) -> bool {
        self.script
            .run(&window.app, &window.title, ScriptCommand::SetPosition(target))
            .unwrap_or(false)
    }

    fn primary_resize(&self, window: &ManagedWindow, size: Size) -> bool {
        self.primary.set_size(window, size).is_ok()
    }

    fn script_resize(&self, window: &ManagedWindow, size: Size) -> bool {
        self.script
            .run(&window.app, &window.title, ScriptCommand::SetSize(size))
            .unwrap_or(false)
    }

    /// Up to `retry_attempts` primary attempts with a growing
    /// inter-attempt delay; the first success wins.
    fn retry_move(&self, window: &ManagedWindow, target: Point) -> bool {
        let attempts = self.tuning.retry_attempts.max(1);
        for attempt in 1..=attempts {
            if self.primary_move(window, target) {
                return true;
            }
            if attempt < attempts {
                pause(self.tuning.retry_base_delay_ms * u64::from(attempt));
            }
        }
        false
    }

    /// Interpolates from the current position to `target` in fixed
    /// steps, pausing between each.
    ///
    /// A failed intermediate step reverts to the last successfully
    /// applied position and reports failure, so the window never ends
    /// up in an undetermined spot. Completing all steps still requires
    /// the final position to verify within tolerance.
    fn gradual_move(&self, window: &ManagedWindow, target: Point) -> bool {
        let Ok(start) = self.primary.position(window) else {
            return false;
        };
        let steps = self.tuning.gradual_steps.max(1);
        let mut last_applied = start;
        for step in 1..=steps {
            let t = f64::from(step) / f64::from(steps);
            let next = Point::new(
                start.x + (target.x - start.x) * t,
                start.y + (target.y - start.y) * t,
            );
            if self.primary.set_position(window, next).is_err() {
                griglia_core::log_warn!(
                    "gradual move of {:?} failed at step {step}/{steps}, reverting",
                    window.title
                );
                let _ = self.primary.set_position(window, last_applied);
                return false;
            }
            last_applied = next;
            pause(self.tuning.gradual_step_delay_ms);
        }
        match self.primary.position(window) {
            Ok(got) => got.distance(&target) <= self.tuning.tolerance,
            Err(_) => false,
        }
    }
}

fn pause(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockPrimary, MockScript, fast_config, window};
    use griglia_core::patterns::default_patterns;
    use griglia_core::{ResistanceCategory, patterns::AppPattern};

    // ── method resolution ────────────────────────────────────────

    #[test]
    fn resolve_defaults_to_primary() {
        let primary = MockPrimary::new();
        let script = MockScript::new(true);
        let dispatcher = Dispatcher::new(&primary, &script, vec![], fast_config());
        assert_eq!(
            dispatcher.resolve_method("Anything"),
            ManipulationMethod::PrimaryApi
        );
    }

    #[test]
    fn resolve_prefers_pattern_override() {
        let primary = MockPrimary::new();
        let script = MockScript::new(true);
        let dispatcher =
            Dispatcher::new(&primary, &script, default_patterns(), fast_config());
        assert_eq!(
            dispatcher.resolve_method("Citrix Viewer"),
            ManipulationMethod::ScriptingFallback
        );
    }

    #[test]
    fn resolve_uses_statistics_without_override() {
        // Arrange — teach the dispatcher that scripting works and the
        // primary does not.
        let primary = MockPrimary::new();
        let script = MockScript::new(true);
        let mut dispatcher = Dispatcher::new(&primary, &script, vec![], fast_config());
        dispatcher.stats.record("Slow App", ManipulationMethod::PrimaryApi, false);
        dispatcher
            .stats
            .record("Slow App", ManipulationMethod::ScriptingFallback, true);

        // Act / Assert
        assert_eq!(
            dispatcher.resolve_method("Slow App"),
            ManipulationMethod::ScriptingFallback
        );
    }

    // ── move with fallback ───────────────────────────────────────

    #[test]
    fn primary_failure_falls_back_to_script_and_records_success() {
        // Arrange
        let mut primary = MockPrimary::new();
        primary.fail_all_moves = true;
        let script = MockScript::new(true);
        let mut dispatcher = Dispatcher::new(&primary, &script, vec![], fast_config());
        let w = window(1, "App", 0.0, 0.0);

        // Act
        let ok = dispatcher.move_window(&w, Point::new(100.0, 100.0));

        // Assert — overall success, recorded as success for the app.
        assert!(ok);
        let count = dispatcher.stats().count("App", ManipulationMethod::PrimaryApi);
        assert_eq!(count.attempts, 1);
        assert_eq!(count.successes, 1);
        assert_eq!(
            script.commands(),
            vec![ScriptCommand::SetPosition(Point::new(100.0, 100.0))]
        );
    }

    #[test]
    fn both_channels_failing_records_failure() {
        let mut primary = MockPrimary::new();
        primary.fail_all_moves = true;
        let script = MockScript::new(false);
        let mut dispatcher = Dispatcher::new(&primary, &script, vec![], fast_config());
        let w = window(1, "App", 0.0, 0.0);

        assert!(!dispatcher.move_window(&w, Point::new(100.0, 100.0)));
        let count = dispatcher.stats().count("App", ManipulationMethod::PrimaryApi);
        assert_eq!(count.attempts, 1);
        assert_eq!(count.successes, 0);
    }

    #[test]
    fn scripting_method_tries_script_first() {
        let primary = MockPrimary::new();
        let script = MockScript::new(true);
        let patterns = vec![AppPattern {
            app: "App".into(),
            category: ResistanceCategory::ApplicationLocked,
            method: Some(ManipulationMethod::ScriptingFallback),
            note: String::new(),
        }];
        let mut dispatcher = Dispatcher::new(&primary, &script, patterns, fast_config());
        let w = window(1, "App", 0.0, 0.0);

        assert!(dispatcher.move_window(&w, Point::new(50.0, 50.0)));
        // The primary channel was never touched.
        assert_eq!(primary.move_attempts(), 0);
        assert_eq!(script.log.borrow().len(), 1);
    }

    // ── retry ────────────────────────────────────────────────────

    #[test]
    fn retry_stops_on_first_success() {
        // Arrange — first two primary calls fail, the third lands.
        let mut primary = MockPrimary::new();
        primary.fail_calls = vec![1, 2];
        let script = MockScript::new(false);
        let patterns = vec![AppPattern {
            app: "App".into(),
            category: ResistanceCategory::None,
            method: Some(ManipulationMethod::PrimaryWithRetry),
            note: String::new(),
        }];
        let mut dispatcher = Dispatcher::new(&primary, &script, patterns, fast_config());
        let w = window(1, "App", 0.0, 0.0);

        // Act
        let ok = dispatcher.move_window(&w, Point::new(10.0, 20.0));

        // Assert
        assert!(ok);
        assert_eq!(primary.move_attempts(), 3);
        assert_eq!(primary.position_of(1), Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn retry_gives_up_after_all_attempts() {
        let mut primary = MockPrimary::new();
        primary.fail_all_moves = true;
        let script = MockScript::new(false);
        let patterns = vec![AppPattern {
            app: "App".into(),
            category: ResistanceCategory::None,
            method: Some(ManipulationMethod::PrimaryWithRetry),
            note: String::new(),
        }];
        let mut dispatcher = Dispatcher::new(&primary, &script, patterns, fast_config());
        let w = window(1, "App", 0.0, 0.0);

        assert!(!dispatcher.move_window(&w, Point::new(10.0, 20.0)));
        assert_eq!(primary.move_attempts(), 3);
    }

    // ── gradual movement ─────────────────────────────────────────

    fn gradual_patterns() -> Vec<AppPattern> {
        vec![AppPattern {
            app: "App".into(),
            category: ResistanceCategory::None,
            method: Some(ManipulationMethod::GradualMovement),
            note: String::new(),
        }]
    }

    #[test]
    fn gradual_walks_to_target_and_verifies() {
        // Arrange
        let primary = MockPrimary::new();
        let script = MockScript::new(false);
        let mut dispatcher =
            Dispatcher::new(&primary, &script, gradual_patterns(), fast_config());
        let w = window(1, "App", 0.0, 0.0);

        // Act
        let ok = dispatcher.move_window(&w, Point::new(100.0, 200.0));

        // Assert — ten interpolation steps, final position on target.
        assert!(ok);
        assert_eq!(primary.move_log.borrow().len(), 10);
        assert_eq!(primary.position_of(1), Some(Point::new(100.0, 200.0)));
    }

    #[test]
    fn gradual_failure_reverts_to_last_applied_step() {
        // Arrange — steps 1–2 land, step 3 is rejected.
        let mut primary = MockPrimary::new();
        primary.fail_calls = vec![3];
        let script = MockScript::new(false);
        let mut dispatcher =
            Dispatcher::new(&primary, &script, gradual_patterns(), fast_config());
        let w = window(1, "App", 0.0, 0.0);

        // Act
        let ok = dispatcher.move_window(&w, Point::new(100.0, 0.0));

        // Assert — failure, and the window sits at step 2 (x = 20),
        // not somewhere undetermined.
        assert!(!ok);
        assert_eq!(primary.position_of(1), Some(Point::new(20.0, 0.0)));
        let count = dispatcher
            .stats()
            .count("App", ManipulationMethod::GradualMovement);
        assert_eq!(count.successes, 0);
    }

    // ── set_frame / bring_to_front ───────────────────────────────

    #[test]
    fn set_frame_requires_both_halves() {
        // Arrange — moves work, resizes fail on both channels.
        let mut primary = MockPrimary::new();
        primary.fail_all_resizes = true;
        let script = MockScript::new(false);
        let mut dispatcher = Dispatcher::new(&primary, &script, vec![], fast_config());
        let w = window(1, "App", 0.0, 0.0);

        // Act
        let ok = dispatcher.set_frame(&w, Rect::new(10.0, 10.0, 500.0, 400.0));

        // Assert
        assert!(!ok);
        let count = dispatcher.stats().count("App", ManipulationMethod::PrimaryApi);
        assert_eq!(count.attempts, 1);
        assert_eq!(count.successes, 0);
    }

    #[test]
    fn set_frame_applies_position_and_size() {
        let primary = MockPrimary::new();
        let script = MockScript::new(false);
        let mut dispatcher = Dispatcher::new(&primary, &script, vec![], fast_config());
        let w = window(1, "App", 0.0, 0.0);

        assert!(dispatcher.set_frame(&w, Rect::new(10.0, 10.0, 500.0, 400.0)));
        assert_eq!(primary.position_of(1), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn bring_to_front_uses_script_only() {
        let primary = MockPrimary::new();
        let script = MockScript::new(true);
        let mut dispatcher = Dispatcher::new(&primary, &script, vec![], fast_config());
        let w = window(1, "App", 0.0, 0.0);

        assert!(dispatcher.bring_to_front(&w));
        assert_eq!(script.commands(), vec![ScriptCommand::Raise]);
        assert!(primary.raise_log.borrow().is_empty());
    }
}
