//! Resistance classification.
//!
//! When a window refuses control, the classifier works out why,
//! moving from cheap static checks to a live 1-unit probe only when
//! nothing else explains the behavior. The resulting profile either
//! carries a workaround or tells the caller the condition needs user
//! action (permission grants, leaving fullscreen) and must not be
//! retried automatically.

use std::thread;
use std::time::Duration;

use griglia_core::patterns::{AppPattern, find_pattern};
use griglia_core::screen::screen_containing;
use griglia_core::{
    ArrangeConfig, ManagedWindow, ManipulationMethod, Point, PrimaryBackend, Rect,
    ResistanceCategory, Screen, ScriptBackend, ScriptCommand,
};

use crate::dispatch::Dispatcher;

/// Process-name prefixes that mark windows as system-owned.
const SYSTEM_PREFIXES: &[&str] = &[
    "com.apple.",
    "WindowServer",
    "Dock",
    "SystemUIServer",
    "Control Center",
    "Notification Center",
];

/// Windows parked this far below the origin are minimized.
const MINIMIZED_Y: f64 = -1000.0;

/// Diagnosis of a window's manipulability.
#[derive(Debug, Clone, PartialEq)]
pub struct ResistanceProfile {
    pub category: ResistanceCategory,
    pub moveable: bool,
    pub resizable: bool,
    /// Method worth trying, when one is known.
    pub suggested: Option<ManipulationMethod>,
    /// Human-readable explanation for diagnostics.
    pub details: String,
}

impl ResistanceProfile {
    fn new(category: ResistanceCategory, details: impl Into<String>) -> Self {
        Self {
            category,
            moveable: category == ResistanceCategory::None,
            resizable: category == ResistanceCategory::None,
            suggested: None,
            details: details.into(),
        }
    }

    fn suggest(mut self, method: ManipulationMethod) -> Self {
        self.suggested = Some(method);
        self
    }
}

/// Outcome of a workaround attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkaroundOutcome {
    /// The workaround ran and the window reached its target.
    Applied,
    /// The workaround ran but the placement still failed.
    Failed,
    /// No automatic workaround exists; the user must resolve the
    /// underlying condition first.
    Unrecoverable,
}

/// Probes windows and categorizes why they resist control.
pub struct Classifier<'a> {
    primary: &'a dyn PrimaryBackend,
    script: &'a dyn ScriptBackend,
    patterns: Vec<AppPattern>,
    tuning: ArrangeConfig,
}

impl<'a> Classifier<'a> {
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
            tuning,
        }
    }

    /// Diagnoses why `window` resists manipulation.
    ///
    /// Checks run in precedence order; the first conclusive one wins.
    /// The live probe at the end displaces the window by one unit and
    /// restores it, so a healthy window is classified as
    /// [`ResistanceCategory::None`] without visible disturbance.
    pub fn analyze(&self, window: &ManagedWindow, screens: &[Screen]) -> ResistanceProfile {
        // 1. Known-application pattern short-circuits everything.
        if let Some(pattern) = find_pattern(&self.patterns, &window.app) {
            let mut profile =
                ResistanceProfile::new(pattern.category, pattern.note.clone());
            profile.suggested = pattern.method;
            return profile;
        }

        // 2. Without control permission nothing below can work.
        if !self.primary.has_permission() {
            return ResistanceProfile::new(
                ResistanceCategory::PermissionDenied,
                "the manipulation backend lacks control permission",
            );
        }

        // 3. Both capability flags reported off means the app locks
        // its frames. A query error is not a report: an unreachable
        // window errs here too, and must fall through to the
        // reachability checks instead of reading as locked.
        let can_pos = self.primary.can_set_position(window);
        let can_size = self.primary.can_set_size(window);
        if matches!(can_pos, Ok(false)) && matches!(can_size, Ok(false)) {
            return ResistanceProfile::new(
                ResistanceCategory::ApplicationLocked,
                "position and size attributes are both read-only",
            );
        }

        // 4./5. Reachability.
        let position = self.primary.position(window);
        if position.is_err() {
            if self.script.window_exists(&window.app, &window.title) {
                return ResistanceProfile::new(
                    ResistanceCategory::ApplicationLocked,
                    "window unreachable via the primary API but visible to scripting",
                )
                .suggest(ManipulationMethod::ScriptingFallback);
            }
            return ResistanceProfile::new(
                ResistanceCategory::Unknown,
                "window unreachable via any backend",
            );
        }

        // 6. Structural heuristics.
        if SYSTEM_PREFIXES.iter().any(|p| window.app.starts_with(p)) {
            return ResistanceProfile::new(
                ResistanceCategory::SystemWindow,
                "owned by a system process",
            );
        }
        if screens.iter().any(|s| s.frame == window.bounds) {
            return ResistanceProfile::new(
                ResistanceCategory::FullScreen,
                "bounds exactly match a display frame",
            );
        }
        if window.bounds.y < MINIMIZED_Y {
            return ResistanceProfile::new(
                ResistanceCategory::Minimized,
                "parked far off screen, typical of a minimized window",
            );
        }

        // 7. Live probe: one unit over and back.
        self.probe(
            window,
            position.unwrap_or_default(),
            can_size.unwrap_or(true),
            screens,
        )
    }

    fn probe(
        &self,
        window: &ManagedWindow,
        origin: Point,
        can_size: bool,
        screens: &[Screen],
    ) -> ResistanceProfile {
        let nudged = Point::new(origin.x + 1.0, origin.y);
        if self.primary.set_position(window, nudged).is_ok() {
            if self.primary.set_position(window, origin).is_err() {
                griglia_core::log_warn!(
                    "probe of {:?} moved but could not restore the original position",
                    window.title
                );
            }
            let mut profile =
                ResistanceProfile::new(ResistanceCategory::None, "accepts manipulation");
            profile.resizable = can_size;
            return profile;
        }

        let near_edge = screen_containing(screens, &window.bounds.center())
            .is_some_and(|s| s.edge_distance(&window.bounds) <= self.tuning.boundary_threshold);
        if near_edge {
            ResistanceProfile::new(
                ResistanceCategory::BoundaryLock,
                "rejects moves while pinned near a display edge",
            )
        } else {
            ResistanceProfile::new(
                ResistanceCategory::Unknown,
                "rejects moves for no determinable reason",
            )
        }
    }

    /// Attempts the workaround matching a profile, placing the window
    /// at `target` when one exists.
    pub fn apply_workaround(
        &self,
        dispatcher: &mut Dispatcher<'_>,
        window: &ManagedWindow,
        profile: &ResistanceProfile,
        target: Rect,
        screens: &[Screen],
    ) -> WorkaroundOutcome {
        if profile.category.needs_user_action() {
            return WorkaroundOutcome::Unrecoverable;
        }
        match profile.category {
            ResistanceCategory::None
            | ResistanceCategory::ApplicationLocked
            | ResistanceCategory::Unknown => {
                applied(dispatcher.set_frame_using(window, target, profile.suggested))
            }
            ResistanceCategory::Minimized => {
                let restored = self
                    .script
                    .run(&window.app, &window.title, ScriptCommand::Restore)
                    .unwrap_or(false);
                if !restored {
                    return WorkaroundOutcome::Unrecoverable;
                }
                // Give the application a moment to finish the restore
                // animation before issuing the placement.
                pause(self.tuning.settle_delay_ms);
                applied(dispatcher.set_frame_using(window, target, profile.suggested))
            }
            ResistanceCategory::BoundaryLock => {
                let interior = screen_containing(screens, &window.bounds.center())
                    .map(|s| s.usable)
                    .unwrap_or(target);
                let clamped = target.clamped_into(&interior);
                applied(dispatcher.set_frame_using(window, clamped, profile.suggested))
            }
            // Covered by the needs_user_action gate above.
            ResistanceCategory::PermissionDenied
            | ResistanceCategory::FullScreen
            | ResistanceCategory::SystemWindow => WorkaroundOutcome::Unrecoverable,
        }
    }
}

fn applied(ok: bool) -> WorkaroundOutcome {
    if ok {
        WorkaroundOutcome::Applied
    } else {
        WorkaroundOutcome::Failed
    }
}

fn pause(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}
