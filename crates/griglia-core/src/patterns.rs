//! Known-application resistance patterns.
//!
//! Some applications are known ahead of time to resist programmatic
//! positioning in a particular way. The pattern table maps an
//! application name to a fixed category, a preferred manipulation
//! method, and a human-readable explanation. Both the dispatcher and
//! the classifier consult it before doing any live probing.

use serde::{Deserialize, Serialize};

use crate::ManipulationMethod;

/// Why a window resists manipulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResistanceCategory {
    /// The window accepts manipulation normally.
    None,
    /// The manipulation backend lacks control permission.
    PermissionDenied,
    /// The application rejects position and size writes.
    ApplicationLocked,
    /// The window occupies a display's full frame.
    FullScreen,
    /// The window is pinned near a display edge and snaps back.
    BoundaryLock,
    /// The window is minimized and must be restored first.
    Minimized,
    /// The window belongs to a system process and must not be moved.
    SystemWindow,
    /// The window resists for reasons the probes could not determine.
    Unknown,
}

impl ResistanceCategory {
    /// Whether the condition can only be cleared by the user, such as
    /// granting a permission or leaving fullscreen.
    pub fn needs_user_action(self) -> bool {
        matches!(
            self,
            Self::PermissionDenied | Self::FullScreen | Self::SystemWindow
        )
    }
}

/// A fixed entry for one known-difficult application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPattern {
    /// Application name (case-insensitive exact match).
    pub app: String,
    /// Resistance category to report without probing.
    pub category: ResistanceCategory,
    /// Preferred manipulation method, if one is known to work.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<ManipulationMethod>,
    /// Human-readable explanation shown in diagnostics.
    pub note: String,
}

/// Built-in patterns for applications known to misbehave.
pub fn default_patterns() -> Vec<AppPattern> {
    vec![
        AppPattern {
            app: "Citrix Viewer".into(),
            category: ResistanceCategory::ApplicationLocked,
            method: Some(ManipulationMethod::ScriptingFallback),
            note: "remote session frames ignore native position writes".into(),
        },
        AppPattern {
            app: "VMware Fusion".into(),
            category: ResistanceCategory::ApplicationLocked,
            method: Some(ManipulationMethod::GradualMovement),
            note: "guest display windows only honor small position deltas".into(),
        },
        AppPattern {
            app: "zoom.us".into(),
            category: ResistanceCategory::None,
            method: Some(ManipulationMethod::PrimaryWithRetry),
            note: "meeting windows reposition themselves once after a move".into(),
        },
    ]
}

/// Finds the pattern for an application, if one exists.
pub fn find_pattern<'a>(patterns: &'a [AppPattern], app: &str) -> Option<&'a AppPattern> {
    patterns.iter().find(|p| p.app.eq_ignore_ascii_case(app))
}
