//! Backend trait contracts.
//!
//! The engine does not talk to any windowing system itself. Callers
//! supply two channels: a primary API (typically the platform's
//! accessibility interface) and a scripting fallback that addresses
//! windows by application name and title. The engine consumes these
//! contracts; platform crates implement them.

use crate::{ManagedWindow, Point, Result, Size};

/// The primary manipulation channel.
///
/// Implementations re-locate the window behind a [`ManagedWindow`]
/// using title → position-proximity → single-window resolution
/// ([`crate::window::resolve_window`] implements the shared rules) and
/// return [`crate::Error::Unreachable`] when no candidate is found.
pub trait PrimaryBackend {
    /// Whether the process holds the control permission required to
    /// manipulate other applications' windows.
    fn has_permission(&self) -> bool;

    fn position(&self, window: &ManagedWindow) -> Result<Point>;

    fn set_position(&self, window: &ManagedWindow, position: Point) -> Result<()>;

    fn size(&self, window: &ManagedWindow) -> Result<Size>;

    fn set_size(&self, window: &ManagedWindow, size: Size) -> Result<()>;

    /// Whether the window reports its position attribute as settable.
    fn can_set_position(&self, window: &ManagedWindow) -> Result<bool>;

    /// Whether the window reports its size attribute as settable.
    fn can_set_size(&self, window: &ManagedWindow) -> Result<bool>;

    /// Raises the window to the front of its application.
    fn raise(&self, window: &ManagedWindow) -> Result<()>;
}

/// A window-manipulation command delivered over the scripting channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptCommand {
    SetPosition(Point),
    SetSize(Size),
    /// Raise the window and activate its application.
    Raise,
    /// Restore a minimized window.
    Restore,
}

/// The scripting fallback channel.
///
/// Commands are scoped to an application name plus window title; when
/// the exact title lookup fails, implementations retry against the
/// first window of the process. The returned boolean reports whether
/// the command took effect.
pub trait ScriptBackend {
    fn run(&self, app: &str, title: &str, command: ScriptCommand) -> Result<bool>;

    /// Whether the scripting channel can see the window at all.
    fn window_exists(&self, app: &str, title: &str) -> bool;
}
