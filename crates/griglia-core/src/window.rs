//! The window model and heuristic identity resolution.

use crate::config::TieBreak;
use crate::{Point, Rect};

/// An externally owned window under management.
///
/// Produced by the window directory collaborator as part of a periodic
/// snapshot. Identity is heuristic: the `id` is stable only as long as
/// the window exists, so backends re-locate windows by title, then by
/// position proximity, then by the single-window fallback (see
/// [`resolve_window`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedWindow {
    /// Snapshot-stable window identifier.
    pub id: usize,
    /// Window title at snapshot time.
    pub title: String,
    /// Owning process id.
    pub pid: i32,
    /// Owning application name, used for statistics, patterns, and
    /// the scripting channel.
    pub app: String,
    /// Current bounds (bottom-left origin).
    pub bounds: Rect,
    /// Whether the window is on screen.
    pub on_screen: bool,
}

impl ManagedWindow {
    pub fn new(id: usize, title: &str, pid: i32, app: &str, bounds: Rect) -> Self {
        Self {
            id,
            title: title.into(),
            pid,
            app: app.into(),
            bounds,
            on_screen: true,
        }
    }
}

/// Re-locates a window among `candidates`, the current windows of its
/// owning process.
///
/// Resolution order:
/// 1. Exact title match. Collisions resolve per `tie_break`: the first
///    match in candidate order, or the one closest to `last_origin`.
/// 2. Position proximity: the candidate whose origin lies within
///    `proximity` units of `last_origin`, closest first.
/// 3. Single-window fallback: the process has exactly one window.
pub fn resolve_window<'a>(
    candidates: &'a [ManagedWindow],
    title: &str,
    last_origin: Option<Point>,
    proximity: f64,
    tie_break: TieBreak,
) -> Option<&'a ManagedWindow> {
    let mut by_title = candidates.iter().filter(|w| w.title == title);
    match (tie_break, last_origin) {
        (TieBreak::Closest, Some(origin)) => {
            let closest = candidates
                .iter()
                .filter(|w| w.title == title)
                .min_by(|a, b| {
                    let da = a.bounds.origin().distance(&origin);
                    let db = b.bounds.origin().distance(&origin);
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                });
            if closest.is_some() {
                return closest;
            }
        }
        _ => {
            if let Some(w) = by_title.next() {
                return Some(w);
            }
        }
    }

    if let Some(origin) = last_origin {
        let nearby = candidates
            .iter()
            .filter(|w| w.bounds.origin().distance(&origin) <= proximity)
            .min_by(|a, b| {
                let da = a.bounds.origin().distance(&origin);
                let db = b.bounds.origin().distance(&origin);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });
        if nearby.is_some() {
            return nearby;
        }
    }

    if candidates.len() == 1 {
        return candidates.first();
    }
    None
}
