//! Full-screen arrangement pass.
//!
//! Fits every window into an automatically sized grid and walks them
//! into place through the dispatcher. Windows of the same application
//! are placed back to back with a pacing delay between them, since
//! rapid-fire commands to one process are a common cause of silently
//! dropped placements.

use std::thread;
use std::time::Duration;

use griglia_core::grid::{optimal_grid, slot_rects};
use griglia_core::{ArrangeConfig, ManagedWindow, Rect};

use crate::dispatch::Dispatcher;
use crate::tracker::SlotTracker;

/// What an arrangement pass accomplished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrangeReport {
    pub attempted: usize,
    pub placed: usize,
    /// Ids of windows that refused their slot.
    pub failed: Vec<usize>,
}

/// Arranges `windows` into a grid over `area`.
///
/// Off-screen windows are skipped entirely: they get no slot and the
/// grid is sized for the visible windows only. Slot indices follow
/// the input order of the visible windows, so the first visible
/// window gets the top-left slot. The tracker is rebuilt around the
/// new grid, discarding previous assignments.
pub fn arrange_windows(
    windows: &[ManagedWindow],
    area: &Rect,
    dispatcher: &mut Dispatcher<'_>,
    tracker: &mut SlotTracker,
    tuning: &ArrangeConfig,
) -> ArrangeReport {
    let visible: Vec<&ManagedWindow> = windows.iter().filter(|w| w.on_screen).collect();
    let mut report = ArrangeReport {
        attempted: visible.len(),
        ..Default::default()
    };
    if visible.is_empty() {
        return report;
    }

    let (rows, cols) = optimal_grid(visible.len());
    let mut slots = slot_rects(area, rows, cols, tuning.padding, tuning.spacing);
    if tuning.pixel_snap {
        for slot in &mut slots {
            *slot = slot.snapped();
        }
    }
    tracker.rebuild(slots.clone());
    for (i, window) in visible.iter().enumerate() {
        tracker.assign(window, i);
    }

    // Place app by app; the sort is stable, so windows of one
    // application keep their relative slot order.
    let mut order: Vec<(usize, &ManagedWindow)> = visible.into_iter().enumerate().collect();
    order.sort_by(|(_, a), (_, b)| a.app.cmp(&b.app));

    let mut previous_app: Option<&str> = None;
    for (slot, window) in order {
        if previous_app == Some(window.app.as_str()) {
            pause(tuning.pacing_delay_ms);
        }
        previous_app = Some(window.app.as_str());

        if dispatcher.set_frame(window, slots[slot]) {
            report.placed += 1;
        } else {
            report.failed.push(window.id);
        }
    }

    griglia_core::log_info!(
        "arranged {}/{} windows into a {rows}x{cols} grid",
        report.placed,
        report.attempted
    );
    report
}

fn pause(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}
