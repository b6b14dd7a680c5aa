//! Slot assignment tracking.
//!
//! The tracker remembers which window sits in which grid slot and
//! compares live window bounds against the expected slot rectangles,
//! so callers can tell an arranged window from one the user dragged
//! away. It never talks to a backend; callers feed it snapshots of the
//! current window list via [`SlotTracker::sync`].

use std::collections::HashMap;
use std::time::SystemTime;

use griglia_core::{ManagedWindow, Rect};

/// Where a window stands relative to its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    /// Seen for the first time, not yet placed.
    New,
    /// Sitting within tolerance of its assigned slot.
    Positioned,
    /// Assigned a slot but drifted away from it.
    Moved,
    /// Deliberately unmanaged.
    Floating,
    /// Placement issued, arrival not yet confirmed.
    Arranging,
}

/// Per-window tracking record.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotAssignment {
    pub id: usize,
    pub slot: Option<usize>,
    /// Bounds from the most recent snapshot.
    pub actual: Rect,
    /// Slot rectangle the window should occupy.
    pub expected: Option<Rect>,
    pub status: PositionStatus,
    pub detected_at: SystemTime,
    pub last_positioned_at: Option<SystemTime>,
}

/// Tracks slot occupancy for one grid of rectangles.
#[derive(Debug, Clone, Default)]
pub struct SlotTracker {
    slots: Vec<Rect>,
    /// Window id occupying each slot, index-aligned with `slots`.
    occupants: Vec<Option<usize>>,
    windows: HashMap<usize, SlotAssignment>,
    tolerance: f64,
}

impl SlotTracker {
    pub fn new(slots: Vec<Rect>, tolerance: f64) -> Self {
        let occupants = vec![None; slots.len()];
        Self {
            slots,
            occupants,
            windows: HashMap::new(),
            tolerance,
        }
    }

    /// Replaces the slot grid, clearing all occupancy.
    ///
    /// Existing windows stay known but drop to
    /// [`PositionStatus::Floating`] until re-assigned, since their old
    /// slot indices no longer mean anything.
    pub fn rebuild(&mut self, slots: Vec<Rect>) {
        self.occupants = vec![None; slots.len()];
        self.slots = slots;
        for assignment in self.windows.values_mut() {
            assignment.slot = None;
            assignment.expected = None;
            assignment.status = PositionStatus::Floating;
        }
    }

    /// Assigns `window` to `slot`, displacing any previous occupant.
    ///
    /// The displaced window becomes floating. Returns `false` when the
    /// slot index is out of range.
    pub fn assign(&mut self, window: &ManagedWindow, slot: usize) -> bool {
        let Some(expected) = self.slots.get(slot).copied() else {
            return false;
        };

        // Free the window's previous slot, if any.
        if let Some(existing) = self.windows.get(&window.id)
            && let Some(prev) = existing.slot
            && prev != slot
        {
            self.occupants[prev] = None;
        }

        // Displace the current occupant.
        if let Some(occupant) = self.occupants[slot]
            && occupant != window.id
            && let Some(other) = self.windows.get_mut(&occupant)
        {
            other.slot = None;
            other.expected = None;
            other.status = PositionStatus::Floating;
        }

        self.occupants[slot] = Some(window.id);
        let status = if window.bounds.center_distance(&expected) <= self.tolerance {
            PositionStatus::Positioned
        } else {
            PositionStatus::Arranging
        };
        let now = SystemTime::now();
        let entry = self
            .windows
            .entry(window.id)
            .or_insert_with(|| SlotAssignment {
                id: window.id,
                slot: None,
                actual: window.bounds,
                expected: None,
                status: PositionStatus::New,
                detected_at: now,
                last_positioned_at: None,
            });
        entry.slot = Some(slot);
        entry.expected = Some(expected);
        entry.actual = window.bounds;
        entry.status = status;
        if status == PositionStatus::Positioned {
            entry.last_positioned_at = Some(now);
        }
        true
    }

    /// Reconciles tracked state with a snapshot of live windows.
    ///
    /// Windows within tolerance of their expected rect settle into
    /// [`PositionStatus::Positioned`]; positioned windows that drifted
    /// become [`PositionStatus::Moved`] while keeping their slot, so a
    /// later re-arrange can pull them back. Unknown windows are
    /// registered as [`PositionStatus::New`].
    pub fn sync(&mut self, snapshot: &[ManagedWindow]) {
        let now = SystemTime::now();
        for window in snapshot {
            let Some(assignment) = self.windows.get_mut(&window.id) else {
                self.windows.insert(
                    window.id,
                    SlotAssignment {
                        id: window.id,
                        slot: None,
                        actual: window.bounds,
                        expected: None,
                        status: PositionStatus::New,
                        detected_at: now,
                        last_positioned_at: None,
                    },
                );
                continue;
            };

            assignment.actual = window.bounds;
            let in_place = assignment
                .expected
                .is_some_and(|e| window.bounds.center_distance(&e) <= self.tolerance);
            assignment.status = match (assignment.status, in_place) {
                (PositionStatus::Positioned, false) => PositionStatus::Moved,
                (PositionStatus::Moved | PositionStatus::Arranging, true) => {
                    assignment.last_positioned_at = Some(now);
                    PositionStatus::Positioned
                }
                (status, _) => status,
            };
        }
    }

    /// Drops windows missing from the snapshot, freeing their slots.
    pub fn remove_absent(&mut self, snapshot: &[ManagedWindow]) {
        self.windows.retain(|id, assignment| {
            if snapshot.iter().any(|w| w.id == *id) {
                return true;
            }
            if let Some(slot) = assignment.slot {
                self.occupants[slot] = None;
            }
            false
        });
    }

    /// Frees every slot and floats every window.
    pub fn clear_all(&mut self) {
        self.occupants.iter_mut().for_each(|o| *o = None);
        for assignment in self.windows.values_mut() {
            assignment.slot = None;
            assignment.expected = None;
            assignment.status = PositionStatus::Floating;
        }
    }

    pub fn assignment(&self, id: usize) -> Option<&SlotAssignment> {
        self.windows.get(&id)
    }

    pub fn with_status(&self, status: PositionStatus) -> Vec<&SlotAssignment> {
        let mut matches: Vec<_> = self
            .windows
            .values()
            .filter(|a| a.status == status)
            .collect();
        matches.sort_by_key(|a| a.id);
        matches
    }

    /// Lowest-index slot with no occupant.
    pub fn next_available_slot(&self) -> Option<usize> {
        self.occupants.iter().position(|o| o.is_none())
    }

    pub fn occupied_slots(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_some()).count()
    }

    /// Slot whose rectangle's center is nearest to `rect`'s.
    pub fn find_closest_slot(&self, rect: &Rect) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                rect.center_distance(a)
                    .total_cmp(&rect.center_distance(b))
            })
            .map(|(i, _)| i)
    }

    /// Whether `rect` sits within `tolerance` of any slot.
    pub fn is_position_in_grid(&self, rect: &Rect, tolerance: f64) -> bool {
        self.slots
            .iter()
            .any(|s| rect.center_distance(s) <= tolerance)
    }

    pub fn slot_rect(&self, slot: usize) -> Option<Rect> {
        self.slots.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
