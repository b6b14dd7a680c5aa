//! Grid, cascade, and stack layout calculators.
//!
//! These are pure functions over [`Rect`], easy to unit-test without
//! any backend. Coordinates use a bottom-left origin, so the visual
//! top row of a grid has the largest `y`. Row 0 of every returned
//! matrix is the visual top row; the vertical flip happens here, in
//! exactly one place, so slot indices elsewhere can stay visual.

use crate::{Rect, Screen, Size};

/// Computes a `rows` × `cols` matrix of cell rectangles over `area`.
///
/// Cell size is `(dimension − 2·padding − (count−1)·spacing) / count`.
/// Row 0 is the visual top row. Degenerate cells are clamped to a
/// minimum of 1 unit so pathological padding never yields negative
/// sizes.
pub fn calculate_grid_layout(
    area: &Rect,
    rows: usize,
    cols: usize,
    padding: f64,
    spacing: f64,
) -> Vec<Vec<Rect>> {
    let rows = rows.max(1);
    let cols = cols.max(1);

    let cell_w =
        ((area.width - 2.0 * padding - (cols - 1) as f64 * spacing) / cols as f64).max(1.0);
    let cell_h =
        ((area.height - 2.0 * padding - (rows - 1) as f64 * spacing) / rows as f64).max(1.0);

    (0..rows)
        .map(|row| {
            // Visual row 0 is at the top; with a bottom-left origin the
            // top row has the highest y, hence the flip.
            let geometric_row = rows - 1 - row;
            let y = area.y + padding + geometric_row as f64 * (cell_h + spacing);
            (0..cols)
                .map(|col| {
                    let x = area.x + padding + col as f64 * (cell_w + spacing);
                    Rect::new(x, y, cell_w, cell_h)
                })
                .collect()
        })
        .collect()
}

/// Flattens [`calculate_grid_layout`] into a list ordered by visual
/// slot index: slot 0 is top-left, slot `cols − 1` is top-right, and
/// the last slot is bottom-right.
pub fn slot_rects(
    area: &Rect,
    rows: usize,
    cols: usize,
    padding: f64,
    spacing: f64,
) -> Vec<Rect> {
    calculate_grid_layout(area, rows, cols, padding, spacing)
        .into_iter()
        .flatten()
        .collect()
}

/// Picks a pleasing (rows, cols) pair for `count` windows.
///
/// Fixed lookup up to 16 windows; beyond that, a square grid of
/// `ceil(sqrt(count))` per side.
pub fn optimal_grid(count: usize) -> (usize, usize) {
    match count {
        0 | 1 => (1, 1),
        2 => (1, 2),
        3..=4 => (2, 2),
        5..=6 => (2, 3),
        7..=9 => (3, 3),
        10..=12 => (3, 4),
        13..=16 => (4, 4),
        n => {
            let side = (n as f64).sqrt().ceil() as usize;
            (side, side)
        }
    }
}

/// Computes a cascade: each window offset by `(dx, dy)` from the
/// previous one, starting at the top-left corner of `area`.
///
/// When the next offset would push a window past the right edge, the
/// horizontal origin resets to the left edge; when it would push past
/// the bottom edge, the vertical origin resets to the top. The two
/// resets are independent checks.
pub fn cascade_layout(area: &Rect, count: usize, window: Size, dx: f64, dy: f64) -> Vec<Rect> {
    let top_y = area.top() - window.height;
    let mut x = area.x;
    let mut y = top_y;

    let mut rects = Vec::with_capacity(count);
    for _ in 0..count {
        rects.push(Rect::new(x, y, window.width, window.height));
        x += dx;
        y += dy;
        if x + window.width > area.right() {
            x = area.x;
        }
        if y < area.y {
            y = top_y;
        }
    }
    rects
}

/// Computes a stack: one centered rectangle sized to `fill` of the
/// area in each dimension, repeated once per window.
pub fn stack_layout(area: &Rect, count: usize, fill: f64) -> Vec<Rect> {
    let width = area.width * fill;
    let height = area.height * fill;
    let rect = Rect::new(
        area.x + (area.width - width) / 2.0,
        area.y + (area.height - height) / 2.0,
        width,
        height,
    );
    vec![rect; count]
}

/// Partitions `count` windows across `screens` and lays each chunk out
/// on its own screen.
///
/// Windows are split into `ceil(count / screens)`-sized contiguous
/// chunks in input order, one chunk per screen. Each chunk gets its
/// own optimal grid over that screen's usable area. The returned
/// outer vector is aligned with `screens`; inner vectors hold one
/// rect per window in the chunk.
pub fn distribute_across_screens(
    count: usize,
    screens: &[Screen],
    padding: f64,
    spacing: f64,
) -> Vec<Vec<Rect>> {
    if screens.is_empty() {
        return Vec::new();
    }
    let chunk = count.div_ceil(screens.len());

    let mut remaining = count;
    screens
        .iter()
        .map(|screen| {
            let take = chunk.min(remaining);
            remaining -= take;
            if take == 0 {
                return Vec::new();
            }
            let (rows, cols) = optimal_grid(take);
            let mut rects = slot_rects(&screen.usable, rows, cols, padding, spacing);
            rects.truncate(take);
            rects
        })
        .collect()
}

/// Returns whether any two rectangles overlap with positive area.
pub fn check_overlap(rects: &[Rect]) -> bool {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].intersects(&rects[j]) {
                return true;
            }
        }
    }
    false
}

/// Resolves pairwise overlaps in place.
///
/// For each overlapping pair `i < j`, `j` is shifted to start just
/// right of `i` plus `min_spacing`. If that would exceed the primary
/// screen's right edge, `j` is instead placed directly below `i` at
/// `i`'s horizontal origin.
pub fn prevent_overlap(rects: &mut [Rect], min_spacing: f64, primary: &Screen) {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if !rects[i].intersects(&rects[j]) {
                continue;
            }
            let anchor = rects[i];
            let moved_x = anchor.right() + min_spacing;
            if moved_x + rects[j].width > primary.frame.right() {
                rects[j].x = anchor.x;
                rects[j].y = anchor.y - rects[j].height - min_spacing;
            } else {
                rects[j].x = moved_x;
            }
        }
    }
}
