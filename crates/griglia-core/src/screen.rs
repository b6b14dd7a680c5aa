use crate::{Point, Rect};

/// A physical display.
///
/// `frame` is the full display rectangle; `usable` excludes reserved
/// areas such as menu bars and docks. Layouts are computed over
/// `usable`, while fullscreen detection compares against `frame`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub frame: Rect,
    pub usable: Rect,
}

impl Screen {
    pub fn new(frame: Rect, usable: Rect) -> Self {
        Self { frame, usable }
    }

    /// Closest approach of `rect` to any edge of the display frame.
    ///
    /// Compares each edge of the rectangle against the matching frame
    /// edge and returns the smallest gap. Zero or negative means the
    /// rectangle touches or crosses an edge.
    pub fn edge_distance(&self, rect: &Rect) -> f64 {
        let left = rect.x - self.frame.x;
        let right = self.frame.right() - rect.right();
        let bottom = rect.y - self.frame.y;
        let top = self.frame.top() - rect.top();
        left.min(right).min(bottom).min(top)
    }
}

/// Finds the screen whose frame contains `point`, if any.
pub fn screen_containing<'a>(screens: &'a [Screen], point: &Point) -> Option<&'a Screen> {
    screens.iter().find(|s| {
        point.x >= s.frame.x
            && point.x <= s.frame.right()
            && point.y >= s.frame.y
            && point.y <= s.frame.top()
    })
}
