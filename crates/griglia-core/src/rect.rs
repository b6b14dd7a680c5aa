//! Geometry primitives.
//!
//! All coordinates use a bottom-left origin: `y` grows upward, so the
//! visual top of an area is `y + height`. Values are `f64` because
//! manipulation backends report fractional coordinates; callers that
//! need whole pixels apply [`Rect::snapped`].

/// A point on the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangle representing a window's position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The bottom-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge (`y + height`). The origin is bottom-left.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Euclidean distance between the centers of two rectangles.
    pub fn center_distance(&self, other: &Rect) -> f64 {
        self.center().distance(&other.center())
    }

    /// Returns whether the two rectangles overlap with positive area.
    ///
    /// Rectangles that merely touch along an edge do not overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// Returns whether `other` lies entirely inside this rectangle.
    ///
    /// Uses a small epsilon so rectangles produced by fractional cell
    /// arithmetic still count as contained.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-6;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.top() <= self.top() + EPS
    }

    /// Rounds origin and size to whole pixels.
    pub fn snapped(&self) -> Rect {
        Rect::new(
            self.x.round(),
            self.y.round(),
            self.width.round(),
            self.height.round(),
        )
    }

    /// Moves and, if necessary, shrinks this rectangle so it fits
    /// entirely inside `area`.
    pub fn clamped_into(&self, area: &Rect) -> Rect {
        let width = self.width.min(area.width);
        let height = self.height.min(area.height);
        let x = self.x.clamp(area.x, area.right() - width);
        let y = self.y.clamp(area.y, area.top() - height);
        Rect::new(x, y, width, height)
    }
}
