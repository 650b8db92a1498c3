//! Pure coordinate math shared by the window manager, icon grid, and selection engine.
//!
//! Nothing here holds state or touches a rendering surface.

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// A pixel position, usually container-relative.
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - origin`.
    pub fn delta_from(self, origin: Point) -> Point {
        Point {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }

    pub fn offset(self, delta: Point) -> Point {
        Point {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// Axis-aligned rectangle with its origin at the top-left corner.
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: size.width,
            h: size.height,
        }
    }

    /// Normalised rectangle spanning two corners dragged in any direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            w: a.x.max(b.x) - x,
            h: a.y.max(b.y) - y,
        }
    }

    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }

    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    /// `true` when the rectangle has no area on at least one axis.
    pub fn is_degenerate(self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// Converts a client (viewport) position into coordinates relative to a container whose
/// top-left corner sits at `container_origin`.
pub fn to_container_relative(client: Point, container_origin: Point) -> Point {
    client.delta_from(container_origin)
}

/// Overlap test used for rubber-band membership.
///
/// Degenerate rectangles never intersect anything, so a click-sized selection box cannot
/// match the icon under the pointer. Otherwise rectangles that touch or overlap count.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }
    !(a.right() < b.x || a.x > b.right() || a.bottom() < b.y || a.y > b.bottom())
}

/// Viewport-centred position for a window of `window` size, displaced by `unit` (each axis in
/// `[-1, 1]`) times the jitter bound and clamped so the window stays inside the viewport minus
/// the taskbar.
///
/// The bound is `min(max_jitter, min(center_x, center_y) / 2)`, never negative.
pub fn centered_with_jitter(
    viewport: Size,
    window: Size,
    taskbar_height: i32,
    max_jitter: i32,
    unit: (f64, f64),
) -> Point {
    let usable_height = viewport.height - taskbar_height;
    let center_x = f64::from(viewport.width - window.width) / 2.0;
    let center_y = f64::from(usable_height - window.height) / 2.0;
    let bound = f64::from(max_jitter)
        .min(center_x.min(center_y) / 2.0)
        .max(0.0);

    let offset_x = unit.0.clamp(-1.0, 1.0) * bound;
    let offset_y = unit.1.clamp(-1.0, 1.0) * bound;

    let max_x = f64::from((viewport.width - window.width).max(0));
    let max_y = f64::from((usable_height - window.height).max(0));
    Point {
        x: (center_x + offset_x).clamp(0.0, max_x).round() as i32,
        y: (center_y + offset_y).clamp(0.0, max_y).round() as i32,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
/// Integer grid coordinate: `x` is the column, `y` the row.
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Resolved icon-grid layout for one container size.
pub struct GridMetrics {
    pub columns: i32,
    /// Rows that fit the container; the grid may hold icons beyond this.
    pub rows: i32,
    pub cell: Size,
    pub gap: i32,
}

impl GridMetrics {
    /// Layout used when the container size is zero or unknown.
    pub fn fallback(config: &GridConfig) -> Self {
        Self {
            columns: config.columns.max(1),
            rows: config.default_rows.max(1),
            cell: Size::new(config.default_cell, config.default_cell),
            gap: config.gap.max(0),
        }
    }

    /// Divides the container width between `config.columns` square cells.
    pub fn compute(container: Size, config: &GridConfig) -> Self {
        let columns = config.columns;
        let gap = config.gap.max(0);
        if container.is_empty() || columns <= 0 {
            return Self::fallback(config);
        }

        let cell_w = (container.width - gap * (columns + 1)) / columns;
        if cell_w < 1 {
            return Self::fallback(config);
        }

        let rows = ((container.height - gap) / (cell_w + gap)).max(1);
        Self {
            columns,
            rows,
            cell: Size::new(cell_w, cell_w),
            gap,
        }
    }

    fn pitch_x(&self) -> i32 {
        self.cell.width + self.gap
    }

    fn pitch_y(&self) -> i32 {
        self.cell.height + self.gap
    }

    pub fn cell_origin(&self, cell: GridCell) -> Point {
        Point {
            x: self.gap + cell.x * self.pitch_x(),
            y: self.gap + cell.y * self.pitch_y(),
        }
    }

    pub fn cell_bounds(&self, cell: GridCell) -> Rect {
        Rect::from_origin_size(self.cell_origin(cell), self.cell)
    }

    /// Visible cell whose origin is closest to `point` (an icon's top-left corner).
    pub fn nearest_cell(&self, point: Point) -> GridCell {
        let column = div_round(point.x - self.gap, self.pitch_x());
        let row = div_round(point.y - self.gap, self.pitch_y());
        GridCell {
            x: column.clamp(0, (self.columns - 1).max(0)),
            y: row.clamp(0, (self.rows - 1).max(0)),
        }
    }
}

fn div_round(value: i32, divisor: i32) -> i32 {
    if divisor <= 0 {
        return 0;
    }
    (f64::from(value) / f64::from(divisor)).round() as i32
}
