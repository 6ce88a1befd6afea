//! Geometry helpers shared by layout and drag code.
//!
//! All page-space coordinates use kurbo types; a container's coordinate
//! space is the page space translated by the container's origin.

use kurbo::{Point, Rect, Size};

/// Build a rectangle from a top-left origin and a size.
pub fn rect_at(origin: Point, size: Size) -> Rect {
    Rect::from_origin_size(origin, size)
}

/// Whether two rectangles overlap. Shared edges do not count as overlap,
/// so a zero-area rectangle never intersects anything.
pub fn intersects(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Convert a page-space point into a container-local point.
pub fn page_to_local(point: Point, origin: Point) -> Point {
    point - origin.to_vec2()
}

/// Convert a container-local point into a page-space point.
pub fn local_to_page(point: Point, origin: Point) -> Point {
    point + origin.to_vec2()
}
