//! Layout strategies: compute item positions and hit-test insertion points
//! from the sizes of currently rendered elements.

mod grid;
mod linear;

pub use grid::FlowGrid;
pub use linear::{Alignment, Axis, Linear};

use std::fmt;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Environment a layout runs in: the container's page-space origin and the
/// space available to it (pushed by the host, standing in for a resize
/// observer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutContext {
    /// Top-left of the container in page space.
    pub origin: Point,
    /// Available width/height for laying items out.
    pub viewport: Size,
}

/// Result of hit-testing a rectangle against a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hit {
    /// Insertion point before the given index.
    Inside(usize),
    /// Append position past the last item (carries the item count).
    End(usize),
}

impl Hit {
    /// The insertion index the hit denotes.
    pub fn index(&self) -> usize {
        match self {
            Self::Inside(i) | Self::End(i) => *i,
        }
    }
}

type HitFn = Box<dyn Fn(Rect) -> Option<Hit>>;

/// Derived layout: container footprint, a position per item, and a
/// page-space hit tester. Recomputed whenever element sizes, the viewport,
/// or the sequence change.
pub struct LayoutResult {
    footprint: Size,
    positions: Vec<Point>,
    hit: Option<HitFn>,
}

impl LayoutResult {
    /// Layout for an empty or unmeasured container: zero footprint, no hits.
    pub fn empty() -> Self {
        Self::degenerate(Size::ZERO, Vec::new())
    }

    /// A layout whose hit tester never matches. Used for degenerate inputs
    /// (zero-sized cells, zero-width containers) so callers degrade to "no
    /// match" instead of dividing by zero.
    pub fn degenerate(footprint: Size, positions: Vec<Point>) -> Self {
        Self {
            footprint,
            positions,
            hit: None,
        }
    }

    /// A fully usable layout with the given hit tester.
    pub fn new(
        footprint: Size,
        positions: Vec<Point>,
        hit: impl Fn(Rect) -> Option<Hit> + 'static,
    ) -> Self {
        Self {
            footprint,
            positions,
            hit: Some(Box::new(hit)),
        }
    }

    /// Overall width/height occupied by the laid-out items.
    pub fn footprint(&self) -> Size {
        self.footprint
    }

    /// Number of items the layout was computed for.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Container-local position of the item at `index`.
    pub fn position_of(&self, index: usize) -> Option<Point> {
        self.positions.get(index).copied()
    }

    /// All container-local positions, in item order.
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Map a page-space rectangle to an insertion point, if any.
    pub fn hit_test(&self, rect: Rect) -> Option<Hit> {
        self.hit.as_ref().and_then(|f| f(rect))
    }
}

impl fmt::Debug for LayoutResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutResult")
            .field("footprint", &self.footprint)
            .field("positions", &self.positions)
            .field("hit", &self.hit.is_some())
            .finish()
    }
}

/// A pluggable layout algorithm.
///
/// `layout` is pure with respect to its inputs; the engine calls it whenever
/// a rendered element's size changes, the viewport changes, or the caller
/// explicitly invalidates the container.
pub trait LayoutStrategy {
    /// Called when the strategy is bound to a container.
    fn mount(&mut self, _ctx: &LayoutContext) {}

    /// Called when the container is unregistered.
    fn unmount(&mut self) {}

    /// Compute positions and hit testing for the given element sizes, in
    /// item order.
    fn layout(&self, ctx: &LayoutContext, sizes: &[Size]) -> LayoutResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_layout_has_no_hits() {
        let layout = LayoutResult::empty();
        assert_eq!(layout.len(), 0);
        assert_eq!(layout.footprint(), Size::ZERO);
        assert_eq!(
            layout.hit_test(Rect::new(0.0, 0.0, 100.0, 100.0)),
            None
        );
    }

    #[test]
    fn test_hit_index() {
        assert_eq!(Hit::Inside(3).index(), 3);
        assert_eq!(Hit::End(7).index(), 7);
    }
}
