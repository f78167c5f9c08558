use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::{AnnotationId, DeviceRect, StackSide};

/// Counters for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelStackStats {
    pub placed: usize,
    pub suppressed: usize,
}

/// Overlap avoidance for labels stacked above and below the curve.
///
/// Each side keeps the last `capacity` accepted rectangles in insertion order.
/// A new candidate is pushed away from the curve in `min_band_height` steps
/// until its vertical band is free. Candidates that would leave the plot area,
/// or that still overlap after `capacity` shifts, are suppressed.
///
/// Results depend on the order of `place` calls, so callers feed candidates in
/// ascending device x and call [`LabelStack::reset`] at the start of each pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStack {
    capacity: usize,
    graph_top: i32,
    graph_bottom: i32,
    above: SmallVec<[DeviceRect; 8]>,
    below: SmallVec<[DeviceRect; 8]>,
    stats: LabelStackStats,
}

impl LabelStack {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            graph_top: 0,
            graph_bottom: 0,
            above: SmallVec::new(),
            below: SmallVec::new(),
            stats: LabelStackStats::default(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.above.clear();
        self.below.clear();
    }

    /// Drops all stacked bands and binds the stack to a new plot area.
    pub fn reset(&mut self, graph_top: i32, graph_bottom: i32) {
        self.graph_top = graph_top;
        self.graph_bottom = graph_bottom;
        self.above.clear();
        self.below.clear();
        self.stats = LabelStackStats::default();
    }

    #[must_use]
    pub fn stats(&self) -> LabelStackStats {
        self.stats
    }

    /// Currently stacked bands of one side, oldest first.
    #[must_use]
    pub fn stacked(&self, side: StackSide) -> &[DeviceRect] {
        match side {
            StackSide::Above => &self.above,
            StackSide::Below => &self.below,
        }
    }

    /// Finds a free vertical slot for `candidate`, or `None` when the label
    /// must be omitted from this pass.
    pub fn place(
        &mut self,
        candidate: DeviceRect,
        grows_up: bool,
        min_band_height: i32,
        label: AnnotationId,
    ) -> Option<DeviceRect> {
        let step = if grows_up {
            -min_band_height.max(1)
        } else {
            min_band_height.max(1)
        };
        let (graph_top, graph_bottom, capacity) = (self.graph_top, self.graph_bottom, self.capacity);
        let stack = if grows_up {
            &mut self.above
        } else {
            &mut self.below
        };

        let mut rect = candidate;
        for attempt in 0..=capacity {
            if rect.y < graph_top || rect.bottom() > graph_bottom {
                trace!(label = label.0, attempt, "label leaves plot area");
                break;
            }
            if !stack.iter().any(|stacked| stacked.overlaps_vertically(rect)) {
                if capacity > 0 {
                    if stack.len() == capacity {
                        stack.remove(0);
                    }
                    stack.push(rect);
                }
                self.stats.placed += 1;
                return Some(rect);
            }
            rect = rect.translate(0, step);
        }

        self.stats.suppressed += 1;
        warn!(
            label = label.0,
            grows_up,
            y = candidate.y,
            "no free label slot, label suppressed"
        );
        None
    }
}
