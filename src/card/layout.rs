//! Lane and initial-depth assignment.
//!
//! Lanes are the eight cells of a 3×3 grid around the view axis, skipping
//! the center so no card ever flies straight through the camera.

use glam::{Vec2, Vec3};

use crate::options::CarouselOptions;

/// Cyclic `(x, y)` lane offsets, indexed by `card_index % 8`.
pub const LANE_PATTERN: [[f32; 2]; 8] = [
    [-1.0, -1.0],
    [0.0, -1.0],
    [1.0, -1.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 1.0],
    [0.0, 1.0],
    [1.0, 1.0],
];

/// Lane offset for a card index.
#[must_use]
pub fn lane_for(index: usize) -> Vec2 {
    Vec2::from(LANE_PATTERN[index % LANE_PATTERN.len()])
}

/// Initial depth for a card index: each card sits one lane spacing behind
/// the previous one.
#[must_use]
pub fn initial_depth(index: usize, start_depth: f32, lane_spacing: f32) -> f32 {
    start_depth - index as f32 * lane_spacing
}

/// Places cards and tracks the farthest depth produced.
///
/// Consumed by [`finish`](Self::finish), which freezes the minimum depth for
/// the scheduler.
#[derive(Debug, Clone)]
pub struct LayoutPlanner {
    start_depth: f32,
    lane_spacing: f32,
    min_depth: f32,
}

impl LayoutPlanner {
    /// Start planning. The running minimum begins at the camera plane.
    #[must_use]
    pub fn new(options: &CarouselOptions) -> Self {
        Self {
            start_depth: options.start_depth,
            lane_spacing: options.lane_spacing,
            min_depth: options.camera_depth,
        }
    }

    /// Position for the card at `index`, lowering the running minimum depth.
    pub fn place(&mut self, index: usize) -> Vec3 {
        let z = initial_depth(index, self.start_depth, self.lane_spacing);
        if z < self.min_depth {
            self.min_depth = z;
        }
        lane_for(index).extend(z)
    }

    /// Minimum depth over all cards placed so far.
    #[must_use]
    pub fn min_depth(&self) -> f32 {
        self.min_depth
    }

    /// Stop planning and return the frozen minimum depth.
    #[must_use]
    pub fn finish(self) -> f32 {
        self.min_depth
    }
}
