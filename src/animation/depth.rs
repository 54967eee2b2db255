//! The depth scheduler: the per-frame step that scrolls every card toward
//! the camera and sends the ones that pass it to the back of the queue.
//!
//! Each card is a two-state machine (advancing / recycling) where recycling
//! is instantaneous and folded into the same tick:
//!
//! ```text
//! if z >= camera_depth { z = min_depth + lane_spacing }
//! z += depth_speed
//! ```
//!
//! Checking before advancing bounds the overshoot past the camera plane to a
//! single step.

use crate::card::VisualCard;
use crate::options::CarouselOptions;

/// Advances card depths once per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthScheduler {
    camera_depth: f32,
    min_depth: f32,
    lane_spacing: f32,
    depth_speed: f32,
}

impl DepthScheduler {
    /// Build a scheduler from the carousel options and the frozen minimum
    /// depth produced by the layout planner.
    #[must_use]
    pub fn new(options: &CarouselOptions, min_depth: f32) -> Self {
        Self {
            camera_depth: options.camera_depth,
            min_depth,
            lane_spacing: options.lane_spacing,
            depth_speed: options.depth_speed,
        }
    }

    /// The farthest depth any card reaches.
    #[must_use]
    pub fn min_depth(&self) -> f32 {
        self.min_depth
    }

    /// Depth a card jumps to when it passes the camera.
    #[must_use]
    pub fn recycle_depth(&self) -> f32 {
        self.min_depth + self.lane_spacing
    }

    /// Whether a card at `z` is due for recycling this tick.
    #[must_use]
    pub fn needs_recycle(&self, z: f32) -> bool {
        z >= self.camera_depth
    }

    /// One tick for a single depth value.
    #[must_use]
    pub fn step(&self, z: f32) -> f32 {
        let z = if self.needs_recycle(z) {
            self.recycle_depth()
        } else {
            z
        };
        z + self.depth_speed
    }

    /// One tick over every card. Returns how many cards were recycled.
    ///
    /// Cards are independent; a card whose depth is not finite is left alone
    /// for this tick rather than stopping the loop.
    pub fn tick<V>(&self, cards: &mut [VisualCard<V>]) -> usize {
        let mut recycled = 0;
        for card in cards.iter_mut() {
            let z = card.position.z;
            if !z.is_finite() {
                log::warn!("{}: non-finite depth {z}, skipping update", card.id);
                continue;
            }
            if self.needs_recycle(z) {
                recycled += 1;
                card.start_depth = self.recycle_depth();
                log::trace!("{} recycled from z={z}", card.id);
            }
            card.position.z = self.step(z);
        }
        recycled
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::card::{CardId, LayoutPlanner};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn cards(opts: &CarouselOptions, n: usize) -> (Vec<VisualCard<()>>, f32) {
        let mut planner = LayoutPlanner::new(opts);
        let cards = (0..n)
            .map(|i| {
                let position = planner.place(i);
                VisualCard {
                    id: CardId(i),
                    source_index: i,
                    visual: (),
                    position,
                    size: Vec2::ONE,
                    start_depth: position.z,
                    activation_target: None,
                    scale: Vec3::ONE,
                }
            })
            .collect();
        (cards, planner.finish())
    }

    #[test]
    fn card_just_short_of_camera_advances_normally() {
        let opts = CarouselOptions::default();
        let (mut cards, min_depth) = cards(&opts, 3);
        let sched = DepthScheduler::new(&opts, min_depth);
        cards[0].position.z = -0.01;
        assert_eq!(sched.tick(&mut cards[..1]), 0);
        assert!(approx(cards[0].position.z, 0.01));
    }

    #[test]
    fn card_at_or_past_camera_recycles_behind_the_queue() {
        let opts = CarouselOptions::default();
        let (mut cards, min_depth) = cards(&opts, 3);
        assert!(approx(min_depth, -5.4));
        let sched = DepthScheduler::new(&opts, min_depth);
        cards[0].position.z = 0.01;
        assert_eq!(sched.tick(&mut cards[..1]), 1);
        let expected = min_depth + opts.lane_spacing + opts.depth_speed;
        assert!(approx(cards[0].position.z, expected));
        assert!(approx(cards[0].start_depth, min_depth + opts.lane_spacing));
    }

    #[test]
    fn recycle_target_is_independent_of_overshoot() {
        let opts = CarouselOptions::default();
        let sched = DepthScheduler::new(&opts, -5.4);
        let expected = -5.4 + 1.2 + 0.02;
        for z0 in [0.0, 0.001, 0.5, 3.0, 100.0] {
            assert!(approx(sched.step(z0), expected), "z0 = {z0}");
        }
    }

    #[test]
    fn depth_stays_bounded_over_many_ticks() {
        for (spacing, speed) in [(1.2, 0.02), (0.5, 0.3), (3.0, 0.07)] {
            let opts = CarouselOptions {
                lane_spacing: spacing,
                depth_speed: speed,
                ..CarouselOptions::default()
            };
            let (mut cards, min_depth) = cards(&opts, 9);
            let sched = DepthScheduler::new(&opts, min_depth);
            for _ in 0..5000 {
                let _ = sched.tick(&mut cards);
                for card in &cards {
                    let z = card.position.z;
                    assert!(z >= min_depth - 1e-4, "z {z} below {min_depth}");
                    assert!(
                        z < opts.camera_depth + speed + 1e-4,
                        "z {z} past camera"
                    );
                }
            }
        }
    }

    #[test]
    fn lanes_are_untouched_by_ticks() {
        let opts = CarouselOptions::default();
        let (mut cards, min_depth) = cards(&opts, 8);
        let before: Vec<Vec2> =
            cards.iter().map(|c| c.position.truncate()).collect();
        let sched = DepthScheduler::new(&opts, min_depth);
        for _ in 0..1000 {
            let _ = sched.tick(&mut cards);
        }
        let after: Vec<Vec2> =
            cards.iter().map(|c| c.position.truncate()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn non_finite_depth_is_skipped_not_fatal() {
        let opts = CarouselOptions::default();
        let (mut cards, min_depth) = cards(&opts, 2);
        let sched = DepthScheduler::new(&opts, min_depth);
        cards[0].position.z = f32::NAN;
        let z1 = cards[1].position.z;
        let _ = sched.tick(&mut cards);
        assert!(cards[0].position.z.is_nan());
        assert!(approx(cards[1].position.z, z1 + opts.depth_speed));
    }
}
