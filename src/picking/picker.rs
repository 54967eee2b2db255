use glam::{Vec2, Vec3};

use super::{Pickable, Ray};
use crate::camera::Camera;
use crate::card::{CardId, VisualCard};
use crate::engine::Host;
use crate::error::ActivationError;
use crate::input::PointerEvent;

/// Nearest intersection along a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance from the ray origin.
    pub distance: f32,
    /// The card that was hit, or `None` for a non-card object.
    pub card: Option<CardId>,
}

/// What happened when a card was activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The host accepted the target.
    Opened(String),
    /// The host refused; the carousel carries on.
    Failed(ActivationError),
}

/// Result of one pointer event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickOutcome {
    /// Card now under the pointer.
    pub selected: Option<CardId>,
    /// Set only for a pointer-down on a card with a target.
    pub activation: Option<Activation>,
}

/// Map a viewport pixel position to normalized device coordinates: `[-1, 1]`
/// on both axes with `+y` up. `None` for an empty viewport.
#[must_use]
pub fn pointer_to_ndc(x: f32, y: f32, (width, height): (u32, u32)) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }
    Some(Vec2::new(
        (x / width as f32) * 2.0 - 1.0,
        -(y / height as f32) * 2.0 + 1.0,
    ))
}

/// Nearest object hit by `ray` that lies beyond the camera's near plane.
/// Ties go to the object listed first.
pub fn pick_nearest<'a, P, I>(camera: &Camera, ray: &Ray, objects: I) -> Option<Hit>
where
    P: Pickable + ?Sized + 'a,
    I: IntoIterator<Item = &'a P>,
{
    objects
        .into_iter()
        .filter_map(|object| {
            let distance = object.intersect(ray)?;
            (camera.view_depth(ray.at(distance)) >= camera.znear).then(|| Hit {
                distance,
                card: object.card_id(),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Tracks the card under the pointer and fires activations.
///
/// Event-driven: it runs once per pointer event, never per frame, and only
/// ever touches a card's `scale`.
#[derive(Debug, Clone)]
pub struct PointerPicker {
    selected: Option<CardId>,
    hover_scale: f32,
}

impl PointerPicker {
    /// Picker applying `hover_scale` to the card under the pointer.
    #[must_use]
    pub fn new(hover_scale: f32) -> Self {
        Self {
            selected: None,
            hover_scale,
        }
    }

    /// The card currently under the pointer.
    #[must_use]
    pub fn selected(&self) -> Option<CardId> {
        self.selected
    }

    /// Resolve one pointer event against the scene.
    ///
    /// `obstacles` are extra scene objects that occlude cards but are never
    /// selectable themselves.
    pub fn handle_event<V, H>(
        &mut self,
        event: &PointerEvent,
        viewport: (u32, u32),
        camera: &Camera,
        cards: &mut [VisualCard<V>],
        obstacles: &[&dyn Pickable],
        host: &mut H,
    ) -> PickOutcome
    where
        H: Host + ?Sized,
    {
        if let Some(previous) = self.selected.take() {
            if let Some(card) = cards.iter_mut().find(|c| c.id == previous) {
                card.clear_highlight();
            }
        }

        let Some(ndc) = pointer_to_ndc(event.x, event.y, viewport) else {
            return PickOutcome::default();
        };
        let ray = camera.ray_from_ndc(ndc);

        let hit = {
            let mut objects: Vec<&dyn Pickable> =
                Vec::with_capacity(cards.len() + obstacles.len());
            for card in cards.iter() {
                objects.push(card);
            }
            objects.extend(obstacles.iter().copied());
            pick_nearest(camera, &ray, objects)
        };

        self.selected = hit.and_then(|h| h.card);
        let Some(card) = self
            .selected
            .and_then(|id| cards.iter_mut().find(|c| c.id == id))
        else {
            return PickOutcome::default();
        };
        card.scale = Vec3::new(self.hover_scale, self.hover_scale, 1.0);

        let activation = if event.is_activating() {
            card.activation_target
                .as_deref()
                .map(|target| activate(host, target))
        } else {
            None
        };

        PickOutcome {
            selected: self.selected,
            activation,
        }
    }
}

fn activate<H: Host + ?Sized>(host: &mut H, target: &str) -> Activation {
    match host.open_uri(target) {
        Ok(()) => {
            log::info!("opened {target}");
            Activation::Opened(target.to_owned())
        }
        Err(e) => {
            log::warn!("activation failed: {e}");
            Activation::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    const VIEWPORT: (u32, u32) = (800, 600);

    #[derive(Default)]
    struct RecordingHost {
        opened: Vec<String>,
        refuse: bool,
    }

    impl Host for RecordingHost {
        fn container_size(&self, _id: &str) -> Option<(u32, u32)> {
            Some(VIEWPORT)
        }

        fn open_uri(&mut self, uri: &str) -> Result<(), ActivationError> {
            if self.refuse {
                return Err(ActivationError {
                    target: uri.to_owned(),
                    reason: "popup blocked".into(),
                });
            }
            self.opened.push(uri.to_owned());
            Ok(())
        }
    }

    /// Occluder in front of everything, spanning the whole view.
    struct Wall;

    impl Pickable for Wall {
        fn intersect(&self, ray: &Ray) -> Option<f32> {
            ray.intersect_rect(Vec3::new(0.0, 0.0, -2.0), Vec2::splat(100.0))
        }
    }

    fn camera() -> Camera {
        Camera::looking_down_depth(&CameraOptions::default(), 0.0, VIEWPORT)
    }

    fn card(id: usize, position: Vec3) -> VisualCard<()> {
        VisualCard {
            id: CardId(id),
            source_index: id,
            visual: (),
            position,
            size: Vec2::new(1.0, 0.75),
            start_depth: position.z,
            activation_target: Some(format!("https://example.com/{id}")),
            scale: Vec3::ONE,
        }
    }

    /// Pixel position whose ray passes through `point`.
    fn pixel_for(point: Vec3) -> (f32, f32) {
        let ndc = camera().build_matrix().project_point3(point);
        (
            (ndc.x + 1.0) * 0.5 * VIEWPORT.0 as f32,
            (1.0 - ndc.y) * 0.5 * VIEWPORT.1 as f32,
        )
    }

    fn center() -> (f32, f32) {
        (VIEWPORT.0 as f32 / 2.0, VIEWPORT.1 as f32 / 2.0)
    }

    #[test]
    fn ndc_mapping_inverts_y() {
        let ndc = pointer_to_ndc(0.0, 0.0, VIEWPORT).unwrap();
        assert_eq!(ndc, Vec2::new(-1.0, 1.0));
        let ndc = pointer_to_ndc(800.0, 600.0, VIEWPORT).unwrap();
        assert_eq!(ndc, Vec2::new(1.0, -1.0));
        assert!(pointer_to_ndc(1.0, 1.0, (0, 600)).is_none());
    }

    #[test]
    fn selects_the_only_card_on_the_ray() {
        let mut cards = vec![
            card(0, Vec3::new(-1.0, -1.0, -3.0)),
            card(1, Vec3::new(1.0, 1.0, -4.2)),
        ];
        let (x, y) = pixel_for(cards[1].position);
        let mut picker = PointerPicker::new(1.0);
        let mut host = RecordingHost::default();
        let out = picker.handle_event(
            &PointerEvent::moved(x, y, 0),
            VIEWPORT,
            &camera(),
            &mut cards,
            &[],
            &mut host,
        );
        assert_eq!(out.selected, Some(CardId(1)));
        assert_eq!(picker.selected(), Some(CardId(1)));
        assert!(out.activation.is_none());
    }

    #[test]
    fn nearest_of_overlapping_cards_wins() {
        let mut cards = vec![
            card(0, Vec3::new(0.0, 0.0, -6.0)),
            card(1, Vec3::new(0.0, 0.0, -3.0)),
        ];
        let (x, y) = center();
        let mut picker = PointerPicker::new(1.0);
        let out = picker.handle_event(
            &PointerEvent::moved(x, y, 0),
            VIEWPORT,
            &camera(),
            &mut cards,
            &[],
            &mut RecordingHost::default(),
        );
        assert_eq!(out.selected, Some(CardId(1)));
    }

    #[test]
    fn empty_pick_clears_selection_and_highlight() {
        let mut cards = vec![card(0, Vec3::new(1.0, 1.0, -3.0))];
        let mut picker = PointerPicker::new(1.1);
        let mut host = RecordingHost::default();
        let (x, y) = pixel_for(cards[0].position);
        let _ = picker.handle_event(
            &PointerEvent::moved(x, y, 0),
            VIEWPORT,
            &camera(),
            &mut cards,
            &[],
            &mut host,
        );
        assert_eq!(cards[0].scale, Vec3::new(1.1, 1.1, 1.0));

        let (cx, cy) = center();
        let out = picker.handle_event(
            &PointerEvent::moved(cx, cy, 0),
            VIEWPORT,
            &camera(),
            &mut cards,
            &[],
            &mut host,
        );
        assert_eq!(out, PickOutcome::default());
        assert_eq!(picker.selected(), None);
        assert_eq!(cards[0].scale, Vec3::ONE);
    }

    #[test]
    fn press_on_nothing_never_navigates() {
        let mut cards = vec![card(0, Vec3::new(1.0, 1.0, -3.0))];
        let mut picker = PointerPicker::new(1.0);
        let mut host = RecordingHost::default();
        let (x, y) = center();
        let out = picker.handle_event(
            &PointerEvent::down(x, y, 1),
            VIEWPORT,
            &camera(),
            &mut cards,
            &[],
            &mut host,
        );
        assert!(out.activation.is_none());
        assert_eq!(out.selected, None);
        assert!(host.opened.is_empty());
    }

    #[test]
    fn press_on_card_opens_target_once() {
        let mut cards = vec![card(0, Vec3::new(0.0, 0.0, -3.0))];
        let mut picker = PointerPicker::new(1.0);
        let mut host = RecordingHost::default();
        let (x, y) = center();
        let out = picker.handle_event(
            &PointerEvent::down(x, y, 1),
            VIEWPORT,
            &camera(),
            &mut cards,
            &[],
            &mut host,
        );
        assert_eq!(
            out.activation,
            Some(Activation::Opened("https://example.com/0".into()))
        );
        assert_eq!(host.opened, vec!["https://example.com/0".to_owned()]);
    }

    #[test]
    fn motion_with_buttons_held_never_navigates() {
        let mut cards = vec![card(0, Vec3::new(0.0, 0.0, -3.0))];
        let mut picker = PointerPicker::new(1.0);
        let mut host = RecordingHost::default();
        let (x, y) = center();
        for _ in 0..5 {
            let out = picker.handle_event(
                &PointerEvent::moved(x, y, 1),
                VIEWPORT,
                &camera(),
                &mut cards,
                &[],
                &mut host,
            );
            assert_eq!(out.selected, Some(CardId(0)));
            assert!(out.activation.is_none());
        }
        assert!(host.opened.is_empty());
    }

    #[test]
    fn card_without_target_selects_but_does_not_navigate() {
        let mut cards = vec![card(0, Vec3::new(0.0, 0.0, -3.0))];
        cards[0].activation_target = None;
        let mut picker = PointerPicker::new(1.0);
        let mut host = RecordingHost::default();
        let (x, y) = center();
        let out = picker.handle_event(
            &PointerEvent::down(x, y, 1),
            VIEWPORT,
            &camera(),
            &mut cards,
            &[],
            &mut host,
        );
        assert_eq!(out.selected, Some(CardId(0)));
        assert!(out.activation.is_none());
    }

    #[test]
    fn refused_activation_is_reported_not_fatal() {
        let mut cards = vec![card(0, Vec3::new(0.0, 0.0, -3.0))];
        let mut picker = PointerPicker::new(1.0);
        let mut host = RecordingHost {
            refuse: true,
            ..RecordingHost::default()
        };
        let (x, y) = center();
        let out = picker.handle_event(
            &PointerEvent::down(x, y, 1),
            VIEWPORT,
            &camera(),
            &mut cards,
            &[],
            &mut host,
        );
        assert!(matches!(out.activation, Some(Activation::Failed(_))));
        assert_eq!(out.selected, Some(CardId(0)));
    }

    #[test]
    fn non_card_occluder_blocks_selection() {
        let mut cards = vec![card(0, Vec3::new(0.0, 0.0, -3.0))];
        let mut picker = PointerPicker::new(1.0);
        let mut host = RecordingHost::default();
        let (x, y) = center();
        let wall = Wall;
        let out = picker.handle_event(
            &PointerEvent::down(x, y, 1),
            VIEWPORT,
            &camera(),
            &mut cards,
            &[&wall],
            &mut host,
        );
        assert_eq!(out.selected, None);
        assert!(host.opened.is_empty());
    }

    #[test]
    fn cards_inside_near_plane_are_not_pickable() {
        let mut cards = vec![card(0, Vec3::new(0.0, 0.0, -0.5))];
        let mut picker = PointerPicker::new(1.0);
        let (x, y) = center();
        let out = picker.handle_event(
            &PointerEvent::moved(x, y, 0),
            VIEWPORT,
            &camera(),
            &mut cards,
            &[],
            &mut RecordingHost::default(),
        );
        assert_eq!(out.selected, None);
    }
}
