//! Ordered camera list with one input-routing active camera

use super::Camera3D;
use crate::actor::controller::{ActorLookup, UpdateContext};
use crate::actor::StatusFlags;
use crate::core::config::CameraConfig;
use crate::events::{EventActionType, EventCategoryType, EventDispatcher, EventInbox, PausableComponent};
use crate::foundation::time::GameTime;
use crate::input::{InputSource, NoInput};

/// Owns the cameras and tracks which one receives input
///
/// The active camera, when there is one, is always a member of the list.
/// Being active for input and being drawn are independent: any number of
/// cameras may have `draw_active` set.
///
/// Listens on the Camera category for `OnCameraSetActive` (payload: camera
/// id) and `OnCameraCycle`, applied at the start of each update.
pub struct CameraManager {
    cameras: Vec<Camera3D>,
    active: Option<usize>,
    pausable: PausableComponent,
    commands: EventInbox,
}

impl CameraManager {
    /// Create an empty camera manager
    pub fn new(config: &CameraConfig, events: &EventDispatcher) -> Self {
        Self {
            cameras: Vec::with_capacity(config.capacity),
            active: None,
            pausable: PausableComponent::new(events, StatusFlags::DRAWN | StatusFlags::UPDATE),
            commands: EventInbox::new(events, EventCategoryType::Camera),
        }
    }

    /// Append a camera; the first camera added becomes active
    pub fn add(&mut self, camera: Camera3D) {
        log::debug!("Added camera '{}'", camera.id());
        self.cameras.push(camera);
        if self.active.is_none() {
            self.active = Some(0);
        }
    }

    /// Remove a camera by id
    ///
    /// Removing the active camera makes the camera now at its index active,
    /// wrapping to the first; removing the last camera leaves none active.
    pub fn remove(&mut self, id: &str) -> Option<Camera3D> {
        let index = self.cameras.iter().position(|camera| camera.id() == id)?;
        let removed = self.cameras.remove(index);
        self.active = match self.active {
            _ if self.cameras.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) if active == index => Some(index % self.cameras.len()),
            other => other,
        };
        Some(removed)
    }

    /// Make the first camera matching `predicate` active
    ///
    /// Returns `false` and keeps the current active camera when nothing matches.
    pub fn set_active_camera<P>(&mut self, predicate: P) -> bool
    where
        P: Fn(&Camera3D) -> bool,
    {
        match self.cameras.iter().position(|camera| predicate(camera)) {
            Some(index) => {
                self.active = Some(index);
                log::info!("Active camera: '{}'", self.cameras[index].id());
                true
            }
            None => {
                log::debug!("No camera matched; active camera unchanged");
                false
            }
        }
    }

    /// Advance the active camera, wrapping to the first
    pub fn cycle(&mut self) {
        if let Some(active) = self.active {
            let next = (active + 1) % self.cameras.len();
            self.active = Some(next);
            log::info!("Active camera: '{}'", self.cameras[next].id());
        }
    }

    /// Camera receiving input
    pub fn active_camera(&self) -> Option<&Camera3D> {
        self.active.and_then(|index| self.cameras.get(index))
    }

    /// Camera receiving input, mutable
    pub fn active_camera_mut(&mut self) -> Option<&mut Camera3D> {
        self.active.and_then(|index| self.cameras.get_mut(index))
    }

    /// Camera by id
    pub fn get(&self, id: &str) -> Option<&Camera3D> {
        self.cameras.iter().find(|camera| camera.id() == id)
    }

    /// Camera by id, mutable
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Camera3D> {
        self.cameras.iter_mut().find(|camera| camera.id() == id)
    }

    /// All cameras in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Camera3D> {
        self.cameras.iter()
    }

    /// Draw-active cameras ordered by draw depth, ties kept in insertion order
    pub fn draw_cameras(&self) -> Vec<&Camera3D> {
        if !self.pausable.is_drawn() {
            return Vec::new();
        }
        let mut cameras: Vec<&Camera3D> = self.cameras.iter().filter(|camera| camera.draw_active).collect();
        cameras.sort_by(|a, b| a.draw_depth.total_cmp(&b.draw_depth));
        cameras
    }

    /// Number of cameras
    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    /// Whether there are no cameras
    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    /// Draw/update status set by menu events
    pub fn status(&self) -> StatusFlags {
        self.pausable.status()
    }

    /// Apply queued camera commands, then update every camera
    ///
    /// Only the active camera sees `input`; the others see no input so their
    /// rigs keep animating without reacting to keys.
    pub fn update(&mut self, time: &GameTime, input: &dyn InputSource, events: &EventDispatcher, scene: &dyn ActorLookup) {
        self.apply_commands();
        if !self.pausable.is_updating() {
            return;
        }
        let ctx = UpdateContext::new(time, input, events).with_scene(scene);
        let idle = ctx.with_input(&NoInput);
        for (index, camera) in self.cameras.iter_mut().enumerate() {
            if Some(index) == self.active {
                camera.update(&ctx);
            } else {
                camera.update(&idle);
            }
        }
    }

    fn apply_commands(&mut self) {
        for event in self.commands.drain() {
            match event.action() {
                EventActionType::OnCameraSetActive => match event.text(0) {
                    Some(id) => {
                        self.set_active_camera(|camera| camera.id() == id);
                    }
                    None => log::warn!("OnCameraSetActive without a camera id"),
                },
                EventActionType::OnCameraCycle => self.cycle(),
                _ => {}
            }
        }
    }
}

impl std::fmt::Debug for CameraManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraManager")
            .field("cameras", &self.cameras.iter().map(Camera3D::id).collect::<Vec<_>>())
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{ProjectionParameters, Viewport};
    use crate::controllers::{FlightCameraController, MoveKeys, MoveSpeeds};
    use crate::events::EventData;
    use crate::foundation::math::{Transform3D, Vec3};
    use crate::input::{InputState, KeyCode};
    use std::collections::HashMap;

    struct Empty;

    impl ActorLookup for Empty {
        fn transform_of(&self, _id: &str) -> Option<&Transform3D> {
            None
        }
    }

    fn camera(id: &str) -> Camera3D {
        Camera3D::new(id, Transform3D::default(), ProjectionParameters::default(), Viewport::default())
    }

    fn manager() -> (CameraManager, EventDispatcher) {
        let events = EventDispatcher::new(16);
        (CameraManager::new(&CameraConfig::default(), &events), events)
    }

    #[test]
    fn test_first_camera_becomes_active() {
        let (mut cameras, _events) = manager();
        assert!(cameras.active_camera().is_none());
        cameras.add(camera("a"));
        cameras.add(camera("b"));
        assert_eq!(cameras.active_camera().map(Camera3D::id), Some("a"));
    }

    #[test]
    fn test_no_match_keeps_active_camera() {
        let (mut cameras, _events) = manager();
        cameras.add(camera("a"));
        cameras.add(camera("b"));
        assert!(cameras.set_active_camera(|c| c.id() == "b"));
        assert!(!cameras.set_active_camera(|c| c.id() == "zzz"));
        assert_eq!(cameras.active_camera().map(Camera3D::id), Some("b"));
    }

    #[test]
    fn test_cycle_wraps() {
        let (mut cameras, _events) = manager();
        cameras.cycle();
        for id in ["a", "b", "c"] {
            cameras.add(camera(id));
        }
        let mut seen = Vec::new();
        for _ in 0..4 {
            cameras.cycle();
            seen.push(cameras.active_camera().map(|c| c.id().to_string()).unwrap());
        }
        assert_eq!(seen, vec!["b", "c", "a", "b"]);
    }

    #[test]
    fn test_remove_keeps_active_in_list() {
        let (mut cameras, _events) = manager();
        for id in ["a", "b", "c"] {
            cameras.add(camera(id));
        }
        cameras.set_active_camera(|c| c.id() == "c");
        cameras.remove("a");
        assert_eq!(cameras.active_camera().map(Camera3D::id), Some("c"));
        cameras.remove("c");
        assert_eq!(cameras.active_camera().map(Camera3D::id), Some("b"));
        cameras.remove("b");
        assert!(cameras.active_camera().is_none());
        assert!(cameras.remove("b").is_none());
    }

    #[test]
    fn test_commands_apply_on_update() {
        let (mut cameras, events) = manager();
        for id in ["a", "b", "c"] {
            cameras.add(camera(id));
        }
        events
            .publish(EventData::new(EventActionType::OnCameraSetActive, EventCategoryType::Camera).with_text("c"))
            .unwrap();
        events
            .publish(EventData::new(EventActionType::OnCameraCycle, EventCategoryType::Camera))
            .unwrap();
        events.flush();
        cameras.update(&GameTime::new(), &NoInput, &events, &Empty);
        assert_eq!(cameras.active_camera().map(Camera3D::id), Some("a"));
    }

    #[test]
    fn test_only_active_camera_receives_input() {
        let (mut cameras, events) = manager();
        let rig = || Box::new(FlightCameraController::new("fly", MoveKeys::wasd(), MoveSpeeds::default()));
        cameras.add(camera("a").with_controller(rig()));
        cameras.add(camera("b").with_controller(rig()));

        let mut input = InputState::new();
        input.press(KeyCode::W);
        let mut time = GameTime::new();
        time.advance(0.1);
        cameras.update(&time, &input, &events, &Empty);

        let positions: HashMap<&str, Vec3> = cameras.iter().map(|c| (c.id(), c.actor.transform.translation)).collect();
        assert!(positions["a"].z < 0.0);
        assert_eq!(positions["b"], Vec3::zeros());
    }

    #[test]
    fn test_draw_cameras_sorted_by_depth() {
        let (mut cameras, _events) = manager();
        cameras.add(camera("top").with_draw_depth(2.0));
        cameras.add(camera("hidden").with_draw_active(false));
        cameras.add(camera("base").with_draw_depth(0.5));
        let ids: Vec<&str> = cameras.draw_cameras().into_iter().map(Camera3D::id).collect();
        assert_eq!(ids, vec!["base", "top"]);
    }
}
