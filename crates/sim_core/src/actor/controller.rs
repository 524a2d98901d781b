//! Controller trait and per-actor controller list
//!
//! A controller is a small, named behavior unit that mutates the actor it is
//! attached to once per tick. Actors run their controllers in attachment order
//! and only while the controller is in [`PlayStatus::Play`].

use std::fmt;

use super::Actor;
use crate::events::{EventData, EventDispatcher};
use crate::foundation::math::Transform3D;
use crate::foundation::time::GameTime;
use crate::input::InputSource;

/// Kind of controller, used to toggle groups of controllers by predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerType {
    /// Constant rotation
    Rotation,
    /// Sinusoidal translation
    SineTranslation,
    /// Sinusoidal color interpolation
    SineColor,
    /// Follows a keyframed curve
    Track,
    /// Camera constrained to a line segment
    Rail,
    /// First-person camera
    FirstPerson,
    /// Free flight camera
    Flight,
    /// Camera following a target from behind
    ThirdPerson,
    /// Sweeping security camera
    Security,
    /// Switches the active camera after a delay
    CameraElapsedTime,
    /// Stages player movement for the collision step
    PlayerInput,
    /// Drives a progress bar from events
    UIProgress,
    /// Removes an actor after a lifetime
    UIExpire,
    /// Spins and scales an actor before removing it
    UIRotationScaleExpire,
}

/// Whether a controller runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayStatus {
    /// Runs every tick
    #[default]
    Play,
    /// Skipped, state kept
    Pause,
    /// Skipped, state reset
    Stop,
}

/// Read-only view of other actors, keyed by id
pub trait ActorLookup {
    /// Transform of the actor with `id`, if it exists
    fn transform_of(&self, id: &str) -> Option<&Transform3D>;
}

/// Everything a controller may read during an update
pub struct UpdateContext<'a> {
    /// Time for the current tick
    pub time: &'a GameTime,
    /// Input sampled for the current tick
    pub input: &'a dyn InputSource,
    /// Event bus
    pub events: &'a EventDispatcher,
    /// Other actors, when the caller can provide them
    pub scene: Option<&'a dyn ActorLookup>,
}

impl<'a> UpdateContext<'a> {
    /// Create a context without scene access
    pub fn new(time: &'a GameTime, input: &'a dyn InputSource, events: &'a EventDispatcher) -> Self {
        Self {
            time,
            input,
            events,
            scene: None,
        }
    }

    /// Attach scene access (builder pattern)
    pub fn with_scene(mut self, scene: &'a dyn ActorLookup) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Same context with a different input source
    pub fn with_input(&self, input: &'a dyn InputSource) -> Self {
        Self {
            time: self.time,
            input,
            events: self.events,
            scene: self.scene,
        }
    }

    /// Look up another actor's transform
    pub fn transform_of(&self, id: &str) -> Option<&'a Transform3D> {
        self.scene.and_then(|scene| scene.transform_of(id))
    }

    /// Publish an event; a full queue is logged by the dispatcher and otherwise ignored
    pub fn publish(&self, event: EventData) {
        if let Err(err) = self.events.publish(event) {
            log::debug!("Controller event dropped: {}", err);
        }
    }
}

/// Fields every controller carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerCore {
    /// Controller id, unique within its actor
    pub id: String,
    /// Kind of controller
    pub controller_type: ControllerType,
    /// Current play status
    pub play_status: PlayStatus,
}

impl ControllerCore {
    /// Create a playing controller core
    pub fn new(id: impl Into<String>, controller_type: ControllerType) -> Self {
        Self {
            id: id.into(),
            controller_type,
            play_status: PlayStatus::Play,
        }
    }
}

/// Per-actor behavior unit
pub trait Controller {
    /// Shared controller fields
    fn core(&self) -> &ControllerCore;

    /// Shared controller fields, mutable
    fn core_mut(&mut self) -> &mut ControllerCore;

    /// Advance this controller by one tick, mutating only `actor`
    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor);

    /// Deep copy for actor duplication
    fn duplicate(&self) -> Box<dyn Controller>;

    /// Return to the initial state; called when the controller is stopped
    fn reset(&mut self) {}

    /// Controller id
    fn id(&self) -> &str {
        &self.core().id
    }

    /// Kind of controller
    fn controller_type(&self) -> ControllerType {
        self.core().controller_type
    }

    /// Current play status
    fn play_status(&self) -> PlayStatus {
        self.core().play_status
    }

    /// Change the play status; stopping resets the controller
    fn set_play_status(&mut self, status: PlayStatus) {
        self.core_mut().play_status = status;
        if status == PlayStatus::Stop {
            self.reset();
        }
    }
}

impl fmt::Debug for dyn Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("id", &self.id())
            .field("type", &self.controller_type())
            .field("status", &self.play_status())
            .finish()
    }
}

/// Ordered, append-only list of controllers owned by one actor
#[derive(Debug, Default)]
pub struct ControllerList {
    controllers: Vec<Box<dyn Controller>>,
}

impl ControllerList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a controller; it runs after every controller already attached
    pub fn push(&mut self, controller: Box<dyn Controller>) {
        self.controllers.push(controller);
    }

    /// Run every playing controller in attachment order
    pub fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        for controller in &mut self.controllers {
            if controller.play_status() == PlayStatus::Play {
                controller.update(ctx, actor);
            }
        }
    }

    /// Set the play status of every controller matching `predicate`; returns how many changed
    pub fn set_play_status<P>(&mut self, status: PlayStatus, predicate: P) -> usize
    where
        P: Fn(&dyn Controller) -> bool,
    {
        let mut changed = 0;
        for controller in &mut self.controllers {
            if predicate(&**controller) {
                controller.set_play_status(status);
                changed += 1;
            }
        }
        changed
    }

    /// First controller matching `predicate`
    pub fn find<P>(&self, predicate: P) -> Option<&dyn Controller>
    where
        P: Fn(&dyn Controller) -> bool,
    {
        self.controllers
            .iter()
            .map(|controller| &**controller)
            .find(|controller| predicate(*controller))
    }

    /// Iterate controllers in attachment order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Controller> {
        self.controllers.iter().map(|controller| &**controller)
    }

    /// Number of attached controllers
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Whether no controllers are attached
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub(crate) fn into_controllers(self) -> Vec<Box<dyn Controller>> {
        self.controllers
    }

    /// Deep copy of every controller
    pub fn duplicate(&self) -> Self {
        Self {
            controllers: self.controllers.iter().map(|controller| controller.duplicate()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorType;
    use crate::foundation::math::Vec3;
    use crate::input::NoInput;

    /// Moves +1 on x per tick and records how often it was reset
    #[derive(Clone)]
    struct Nudge {
        core: ControllerCore,
        resets: u32,
    }

    impl Nudge {
        fn new(id: &str) -> Self {
            Self {
                core: ControllerCore::new(id, ControllerType::Rotation),
                resets: 0,
            }
        }
    }

    impl Controller for Nudge {
        fn core(&self) -> &ControllerCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut ControllerCore {
            &mut self.core
        }

        fn update(&mut self, _ctx: &UpdateContext<'_>, actor: &mut Actor) {
            actor.transform.translate_by(Vec3::new(1.0, 0.0, 0.0));
        }

        fn duplicate(&self) -> Box<dyn Controller> {
            Box::new(self.clone())
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    #[test]
    fn test_only_playing_controllers_run() {
        let time = GameTime::new();
        let events = EventDispatcher::new(4);
        let ctx = UpdateContext::new(&time, &NoInput, &events);
        let mut actor = Actor::new("a", ActorType::Decorator, Transform3D::default());

        let mut list = ControllerList::new();
        list.push(Box::new(Nudge::new("first")));
        list.push(Box::new(Nudge::new("second")));
        list.update(&ctx, &mut actor);
        assert!((actor.transform.translation.x - 2.0).abs() < f32::EPSILON);

        assert_eq!(list.set_play_status(PlayStatus::Pause, |c| c.id() == "second"), 1);
        list.update(&ctx, &mut actor);
        assert!((actor.transform.translation.x - 3.0).abs() < f32::EPSILON);
        assert_eq!(list.find(|c| c.id() == "second").map(|c| c.play_status()), Some(PlayStatus::Pause));
    }

    #[test]
    fn test_stop_resets_controller() {
        let mut nudge = Nudge::new("n");
        nudge.set_play_status(PlayStatus::Pause);
        assert_eq!(nudge.resets, 0);
        nudge.set_play_status(PlayStatus::Stop);
        assert_eq!(nudge.resets, 1);
    }

    #[test]
    fn test_duplicate_keeps_order() {
        let mut list = ControllerList::new();
        list.push(Box::new(Nudge::new("a")));
        list.push(Box::new(Nudge::new("b")));
        let copy = list.duplicate();
        let ids: Vec<&str> = copy.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
