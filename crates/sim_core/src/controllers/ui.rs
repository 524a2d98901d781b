//! Controllers for screen-space actors

use std::cell::RefCell;
use std::rc::Rc;

use super::expire;
use crate::actor::controller::{Controller, ControllerCore, ControllerType, UpdateContext};
use crate::actor::Actor;
use crate::events::{EventActionType, EventCategoryType, EventData, EventDispatcher, EventHandler, SubscriptionId};
use crate::foundation::math::Vec3;

/// Progress value kept up to date by the dispatcher as events are delivered
#[derive(Debug)]
struct ProgressState {
    id: String,
    current: i32,
    max: i32,
}

impl EventHandler for ProgressState {
    fn on_event(&mut self, event: &EventData) {
        if event.text(0) != Some(self.id.as_str()) {
            return;
        }
        let Some(value) = event.int(1) else {
            return;
        };
        let next = match event.action() {
            EventActionType::OnHealthDelta => self.current.saturating_add(value),
            EventActionType::OnProgressSet => value,
            _ => return,
        };
        self.current = next.clamp(0, self.max);
        log::trace!("Progress '{}' now {}/{}", self.id, self.current, self.max);
    }
}

/// Progress bar driven by Player events
///
/// `(OnHealthDelta, Player)` events carry `[Text(controller id), Int(delta)]`
/// and `(OnProgressSet, Player)` events `[Text(controller id), Int(value)]`;
/// only events naming this controller's id apply. Events fold into the value
/// as they are delivered, so nothing piles up while the actor is paused. The
/// actor's x scale tracks `current / max` relative to the scale it had when
/// the controller first ran.
pub struct UiProgressController {
    core: ControllerCore,
    state: Rc<RefCell<ProgressState>>,
    dispatcher: EventDispatcher,
    subscription: SubscriptionId,
    full_width: Option<f32>,
}

impl UiProgressController {
    /// Create a progress controller listening on `events`
    pub fn new(id: impl Into<String>, events: &EventDispatcher, start: i32, max: i32) -> Self {
        let id = id.into();
        let max = max.max(1);
        let state = ProgressState {
            id: id.clone(),
            current: start.clamp(0, max),
            max,
        };
        Self::subscribed(ControllerCore::new(id, ControllerType::UIProgress), events, state)
    }

    fn subscribed(core: ControllerCore, events: &EventDispatcher, state: ProgressState) -> Self {
        let state = Rc::new(RefCell::new(state));
        let subscription = events.subscribe(EventCategoryType::Player, state.clone());
        Self {
            core,
            state,
            dispatcher: events.clone(),
            subscription,
            full_width: None,
        }
    }

    /// Current value in `[0, max]`
    pub fn current(&self) -> i32 {
        self.state.borrow().current
    }

    /// Fraction of the bar filled
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f32 {
        let state = self.state.borrow();
        state.current as f32 / state.max as f32
    }
}

impl Clone for UiProgressController {
    /// A clone starts from the same value on a subscription of its own
    fn clone(&self) -> Self {
        let state = self.state.borrow();
        let copy = ProgressState {
            id: state.id.clone(),
            current: state.current,
            max: state.max,
        };
        let mut clone = Self::subscribed(self.core.clone(), &self.dispatcher, copy);
        clone.full_width = self.full_width;
        clone
    }
}

impl Drop for UiProgressController {
    fn drop(&mut self) {
        self.dispatcher.unsubscribe(self.subscription);
    }
}

impl std::fmt::Debug for UiProgressController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiProgressController")
            .field("core", &self.core)
            .field("state", &*self.state.borrow())
            .field("full_width", &self.full_width)
            .finish()
    }
}

impl Controller for UiProgressController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, _ctx: &UpdateContext<'_>, actor: &mut Actor) {
        let full_width = *self.full_width.get_or_insert(actor.transform.scale.x);
        actor.transform.scale.x = full_width * self.fraction();
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }
}

/// Removes its actor after a fixed lifetime
#[derive(Debug, Clone)]
pub struct UiExpireController {
    core: ControllerCore,
    lifetime_ms: f32,
    elapsed_ms: f32,
    expired: bool,
}

impl UiExpireController {
    /// Create an expiring controller
    pub fn new(id: impl Into<String>, lifetime_ms: f32) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::UIExpire),
            lifetime_ms,
            elapsed_ms: 0.0,
            expired: false,
        }
    }
}

impl Controller for UiExpireController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        if self.expired {
            return;
        }
        self.elapsed_ms += ctx.time.elapsed_ms();
        if self.elapsed_ms >= self.lifetime_ms {
            self.expired = true;
            expire(actor, ctx);
        }
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        let mut copy = self.clone();
        copy.reset();
        Box::new(copy)
    }

    fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.expired = false;
    }
}

/// Spins and grows (or shrinks) its actor, removing it after a lifetime or once it vanishes
#[derive(Debug, Clone)]
pub struct UiRotationScaleExpireController {
    core: ControllerCore,
    rotation_rate: f32,
    scale_rate: f32,
    lifetime_ms: f32,
    elapsed_ms: f32,
    expired: bool,
}

impl UiRotationScaleExpireController {
    /// Create the controller; `rotation_rate` in degrees per second about Z,
    /// `scale_rate` as a fractional change per second
    pub fn new(id: impl Into<String>, rotation_rate: f32, scale_rate: f32, lifetime_ms: f32) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::UIRotationScaleExpire),
            rotation_rate,
            scale_rate,
            lifetime_ms,
            elapsed_ms: 0.0,
            expired: false,
        }
    }
}

impl Controller for UiRotationScaleExpireController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        if self.expired {
            return;
        }
        let seconds = ctx.time.elapsed_seconds();
        self.elapsed_ms += ctx.time.elapsed_ms();
        actor.transform.rotate_by(Vec3::new(0.0, 0.0, self.rotation_rate * seconds));
        let factor = (1.0 + self.scale_rate * seconds).max(0.0);
        actor.transform.scale *= factor;

        let vanished = actor.transform.scale.iter().any(|s| s.abs() <= f32::EPSILON);
        if vanished || self.elapsed_ms >= self.lifetime_ms {
            self.expired = true;
            expire(actor, ctx);
        }
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        let mut copy = self.clone();
        copy.reset();
        Box::new(copy)
    }

    fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.expired = false;
    }
}
