//! Event system for decoupled subsystems
//!
//! Key principles:
//! - Events are immutable once built and routed by category
//! - Publishing is deferred: events queue up and are flushed once per tick
//! - Registration system (only handlers subscribed to a category are notified)
//! - Publishing to a category nobody listens to is not an error

mod dispatcher;
mod inbox;
mod pausable;

pub use dispatcher::{EventDispatcher, EventError, EventHandler, SharedHandler, SubscriptionId};
pub use inbox::EventInbox;
pub use pausable::PausableComponent;

use crate::foundation::math::Vec3;

/// Routing key events are published and subscribed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategoryType {
    /// Menu shown/hidden, game started/paused
    Menu,
    /// Camera switching
    Camera,
    /// Non-positional sound cues
    Sound2D,
    /// Positional sound cues
    Sound3D,
    /// Player state changes (health, zones, pickups)
    Player,
    /// Debug overlay toggles
    Debug,
    /// Requests to add actors at the next tick boundary
    SystemAdd,
    /// Requests to remove actors at the next tick boundary
    SystemRemove,
    /// Money changes
    Cash,
    /// Customer queue changes
    Customer,
}

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventActionType {
    /// Start or resume play
    OnStart,
    /// Pause play
    OnPause,
    /// Restart the current scene
    OnRestart,
    /// Leave the application
    OnExit,
    /// Select a camera by id (payload: camera id)
    OnCameraSetActive,
    /// Advance to the next camera
    OnCameraCycle,
    /// Play a sound cue (payload: cue name)
    OnPlay,
    /// Stop a sound cue (payload: cue name)
    OnStop,
    /// Toggle something on or off
    OnToggle,
    /// Change a progress value (payload: controller id, delta)
    OnHealthDelta,
    /// Set a progress value (payload: controller id, value)
    OnProgressSet,
    /// An actor entered a zone (payload: zone id)
    OnZoneEnter,
    /// An actor collected a pickup (payload: pickup id)
    OnPickup,
    /// Add an actor (payload: archetype id, new actor id)
    OnAddActor,
    /// Remove an actor (payload: actor id)
    OnRemoveActor,
    /// Money was collected
    OnMoneyClicked,
    /// Money was spent
    OnMoneySpent,
    /// The customer at the head of the queue changed
    OnCustomerChanged,
}

/// A positional event argument
#[derive(Debug, Clone, PartialEq)]
pub enum EventArg {
    /// String value, usually an id
    Text(String),
    /// Integer value
    Int(i32),
    /// Floating-point value
    Float(f32),
    /// Boolean value
    Bool(bool),
    /// Vector value
    Vector(Vec3),
}

/// Immutable event message
///
/// Built once with the builder methods and never mutated after publishing.
#[derive(Debug, Clone, PartialEq)]
pub struct EventData {
    action: EventActionType,
    category: EventCategoryType,
    sender: Option<String>,
    payload: Vec<EventArg>,
}

impl EventData {
    /// Create an event with no sender and no payload
    pub fn new(action: EventActionType, category: EventCategoryType) -> Self {
        Self {
            action,
            category,
            sender: None,
            payload: Vec::new(),
        }
    }

    /// Set the id of the sender (builder pattern)
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Append a payload argument (builder pattern)
    pub fn with_arg(mut self, arg: EventArg) -> Self {
        self.payload.push(arg);
        self
    }

    /// Append a text payload argument (builder pattern)
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_arg(EventArg::Text(text.into()))
    }

    /// What happened
    pub fn action(&self) -> EventActionType {
        self.action
    }

    /// Routing category
    pub fn category(&self) -> EventCategoryType {
        self.category
    }

    /// Sender id, if any
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// All payload arguments in order
    pub fn payload(&self) -> &[EventArg] {
        &self.payload
    }

    /// Payload argument at `index`
    pub fn arg(&self, index: usize) -> Option<&EventArg> {
        self.payload.get(index)
    }

    /// Text argument at `index`, if present and of that type
    pub fn text(&self, index: usize) -> Option<&str> {
        match self.arg(index) {
            Some(EventArg::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Integer argument at `index`, if present and of that type
    pub fn int(&self, index: usize) -> Option<i32> {
        match self.arg(index) {
            Some(EventArg::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Numeric argument at `index` as `f32`; integers are widened
    pub fn float(&self, index: usize) -> Option<f32> {
        match self.arg(index) {
            Some(EventArg::Float(value)) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            Some(EventArg::Int(value)) => Some(*value as f32),
            _ => None,
        }
    }
}
