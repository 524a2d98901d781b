//! Menu-driven pause state shared by managers

use std::cell::Cell;
use std::rc::Rc;

use super::{EventActionType, EventCategoryType, EventDispatcher, SubscriptionId};
use crate::actor::StatusFlags;

/// Tracks whether its owner should update and draw
///
/// Listens to the `Menu` category: `OnStart` sets the status to drawn and
/// updating, `OnPause` turns everything off. Other menu actions are ignored.
pub struct PausableComponent {
    status: Rc<Cell<StatusFlags>>,
    dispatcher: EventDispatcher,
    subscription: SubscriptionId,
}

impl PausableComponent {
    /// Subscribe to menu events with an initial status
    pub fn new(dispatcher: &EventDispatcher, initial: StatusFlags) -> Self {
        let status = Rc::new(Cell::new(initial));
        let shared = Rc::clone(&status);
        let subscription = dispatcher.subscribe_fn(EventCategoryType::Menu, move |event| {
            match event.action() {
                EventActionType::OnStart => shared.set(StatusFlags::DRAWN | StatusFlags::UPDATE),
                EventActionType::OnPause => shared.set(StatusFlags::OFF),
                _ => {}
            }
        });
        Self {
            status,
            dispatcher: dispatcher.clone(),
            subscription,
        }
    }

    /// Current status
    pub fn status(&self) -> StatusFlags {
        self.status.get()
    }

    /// Override the status directly
    pub fn set_status(&self, status: StatusFlags) {
        self.status.set(status);
    }

    /// Whether the owner should run its update
    pub fn is_updating(&self) -> bool {
        self.status.get().contains(StatusFlags::UPDATE)
    }

    /// Whether the owner should draw
    pub fn is_drawn(&self) -> bool {
        self.status.get().contains(StatusFlags::DRAWN)
    }
}

impl Drop for PausableComponent {
    fn drop(&mut self) {
        self.dispatcher.unsubscribe(self.subscription);
    }
}

impl std::fmt::Debug for PausableComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PausableComponent")
            .field("status", &self.status.get())
            .finish()
    }
}
