//! Buffered subscriber for subsystems that act on events during their own update

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{EventCategoryType, EventData, EventDispatcher, EventHandler, SubscriptionId};

#[derive(Default)]
struct InboxBuffer {
    events: VecDeque<EventData>,
}

impl EventHandler for InboxBuffer {
    fn on_event(&mut self, event: &EventData) {
        self.events.push_back(event.clone());
    }
}

/// Collects the events of one category until the owner drains them
///
/// Dropping the inbox unsubscribes it.
pub struct EventInbox {
    category: EventCategoryType,
    dispatcher: EventDispatcher,
    subscription: SubscriptionId,
    buffer: Rc<RefCell<InboxBuffer>>,
}

impl EventInbox {
    /// Subscribe a new inbox to `category`
    pub fn new(dispatcher: &EventDispatcher, category: EventCategoryType) -> Self {
        let buffer = Rc::new(RefCell::new(InboxBuffer::default()));
        let subscription = dispatcher.subscribe(category, buffer.clone());
        Self {
            category,
            dispatcher: dispatcher.clone(),
            subscription,
            buffer,
        }
    }

    /// Category this inbox listens to
    pub fn category(&self) -> EventCategoryType {
        self.category
    }

    /// Take every buffered event in delivery order
    pub fn drain(&self) -> Vec<EventData> {
        self.buffer.borrow_mut().events.drain(..).collect()
    }

    /// Number of buffered events
    pub fn len(&self) -> usize {
        self.buffer.borrow().events.len()
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().events.is_empty()
    }
}

impl Clone for EventInbox {
    /// A clone is a fresh, empty subscription to the same category
    fn clone(&self) -> Self {
        Self::new(&self.dispatcher, self.category)
    }
}

impl Drop for EventInbox {
    fn drop(&mut self) {
        self.dispatcher.unsubscribe(self.subscription);
    }
}

impl std::fmt::Debug for EventInbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventInbox")
            .field("category", &self.category)
            .field("buffered", &self.len())
            .finish()
    }
}
