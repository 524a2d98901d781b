//! Deferred publish/subscribe dispatcher
//!
//! The dispatcher is a cheap, cloneable handle around shared single-threaded
//! state. Subsystems keep a clone instead of reaching for a global, and
//! handlers may publish, subscribe or unsubscribe while a flush is running.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;

use super::{EventCategoryType, EventData};
use crate::core::config::EventConfig;

/// Event handler trait
pub trait EventHandler {
    /// Handle a delivered event
    fn on_event(&mut self, event: &EventData);
}

/// Shared handle to a subscribed handler
pub type SharedHandler = Rc<RefCell<dyn EventHandler>>;

/// Identifies one subscription for later removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Event dispatch errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The queue is saturated until the next flush
    #[error("Event queue full (capacity {capacity}), event dropped")]
    QueueFull {
        /// Configured queue capacity
        capacity: usize,
    },
}

struct FnHandler<F>(F);

impl<F: FnMut(&EventData)> EventHandler for FnHandler<F> {
    fn on_event(&mut self, event: &EventData) {
        (self.0)(event);
    }
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    handler: SharedHandler,
}

struct DispatcherState {
    capacity: usize,
    queue: VecDeque<EventData>,
    subscribers: HashMap<EventCategoryType, Vec<Subscriber>>,
    live: HashSet<SubscriptionId>,
    next_id: u64,
    flushing: bool,
}

/// Deferred, category-routed event bus
///
/// `publish` only enqueues. `flush` is called once per tick and delivers the
/// queued events in FIFO order to the handlers subscribed to each event's
/// category when the flush started. Events published by handlers during a
/// flush wait for the next one.
#[derive(Clone)]
pub struct EventDispatcher {
    state: Rc<RefCell<DispatcherState>>,
}

impl EventDispatcher {
    /// Create a dispatcher with the given queue capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(DispatcherState {
                capacity: capacity.max(1),
                queue: VecDeque::with_capacity(capacity.max(1)),
                subscribers: HashMap::new(),
                live: HashSet::new(),
                next_id: 0,
                flushing: false,
            })),
        }
    }

    /// Create a dispatcher from configuration
    pub fn from_config(config: &EventConfig) -> Self {
        Self::new(config.queue_capacity)
    }

    /// Register a handler for a category
    pub fn subscribe(&self, category: EventCategoryType, handler: SharedHandler) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.live.insert(id);
        state
            .subscribers
            .entry(category)
            .or_default()
            .push(Subscriber { id, handler });
        log::debug!("Subscribed {:?} to {:?}", id, category);
        id
    }

    /// Register a closure for a category
    pub fn subscribe_fn<F>(&self, category: EventCategoryType, handler: F) -> SubscriptionId
    where
        F: FnMut(&EventData) + 'static,
    {
        self.subscribe(category, Rc::new(RefCell::new(FnHandler(handler))))
    }

    /// Remove a subscription; returns `false` if it was already gone
    ///
    /// Takes effect immediately, including for the remainder of a running flush.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.live.remove(&id) {
            return false;
        }
        for subscribers in state.subscribers.values_mut() {
            subscribers.retain(|subscriber| subscriber.id != id);
        }
        log::debug!("Unsubscribed {:?}", id);
        true
    }

    /// Queue an event for the next flush
    pub fn publish(&self, event: EventData) -> Result<(), EventError> {
        let mut state = self.state.borrow_mut();
        if state.queue.len() >= state.capacity {
            log::warn!(
                "Dropping {:?}/{:?}: event queue full ({})",
                event.category(),
                event.action(),
                state.capacity
            );
            return Err(EventError::QueueFull { capacity: state.capacity });
        }
        log::trace!("Published {:?}/{:?}", event.category(), event.action());
        state.queue.push_back(event);
        Ok(())
    }

    /// Deliver every queued event; returns the number of handler invocations
    pub fn flush(&self) -> usize {
        let (events, snapshot) = {
            let mut state = self.state.borrow_mut();
            if state.flushing {
                log::warn!("Nested flush ignored");
                return 0;
            }
            state.flushing = true;
            let events: Vec<EventData> = state.queue.drain(..).collect();
            (events, state.subscribers.clone())
        };

        let mut deliveries = 0;
        for event in &events {
            let Some(subscribers) = snapshot.get(&event.category()) else {
                continue;
            };
            for subscriber in subscribers {
                if !self.is_subscribed(subscriber.id) {
                    continue;
                }
                subscriber.handler.borrow_mut().on_event(event);
                deliveries += 1;
            }
        }

        self.state.borrow_mut().flushing = false;
        if !events.is_empty() {
            log::trace!("Flushed {} events with {} deliveries", events.len(), deliveries);
        }
        deliveries
    }

    /// Whether a subscription is still registered
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.state.borrow().live.contains(&id)
    }

    /// Number of handlers registered for a category
    pub fn subscriber_count(&self, category: EventCategoryType) -> usize {
        self.state
            .borrow()
            .subscribers
            .get(&category)
            .map_or(0, Vec::len)
    }

    /// Number of events waiting for the next flush
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Configured queue capacity
    pub fn capacity(&self) -> usize {
        self.state.borrow().capacity
    }

    /// Drop all queued events (useful for scene reloads)
    pub fn clear(&self) {
        self.state.borrow_mut().queue.clear();
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::from_config(&EventConfig::default())
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("EventDispatcher")
            .field("capacity", &state.capacity)
            .field("pending", &state.queue.len())
            .field("subscriptions", &state.live.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventActionType, EventArg};

    fn recorder(dispatcher: &EventDispatcher, category: EventCategoryType) -> Rc<RefCell<Vec<EventData>>> {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        dispatcher.subscribe_fn(category, move |event| sink.borrow_mut().push(event.clone()));
        received
    }

    fn numbered(category: EventCategoryType, n: i32) -> EventData {
        EventData::new(EventActionType::OnToggle, category).with_arg(EventArg::Int(n))
    }

    #[test]
    fn test_publish_is_deferred_until_flush() {
        let dispatcher = EventDispatcher::new(16);
        let received = recorder(&dispatcher, EventCategoryType::Menu);

        dispatcher
            .publish(EventData::new(EventActionType::OnPause, EventCategoryType::Menu))
            .unwrap();
        assert!(received.borrow().is_empty());
        assert_eq!(dispatcher.pending(), 1);

        assert_eq!(dispatcher.flush(), 1);
        assert_eq!(received.borrow().len(), 1);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_per_category_fifo_exactly_once() {
        let dispatcher = EventDispatcher::new(64);
        let camera = recorder(&dispatcher, EventCategoryType::Camera);
        let player = recorder(&dispatcher, EventCategoryType::Player);
        let player_again = recorder(&dispatcher, EventCategoryType::Player);

        let categories = [
            EventCategoryType::Player,
            EventCategoryType::Camera,
            EventCategoryType::Player,
            EventCategoryType::Sound2D,
            EventCategoryType::Camera,
            EventCategoryType::Player,
        ];
        for (n, category) in categories.iter().enumerate() {
            dispatcher.publish(numbered(*category, n as i32)).unwrap();
        }
        dispatcher.flush();
        dispatcher.flush();

        let ids = |log: &Rc<RefCell<Vec<EventData>>>| -> Vec<i32> {
            log.borrow().iter().filter_map(|event| event.int(0)).collect()
        };
        assert_eq!(ids(&camera), vec![1, 4]);
        assert_eq!(ids(&player), vec![0, 2, 5]);
        assert_eq!(ids(&player_again), vec![0, 2, 5]);
    }

    #[test]
    fn test_no_subscribers_is_silent() {
        let dispatcher = EventDispatcher::new(4);
        dispatcher
            .publish(EventData::new(EventActionType::OnPlay, EventCategoryType::Sound3D))
            .unwrap();
        assert_eq!(dispatcher.flush(), 0);
    }

    #[test]
    fn test_queue_capacity_bounds_publish() {
        let dispatcher = EventDispatcher::new(2);
        dispatcher.publish(numbered(EventCategoryType::Debug, 0)).unwrap();
        dispatcher.publish(numbered(EventCategoryType::Debug, 1)).unwrap();
        assert_eq!(
            dispatcher.publish(numbered(EventCategoryType::Debug, 2)),
            Err(EventError::QueueFull { capacity: 2 })
        );
        dispatcher.flush();
        assert!(dispatcher.publish(numbered(EventCategoryType::Debug, 3)).is_ok());
    }

    #[test]
    fn test_subscriber_added_after_publish_still_receives() {
        let dispatcher = EventDispatcher::new(4);
        dispatcher.publish(numbered(EventCategoryType::Cash, 7)).unwrap();
        let late = recorder(&dispatcher, EventCategoryType::Cash);
        dispatcher.flush();
        assert_eq!(late.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribe_mid_flush_stops_delivery() {
        let dispatcher = EventDispatcher::new(8);
        let victim_log = Rc::new(RefCell::new(Vec::new()));

        // First handler removes the second one on the first event it sees
        let victim_id = Rc::new(RefCell::new(None::<SubscriptionId>));
        {
            let dispatcher_handle = dispatcher.clone();
            let victim_id = Rc::clone(&victim_id);
            dispatcher.subscribe_fn(EventCategoryType::Player, move |_| {
                if let Some(id) = victim_id.borrow_mut().take() {
                    dispatcher_handle.unsubscribe(id);
                }
            });
        }
        let sink = Rc::clone(&victim_log);
        let id = dispatcher.subscribe_fn(EventCategoryType::Player, move |event| {
            sink.borrow_mut().push(event.int(0));
        });
        *victim_id.borrow_mut() = Some(id);

        dispatcher.publish(numbered(EventCategoryType::Player, 0)).unwrap();
        dispatcher.publish(numbered(EventCategoryType::Player, 1)).unwrap();
        dispatcher.flush();

        assert!(victim_log.borrow().is_empty());
        assert!(!dispatcher.is_subscribed(id));
        assert_eq!(dispatcher.subscriber_count(EventCategoryType::Player), 1);
    }

    #[test]
    fn test_subscribe_during_flush_waits_for_next_flush() {
        let dispatcher = EventDispatcher::new(8);
        let late_log = Rc::new(RefCell::new(0usize));
        {
            let dispatcher_handle = dispatcher.clone();
            let late_log = Rc::clone(&late_log);
            let mut subscribed = false;
            dispatcher.subscribe_fn(EventCategoryType::Menu, move |_| {
                if !subscribed {
                    subscribed = true;
                    let late_log = Rc::clone(&late_log);
                    dispatcher_handle.subscribe_fn(EventCategoryType::Menu, move |_| {
                        *late_log.borrow_mut() += 1;
                    });
                }
            });
        }

        dispatcher.publish(numbered(EventCategoryType::Menu, 0)).unwrap();
        dispatcher.publish(numbered(EventCategoryType::Menu, 1)).unwrap();
        dispatcher.flush();
        assert_eq!(*late_log.borrow(), 0);

        dispatcher.publish(numbered(EventCategoryType::Menu, 2)).unwrap();
        dispatcher.flush();
        assert_eq!(*late_log.borrow(), 1);
    }

    #[test]
    fn test_publish_during_flush_is_deferred() {
        let dispatcher = EventDispatcher::new(8);
        let received = recorder(&dispatcher, EventCategoryType::Sound2D);
        {
            let dispatcher_handle = dispatcher.clone();
            dispatcher.subscribe_fn(EventCategoryType::Player, move |_| {
                dispatcher_handle
                    .publish(EventData::new(EventActionType::OnPlay, EventCategoryType::Sound2D))
                    .unwrap();
            });
        }

        dispatcher.publish(numbered(EventCategoryType::Player, 0)).unwrap();
        dispatcher.flush();
        assert!(received.borrow().is_empty());
        assert_eq!(dispatcher.pending(), 1);

        dispatcher.flush();
        assert_eq!(received.borrow().len(), 1);
    }
}
