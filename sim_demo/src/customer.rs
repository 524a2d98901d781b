//! Customer queue served by `OnCustomerChanged` events

use std::collections::{HashMap, VecDeque};

use rand::Rng;
use sim_core::events::{EventActionType, EventArg, EventCategoryType, EventData, EventDispatcher, EventInbox};
use sim_core::foundation::math::Vec3;
use sim_core::scene::ObjectManager;

/// Where served customers are sent
pub fn served_position() -> Vec3 {
    Vec3::new(40.0, 40.0, 40.0)
}

/// Queue of customer actors waiting to be served
///
/// Each `(OnCustomerChanged, Customer)` event serves the head of the queue:
/// the customer's actor is moved out of the shop, it leaves the queue and the
/// service progress bar is set back to zero.
#[derive(Debug)]
pub struct CustomerManager {
    queue: VecDeque<String>,
    wallets: HashMap<String, u32>,
    served: Vec<String>,
    progress_id: String,
    events: EventDispatcher,
    requests: EventInbox,
}

impl CustomerManager {
    /// Create an empty queue listening on `events`
    ///
    /// `progress_id` names the progress controller reset for every new customer.
    pub fn new(events: &EventDispatcher, progress_id: impl Into<String>) -> Self {
        Self {
            queue: VecDeque::new(),
            wallets: HashMap::new(),
            served: Vec::new(),
            progress_id: progress_id.into(),
            events: events.clone(),
            requests: EventInbox::new(events, EventCategoryType::Customer),
        }
    }

    /// Put a customer at the back of the queue with random cash in `[1, 400)`
    pub fn enqueue<R: Rng>(&mut self, id: impl Into<String>, rng: &mut R) -> u32 {
        let id = id.into();
        let cash = rng.gen_range(1..400);
        log::debug!("Customer '{}' joins the queue with {}", id, cash);
        self.wallets.insert(id.clone(), cash);
        self.queue.push_back(id);
        cash
    }

    /// Cash a customer arrived with
    pub fn cash_of(&self, id: &str) -> Option<u32> {
        self.wallets.get(id).copied()
    }

    /// Customer at the head of the queue
    pub fn head(&self) -> Option<&str> {
        self.queue.front().map(String::as_str)
    }

    /// Customers still waiting
    pub fn waiting(&self) -> usize {
        self.queue.len()
    }

    /// Customers served so far, in order
    pub fn served(&self) -> &[String] {
        &self.served
    }

    /// Serve one customer per queued request; returns how many were served
    pub fn update(&mut self, objects: &mut ObjectManager) -> usize {
        let mut count = 0;
        for event in self.requests.drain() {
            if event.action() != EventActionType::OnCustomerChanged {
                continue;
            }
            let Some(id) = self.queue.pop_front() else {
                log::debug!("Customer change requested with an empty queue");
                continue;
            };
            match objects.get_mut(&id) {
                Some(actor) => actor.transform.translation = served_position(),
                None => log::warn!("Served customer '{}' has no actor", id),
            }
            log::info!("Served '{}' ({} waiting)", id, self.queue.len());
            self.served.push(id);
            self.reset_progress();
            count += 1;
        }
        count
    }

    fn reset_progress(&self) {
        let reset = EventData::new(EventActionType::OnProgressSet, EventCategoryType::Player)
            .with_sender("customers")
            .with_text(self.progress_id.as_str())
            .with_arg(EventArg::Int(0));
        if let Err(e) = self.events.publish(reset) {
            log::warn!("Progress '{}' not reset: {}", self.progress_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sim_core::actor::{Actor, ActorType};
    use sim_core::controllers::UiProgressController;
    use sim_core::core::SceneConfig;
    use sim_core::events::EventData;
    use sim_core::foundation::math::Transform3D;

    #[test]
    fn test_serves_head_and_moves_it_away() {
        let events = EventDispatcher::new(8);
        let mut objects = ObjectManager::new(&SceneConfig::default(), &events);
        let mut customers = CustomerManager::new(&events, "service");
        let mut rng = StdRng::seed_from_u64(7);
        for id in ["anne", "bob"] {
            objects.add(Actor::new(id, ActorType::Customer, Transform3D::default())).unwrap();
            let cash = customers.enqueue(id, &mut rng);
            assert!((1..400).contains(&cash));
        }

        events.publish(EventData::new(EventActionType::OnCustomerChanged, EventCategoryType::Customer)).unwrap();
        events.flush();
        assert_eq!(customers.update(&mut objects), 1);

        assert_eq!(customers.served(), ["anne".to_string()]);
        assert_eq!(customers.head(), Some("bob"));
        assert_eq!(objects.get("anne").unwrap().transform.translation, served_position());
        assert_eq!(objects.get("bob").unwrap().transform.translation, Vec3::zeros());
    }

    #[test]
    fn test_new_customer_resets_service_progress() {
        let events = EventDispatcher::new(8);
        let mut objects = ObjectManager::new(&SceneConfig::default(), &events);
        let mut customers = CustomerManager::new(&events, "service");
        let progress = UiProgressController::new("service", &events, 60, 100);
        let other = UiProgressController::new("health", &events, 60, 100);
        let mut rng = StdRng::seed_from_u64(3);
        objects.add(Actor::new("carol", ActorType::Customer, Transform3D::default())).unwrap();
        customers.enqueue("carol", &mut rng);

        events.publish(EventData::new(EventActionType::OnCustomerChanged, EventCategoryType::Customer)).unwrap();
        events.flush();
        assert_eq!(customers.update(&mut objects), 1);
        assert_eq!(progress.current(), 60);

        events.flush();
        assert_eq!(progress.current(), 0);
        assert_eq!(other.current(), 60);
    }

    #[test]
    fn test_empty_queue_ignores_request() {
        let events = EventDispatcher::new(8);
        let mut objects = ObjectManager::new(&SceneConfig::default(), &events);
        let mut customers = CustomerManager::new(&events, "service");
        events.publish(EventData::new(EventActionType::OnCustomerChanged, EventCategoryType::Customer)).unwrap();
        events.flush();
        assert_eq!(customers.update(&mut objects), 0);
        assert!(customers.served().is_empty());
    }
}
