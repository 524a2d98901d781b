//! Till driven by Cash events and the G/H keys

use std::cell::RefCell;
use std::rc::Rc;

use sim_core::actor::StatusFlags;
use sim_core::events::{
    EventActionType, EventCategoryType, EventData, EventDispatcher, EventHandler, PausableComponent, SubscriptionId,
};
use sim_core::input::{InputSource, KeyCode};

/// Amount added or removed per cash event or key press
pub const CASH_STEP: i32 = 20;

/// Key that adds [`CASH_STEP`] to the balance
pub const ADD_KEY: KeyCode = KeyCode::G;

/// Key that removes [`CASH_STEP`] from the balance
pub const SUBTRACT_KEY: KeyCode = KeyCode::H;

/// Note and coin denominations held in the drawer, largest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CashType {
    /// 50 note
    FiftyCash = 0,
    /// 20 note
    TwentyCash = 1,
    /// 10 note
    TenCash = 2,
    /// 5 note
    FiveCash = 3,
    /// 2 coin
    TwoEuro = 4,
    /// 1 coin
    OneEuro = 5,
    /// 50 cent coin
    FiftyCent = 6,
    /// 20 cent coin
    TwentyCent = 7,
    /// 10 cent coin
    TenCent = 8,
    /// 5 cent coin
    FiveCent = 9,
}

impl CashType {
    /// Every denomination, largest first
    pub const ALL: [Self; 10] = [
        Self::FiftyCash,
        Self::TwentyCash,
        Self::TenCash,
        Self::FiveCash,
        Self::TwoEuro,
        Self::OneEuro,
        Self::FiftyCent,
        Self::TwentyCent,
        Self::TenCent,
        Self::FiveCent,
    ];

    /// Face value in cents
    pub fn cents(self) -> u32 {
        match self {
            Self::FiftyCash => 5000,
            Self::TwentyCash => 2000,
            Self::TenCash => 1000,
            Self::FiveCash => 500,
            Self::TwoEuro => 200,
            Self::OneEuro => 100,
            Self::FiftyCent => 50,
            Self::TwentyCent => 20,
            Self::TenCent => 10,
            Self::FiveCent => 5,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Opening float per denomination, in cents
const OPENING_DRAWER: [u32; 10] = [5000, 10_000, 5000, 1500, 1000, 700, 250, 200, 100, 20];

/// Till balance plus the drawer's denomination breakdown
///
/// The balance reacts to `OnMoneyClicked` (+20) and `OnMoneySpent` (-20) on
/// the Cash category, and to first presses of [`ADD_KEY`] and
/// [`SUBTRACT_KEY`] while the menu has not paused it.
#[derive(Debug)]
pub struct CashManager {
    balance: i32,
    transactions: u32,
    drawer: [u32; 10],
    pausable: PausableComponent,
}

impl CashManager {
    /// Create a manager and subscribe it to the Cash category
    pub fn register(events: &EventDispatcher, starting_balance: i32) -> (Rc<RefCell<Self>>, SubscriptionId) {
        let manager = Rc::new(RefCell::new(Self {
            balance: starting_balance,
            transactions: 0,
            drawer: OPENING_DRAWER,
            pausable: PausableComponent::new(events, StatusFlags::default()),
        }));
        let subscription = events.subscribe(EventCategoryType::Cash, manager.clone());
        (manager, subscription)
    }

    /// Current balance
    pub fn balance(&self) -> i32 {
        self.balance
    }

    /// Number of changes made to the balance
    pub fn transactions(&self) -> u32 {
        self.transactions
    }

    /// Drawer amount held in `cash_type`, in cents
    pub fn amount(&self, cash_type: CashType) -> u32 {
        self.drawer[cash_type.slot()]
    }

    /// Notes or coins of `cash_type` in the drawer
    pub fn count(&self, cash_type: CashType) -> u32 {
        self.amount(cash_type) / cash_type.cents()
    }

    /// Drawer total across every denomination, in cents
    pub fn drawer_total(&self) -> u32 {
        self.drawer.iter().sum()
    }

    /// Add `amount` to the balance
    pub fn add_cash(&mut self, amount: i32) {
        self.adjust(amount);
    }

    /// Take `amount` from the balance
    pub fn minus_cash(&mut self, amount: i32) {
        self.adjust(-amount);
    }

    /// Empty the balance; the drawer breakdown is kept
    pub fn clear_balance(&mut self) {
        log::debug!("Cash cleared from {}", self.balance);
        self.balance = 0;
    }

    /// Apply the add/subtract keys; returns the change made this tick
    pub fn handle_input(&mut self, input: &dyn InputSource) -> i32 {
        if !self.pausable.is_updating() {
            return 0;
        }
        let before = self.balance;
        if input.is_first_key_press(ADD_KEY) {
            self.add_cash(CASH_STEP);
        }
        if input.is_first_key_press(SUBTRACT_KEY) {
            self.minus_cash(CASH_STEP);
        }
        self.balance - before
    }

    fn adjust(&mut self, delta: i32) {
        self.balance = self.balance.saturating_add(delta);
        self.transactions += 1;
        log::debug!("Cash {:+} -> {}", delta, self.balance);
    }
}

impl EventHandler for CashManager {
    fn on_event(&mut self, event: &EventData) {
        match event.action() {
            EventActionType::OnMoneyClicked => self.add_cash(CASH_STEP),
            EventActionType::OnMoneySpent => self.minus_cash(CASH_STEP),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::input::InputState;

    #[test]
    fn test_clicks_and_spends_adjust_balance() {
        let events = EventDispatcher::new(8);
        let (cash, _subscription) = CashManager::register(&events, 100);

        for action in [EventActionType::OnMoneyClicked, EventActionType::OnMoneyClicked, EventActionType::OnMoneySpent, EventActionType::OnPlay] {
            events.publish(EventData::new(action, EventCategoryType::Cash)).unwrap();
        }
        events.flush();

        assert_eq!(cash.borrow().balance(), 120);
        assert_eq!(cash.borrow().transactions(), 3);
    }

    #[test]
    fn test_unsubscribed_manager_ignores_events() {
        let events = EventDispatcher::new(8);
        let (cash, subscription) = CashManager::register(&events, 0);
        events.unsubscribe(subscription);
        events.publish(EventData::new(EventActionType::OnMoneyClicked, EventCategoryType::Cash)).unwrap();
        events.flush();
        assert_eq!(cash.borrow().balance(), 0);
    }

    #[test]
    fn test_opening_drawer_breakdown() {
        let events = EventDispatcher::new(8);
        let (cash, _subscription) = CashManager::register(&events, 0);
        let cash = cash.borrow();

        assert_eq!(cash.count(CashType::FiftyCash), 1);
        assert_eq!(cash.count(CashType::TwentyCash), 5);
        assert_eq!(cash.amount(CashType::FiftyCent), 250);
        assert_eq!(cash.count(CashType::FiveCent), 4);
        assert_eq!(cash.drawer_total(), 23_770);
        assert_eq!(CashType::ALL.iter().map(|t| cash.amount(*t)).sum::<u32>(), cash.drawer_total());
    }

    #[test]
    fn test_clear_keeps_drawer() {
        let events = EventDispatcher::new(8);
        let (cash, _subscription) = CashManager::register(&events, 75);
        let mut cash = cash.borrow_mut();
        cash.clear_balance();
        cash.add_cash(5);
        assert_eq!(cash.balance(), 5);
        assert_eq!(cash.drawer_total(), 23_770);
    }

    #[test]
    fn test_keys_apply_on_first_press_only() {
        let events = EventDispatcher::new(8);
        let (cash, _subscription) = CashManager::register(&events, 0);
        let mut input = InputState::new();

        input.begin_frame();
        input.press(ADD_KEY);
        assert_eq!(cash.borrow_mut().handle_input(&input), CASH_STEP);

        // Still held: no repeat
        input.begin_frame();
        assert_eq!(cash.borrow_mut().handle_input(&input), 0);

        input.begin_frame();
        input.release(ADD_KEY);
        input.press(SUBTRACT_KEY);
        assert_eq!(cash.borrow_mut().handle_input(&input), -CASH_STEP);
        assert_eq!(cash.borrow().balance(), 0);
        assert_eq!(cash.borrow().transactions(), 2);
    }

    #[test]
    fn test_paused_till_ignores_keys() {
        let events = EventDispatcher::new(8);
        let (cash, _subscription) = CashManager::register(&events, 10);
        events.publish(EventData::new(EventActionType::OnPause, EventCategoryType::Menu)).unwrap();
        events.flush();

        let mut input = InputState::new();
        input.begin_frame();
        input.press(ADD_KEY);
        assert_eq!(cash.borrow_mut().handle_input(&input), 0);
        assert_eq!(cash.borrow().balance(), 10);
    }
}
