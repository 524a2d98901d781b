//! Per-simulation timing and debug state

use crate::events::{EventActionType, EventData};
use crate::foundation::time::{CountdownTimer, GameTime};

/// Debug overlays toggled at runtime by `(OnToggle, Debug)` events
///
/// The event's first text argument names the setting: `"info"`,
/// `"collision"` or `"zones"`. Without an argument the whole overlay toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugSettings {
    /// Show the debug overlay at all
    pub visible: bool,
    /// Draw collision primitives
    pub show_collision_skins: bool,
    /// Draw trigger zones
    pub show_zones: bool,
}

impl DebugSettings {
    /// Apply a debug toggle event; returns whether anything changed
    pub fn apply(&mut self, event: &EventData) -> bool {
        if event.action() != EventActionType::OnToggle {
            return false;
        }
        match event.text(0) {
            None | Some("info") => self.visible = !self.visible,
            Some("collision") => self.show_collision_skins = !self.show_collision_skins,
            Some("zones") => self.show_zones = !self.show_zones,
            Some(other) => {
                log::warn!("Unknown debug setting '{}'", other);
                return false;
            }
        }
        log::debug!("Debug settings now {:?}", self);
        true
    }
}

/// Timing and debug state threaded explicitly through the simulation
#[derive(Debug, Clone, Default)]
pub struct SimContext {
    /// Time for the current tick
    pub time: GameTime,
    /// Gameplay hold countdown
    pub timer: CountdownTimer,
    /// Debug overlay switches
    pub debug: DebugSettings,
}

impl SimContext {
    /// Fresh context at time zero
    pub fn new(debug_mode: bool) -> Self {
        Self {
            debug: DebugSettings {
                visible: debug_mode,
                ..DebugSettings::default()
            },
            ..Self::default()
        }
    }

    /// Advance time by one tick and the countdown with it
    ///
    /// Returns `true` on the tick the countdown finishes.
    pub fn advance(&mut self, delta_seconds: f32) -> bool {
        self.time.advance(delta_seconds);
        self.timer.tick(&self.time)
    }

    /// Back to time zero with no countdown; debug switches are kept
    pub fn reset(&mut self) {
        self.time = GameTime::new();
        self.timer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventCategoryType;

    fn toggle(setting: Option<&str>) -> EventData {
        let event = EventData::new(EventActionType::OnToggle, EventCategoryType::Debug);
        match setting {
            Some(name) => event.with_text(name),
            None => event,
        }
    }

    #[test]
    fn test_toggles_named_setting() {
        let mut debug = DebugSettings::default();
        assert!(debug.apply(&toggle(Some("collision"))));
        assert!(debug.show_collision_skins);
        assert!(!debug.visible);
        assert!(debug.apply(&toggle(None)));
        assert!(debug.visible);
        assert!(!debug.apply(&toggle(Some("wireframe"))));
    }

    #[test]
    fn test_reset_keeps_debug() {
        let mut context = SimContext::new(true);
        context.timer.start(100.0);
        context.advance(0.5);
        context.reset();
        assert_eq!(context.time.frame_count(), 0);
        assert!(!context.timer.is_waiting());
        assert!(context.debug.visible);
    }

    #[test]
    fn test_countdown_finishes_through_advance() {
        let mut context = SimContext::new(false);
        context.timer.start(100.0);
        assert!(!context.advance(0.1));
        assert!(context.advance(0.1));
        assert!(!context.timer.is_waiting());
    }
}
