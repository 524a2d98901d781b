use crate::actor::controller::{Controller, ControllerCore, ControllerType, UpdateContext};
use crate::actor::Actor;
use crate::events::{EventActionType, EventCategoryType, EventData};

/// Asks the camera manager to switch cameras once a delay has passed
///
/// Publishes a single `(OnCameraSetActive, Camera)` event naming the next
/// camera, then stays idle until reset.
#[derive(Debug, Clone)]
pub struct CameraElapsedTimeController {
    core: ControllerCore,
    next_camera_id: String,
    delay_ms: f32,
    elapsed_ms: f32,
    fired: bool,
}

impl CameraElapsedTimeController {
    /// Create a timed camera switch
    pub fn new(id: impl Into<String>, next_camera_id: impl Into<String>, delay_ms: f32) -> Self {
        Self {
            core: ControllerCore::new(id, ControllerType::CameraElapsedTime),
            next_camera_id: next_camera_id.into(),
            delay_ms,
            elapsed_ms: 0.0,
            fired: false,
        }
    }

    /// Whether the switch has been requested
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

impl Controller for CameraElapsedTimeController {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &UpdateContext<'_>, actor: &mut Actor) {
        if self.fired {
            return;
        }
        self.elapsed_ms += ctx.time.elapsed_ms();
        if self.elapsed_ms < self.delay_ms {
            return;
        }
        self.fired = true;
        log::debug!("'{}' switching to camera '{}'", actor.id(), self.next_camera_id);
        ctx.publish(
            EventData::new(EventActionType::OnCameraSetActive, EventCategoryType::Camera)
                .with_sender(actor.id())
                .with_text(self.next_camera_id.as_str()),
        );
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        let mut copy = self.clone();
        copy.reset();
        Box::new(copy)
    }

    fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.fired = false;
    }
}
