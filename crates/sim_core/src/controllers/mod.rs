//! Built-in controllers
//!
//! Every controller here implements [`Controller`](crate::actor::controller::Controller)
//! and mutates only the actor it is attached to. Cross-actor effects go
//! through the event bus.

mod curve;
mod elapsed;
mod first_person;
mod flight;
mod player;
mod rail;
mod rotation;
mod security;
mod sine;
mod third_person;
mod ui;
mod user_input;

pub use curve::{Curve1D, CurveLoopType, Track3DController, Transform3DCurve};
pub use elapsed::CameraElapsedTimeController;
pub use first_person::FirstPersonCameraController;
pub use flight::FlightCameraController;
pub use player::PlayerInputController;
pub use rail::{RailController, RailParameters};
pub use rotation::RotationController;
pub use security::SecurityCameraController;
pub use sine::{ColorSineLerpController, TranslationSineLerpController, TrigonometricParameters};
pub use third_person::ThirdPersonController;
pub use ui::{UiExpireController, UiProgressController, UiRotationScaleExpireController};
pub use user_input::{MoveKeys, MoveSpeeds};

use crate::actor::Actor;
use crate::actor::controller::UpdateContext;
use crate::events::{EventActionType, EventCategoryType, EventData};
use crate::foundation::math::Vec3;

/// Point `actor` at `target`, keeping world up
fn look_at(actor: &mut Actor, target: Vec3) {
    if let Some(look) = (target - actor.transform.translation).try_normalize(f32::EPSILON) {
        actor.transform.set_orientation(look, Vec3::y());
    }
}

/// Switch the actor off and ask the scene to remove it at the next tick boundary
fn expire(actor: &mut Actor, ctx: &UpdateContext<'_>) {
    log::debug!("'{}' expired", actor.id());
    actor.status = crate::actor::StatusFlags::OFF;
    ctx.publish(
        EventData::new(EventActionType::OnRemoveActor, EventCategoryType::SystemRemove)
            .with_sender(actor.id())
            .with_text(actor.id()),
    );
}
