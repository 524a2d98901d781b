//! # Cameras
//!
//! A camera is an actor of type [`ActorType::Camera`](crate::actor::ActorType)
//! plus a projection and a viewport. Rig behavior (flight, first/third person,
//! rail, security sweep) comes from the controllers attached to its actor.
//!
//! ## Coordinate System
//! Right-handed, Y-up. The view matrix looks from the actor's translation
//! along its look vector; projection uses the OpenGL depth range.

mod manager;
mod projection;

pub use manager::CameraManager;
pub use projection::{ProjectionParameters, Viewport};

use crate::actor::controller::UpdateContext;
use crate::actor::{Actor, ActorType};
use crate::collision::Frustum;
use crate::foundation::math::{Mat4, Point3, Transform3D};

/// Viewpoint with projection, viewport and draw ordering
#[derive(Debug)]
pub struct Camera3D {
    /// Camera actor; its transform is the eye
    pub actor: Actor,
    /// Frustum shape
    pub projection: ProjectionParameters,
    /// Screen rectangle
    pub viewport: Viewport,
    /// Draw order among draw-active cameras, lower first
    pub draw_depth: f32,
    /// Whether this camera renders the scene
    pub draw_active: bool,
}

impl Camera3D {
    /// Create a draw-active camera
    pub fn new(id: impl Into<String>, transform: Transform3D, projection: ProjectionParameters, viewport: Viewport) -> Self {
        Self {
            actor: Actor::new(id, ActorType::Camera, transform),
            projection,
            viewport,
            draw_depth: 0.0,
            draw_active: true,
        }
    }

    /// Set the draw depth (builder pattern)
    pub fn with_draw_depth(mut self, depth: f32) -> Self {
        self.draw_depth = depth;
        self
    }

    /// Set whether the camera draws (builder pattern)
    pub fn with_draw_active(mut self, active: bool) -> Self {
        self.draw_active = active;
        self
    }

    /// Attach a rig controller (builder pattern)
    pub fn with_controller(mut self, controller: Box<dyn crate::actor::controller::Controller>) -> Self {
        self.actor.attach_controller(controller);
        self
    }

    /// Camera id
    pub fn id(&self) -> &str {
        self.actor.id()
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        let transform = &self.actor.transform;
        let eye = Point3::from(transform.translation);
        let target = eye + transform.look();
        Mat4::look_at_rh(&eye, &target, &transform.up())
    }

    /// View-to-clip matrix
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.projection_matrix()
    }

    /// World-to-clip matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Current view frustum in world space
    pub fn frustum(&self) -> Frustum {
        Frustum::from_matrix(&self.view_projection())
    }

    /// Run the rig controllers
    ///
    /// Cameras do not collide: anything a controller stages is applied directly.
    pub fn update(&mut self, ctx: &UpdateContext<'_>) {
        if !self.actor.is_updating() {
            return;
        }
        self.actor.begin_update();
        self.actor.run_controllers(ctx);
        if self.actor.transform.has_increment() {
            self.actor.transform.apply_increments();
        }
        log::trace!("Camera '{}' at {:?}", self.id(), self.actor.transform.translation);
    }
}
