//! Actors: the positioned entities the simulation updates, draws and collides
//!
//! An actor is a single struct with optional capabilities rather than a type
//! hierarchy: geometry makes it drawable, a collision primitive makes it
//! collidable (as a solid or as a passive zone), and controllers give it
//! behavior.

pub mod controller;
mod material;

pub use material::Material;

use std::sync::Arc;

use bitflags::bitflags;

use crate::assets::Geometry;
use crate::collision::{Collidee, Collision, CollisionPrimitive, CollisionResponse, CollisionRole};
use crate::events::EventDispatcher;
use crate::foundation::math::Transform3D;
use controller::{Controller, ControllerList, PlayStatus, UpdateContext};

slotmap::new_key_type! {
    /// Stable handle to an actor owned by an object manager
    pub struct ActorKey;
}

bitflags! {
    /// Independent draw/update switches
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u8 {
        /// Submitted to the renderer
        const DRAWN = 0b01;
        /// Runs its update every tick
        const UPDATE = 0b10;
    }
}

impl StatusFlags {
    /// Neither drawn nor updated
    pub const OFF: Self = Self::empty();
}

impl Default for StatusFlags {
    fn default() -> Self {
        Self::DRAWN | Self::UPDATE
    }
}

/// Category tag used for partitioning and collision response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorType {
    /// Viewpoint
    Camera,
    /// Static decoration
    Decorator,
    /// Debug helper such as axes or a grid
    Helper,
    /// Camera-facing quad
    Billboard,
    /// Static level geometry that blocks movement
    CollidableArchitecture,
    /// Movable prop that blocks movement
    CollidableProp,
    /// Collectable item
    CollidablePickup,
    /// The player
    CollidablePlayer,
    /// Trigger volume
    CollidableZone,
    /// Customer waiting in a queue
    Customer,
    /// Screen-space text
    UIText,
    /// Screen-space image
    UITexture,
    /// Screen-space button
    UIButton,
    /// Mouse cursor
    UIMouse,
}

impl ActorType {
    /// Whether actors of this type are ever submitted to the renderer
    pub fn is_drawable(self) -> bool {
        !matches!(self, Self::Camera | Self::CollidableZone)
    }
}

/// Positioned entity with optional capabilities
#[derive(Debug)]
pub struct Actor {
    id: String,
    actor_type: ActorType,
    /// Draw/update switches
    pub status: StatusFlags,
    /// Spatial transform
    pub transform: Transform3D,
    /// Surface parameters
    pub material: Material,
    geometry: Option<Arc<Geometry>>,
    collision: Option<Collision>,
    controllers: ControllerList,
    controllers_running: bool,
    deferred_play_status: Vec<DeferredPlayStatus>,
    collidee: Option<Collidee>,
    response: Option<Box<dyn CollisionResponse>>,
}

/// Play-status change requested while the actor's controllers were running
struct DeferredPlayStatus {
    status: PlayStatus,
    predicate: Box<dyn Fn(&dyn Controller) -> bool>,
}

impl std::fmt::Debug for DeferredPlayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredPlayStatus").field("status", &self.status).finish_non_exhaustive()
    }
}

impl Actor {
    /// Create a drawn, updating actor with no capabilities
    pub fn new(id: impl Into<String>, actor_type: ActorType, transform: Transform3D) -> Self {
        Self {
            id: id.into(),
            actor_type,
            status: StatusFlags::default(),
            transform,
            material: Material::default(),
            geometry: None,
            collision: None,
            controllers: ControllerList::new(),
            controllers_running: false,
            deferred_play_status: Vec::new(),
            collidee: None,
            response: None,
        }
    }

    /// Set the status (builder pattern)
    pub fn with_status(mut self, status: StatusFlags) -> Self {
        self.status = status;
        self
    }

    /// Set the material (builder pattern)
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Share a geometry handle (builder pattern)
    pub fn with_geometry(mut self, geometry: Arc<Geometry>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Make the actor collidable (builder pattern)
    ///
    /// World bounds are computed immediately from the current transform.
    pub fn with_collision(mut self, primitive: CollisionPrimitive, role: CollisionRole) -> Self {
        let mut collision = Collision { primitive, role };
        collision.primitive.update(&self.transform);
        self.collision = Some(collision);
        self
    }

    /// Attach a controller (builder pattern)
    pub fn with_controller(mut self, controller: Box<dyn Controller>) -> Self {
        self.controllers.push(controller);
        self
    }

    /// Set the collision response hook (builder pattern)
    pub fn with_response(mut self, response: Box<dyn CollisionResponse>) -> Self {
        self.response = Some(response);
        self
    }

    /// Unique id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Category tag
    pub fn actor_type(&self) -> ActorType {
        self.actor_type
    }

    /// Shared geometry, if drawable
    pub fn geometry(&self) -> Option<&Arc<Geometry>> {
        self.geometry.as_ref()
    }

    /// Collision capability, if collidable
    pub fn collision(&self) -> Option<&Collision> {
        self.collision.as_ref()
    }

    /// Collision primitive, if collidable
    pub fn primitive(&self) -> Option<&CollisionPrimitive> {
        self.collision.as_ref().map(|collision| &collision.primitive)
    }

    /// Collision role, if collidable
    pub fn role(&self) -> Option<CollisionRole> {
        self.collision.as_ref().map(|collision| collision.role)
    }

    /// Whether this actor can initiate collision tests
    pub fn is_solid(&self) -> bool {
        self.role() == Some(CollisionRole::Solid)
    }

    /// What this actor ran into during the current tick
    pub fn collidee(&self) -> Option<&Collidee> {
        self.collidee.as_ref()
    }

    /// Attached controllers in invocation order
    pub fn controllers(&self) -> &ControllerList {
        &self.controllers
    }

    /// Append a controller
    pub fn attach_controller(&mut self, controller: Box<dyn Controller>) {
        self.controllers.push(controller);
    }

    /// Set the play status of every controller matching `predicate`
    ///
    /// Returns how many controllers changed. Called by one of this actor's own
    /// controllers, the change is queued until the current controller pass
    /// ends and `0` is returned.
    pub fn set_controller_play_status<P>(&mut self, status: PlayStatus, predicate: P) -> usize
    where
        P: Fn(&dyn Controller) -> bool + 'static,
    {
        if self.controllers_running {
            self.deferred_play_status.push(DeferredPlayStatus {
                status,
                predicate: Box::new(predicate),
            });
            return 0;
        }
        self.controllers.set_play_status(status, predicate)
    }

    /// Whether the actor runs its update this tick
    pub fn is_updating(&self) -> bool {
        self.status.contains(StatusFlags::UPDATE)
    }

    /// Whether the actor is submitted to the renderer
    pub fn is_drawn(&self) -> bool {
        self.status.contains(StatusFlags::DRAWN)
    }

    /// Recompute world bounds from the current transform
    pub fn refresh_bounds(&mut self) {
        if let Some(collision) = &mut self.collision {
            collision.primitive.update(&self.transform);
        }
    }

    /// Start-of-update housekeeping: forget last tick's collidee and staged move, refresh bounds
    pub fn begin_update(&mut self) {
        self.collidee = None;
        self.transform.clear_increments();
        self.refresh_bounds();
    }

    /// Run the attached controllers
    pub fn run_controllers(&mut self, ctx: &UpdateContext<'_>) {
        if self.controllers.is_empty() {
            return;
        }
        let mut controllers = std::mem::take(&mut self.controllers);
        self.controllers_running = true;
        controllers.update(ctx, self);
        self.controllers_running = false;
        // Anything attached by a controller during the update goes after the originals
        let attached = std::mem::replace(&mut self.controllers, controllers);
        for controller in attached.into_controllers() {
            self.controllers.push(controller);
        }
        for request in std::mem::take(&mut self.deferred_play_status) {
            let changed = self.controllers.set_play_status(request.status, &*request.predicate);
            log::trace!("'{}' applied deferred {:?} to {} controller(s)", self.id, request.status, changed);
        }
    }

    /// Record what the staged move ran into and invoke the response hook
    pub(crate) fn resolve_collision(&mut self, collidee: Collidee, events: &EventDispatcher) {
        log::debug!("'{}' blocked by '{}' ({:?})", self.id, collidee.id, collidee.role);
        self.transform.clear_increments();
        if let Some(response) = &mut self.response {
            response.on_collision(&self.id, &collidee, events);
        }
        self.collidee = Some(collidee);
    }

    /// Deep copy under a new id
    ///
    /// Transform, material colors, status and controllers are copied; geometry
    /// and texture are shared; the collision primitive restarts from its
    /// object-space volume and the collidee is cleared.
    pub fn duplicate(&self, new_id: impl Into<String>) -> Self {
        let mut copy = Self {
            id: new_id.into(),
            actor_type: self.actor_type,
            status: self.status,
            transform: self.transform.clone(),
            material: self.material.clone(),
            geometry: self.geometry.clone(),
            collision: self.collision.as_ref().map(|collision| Collision {
                primitive: collision.primitive.fresh(),
                role: collision.role,
            }),
            controllers: self.controllers.duplicate(),
            controllers_running: false,
            deferred_play_status: Vec::new(),
            collidee: None,
            response: self.response.as_ref().map(|response| response.duplicate()),
        };
        copy.transform.clear_increments();
        copy.refresh_bounds();
        copy
    }
}
