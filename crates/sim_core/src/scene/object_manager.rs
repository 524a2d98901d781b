//! Live actor collection with draw partitions and predictive collision

use std::collections::HashMap;

use slotmap::SlotMap;

use super::SceneError;
use crate::actor::controller::{ActorLookup, UpdateContext};
use crate::actor::{Actor, ActorKey, StatusFlags};
use crate::collision::{detector, Collidee, Frustum, Ray};
use crate::core::config::SceneConfig;
use crate::events::{EventActionType, EventCategoryType, EventDispatcher, EventInbox, PausableComponent};
use crate::foundation::math::{Transform3D, Vec3};
use crate::foundation::time::GameTime;
use crate::input::InputSource;
use crate::render::DrawView;

/// Transforms captured at the start of an update, for controllers that follow other actors
struct TransformSnapshot(HashMap<String, Transform3D>);

impl ActorLookup for TransformSnapshot {
    fn transform_of(&self, id: &str) -> Option<&Transform3D> {
        self.0.get(id)
    }
}

/// Owns every live actor
///
/// Each live actor appears exactly once in the master list and exactly once
/// in either the opaque or the transparent partition. The partition is chosen
/// when the actor is added: drawable actors whose alpha is below the
/// configured threshold are transparent, everything else is opaque. Changing
/// alpha later does not move an actor between partitions.
///
/// Structural changes requested through `SystemAdd`/`SystemRemove` events are
/// buffered and applied at the start of the next [`update`](Self::update).
pub struct ObjectManager {
    actors: SlotMap<ActorKey, Actor>,
    ids: HashMap<String, ActorKey>,
    master: Vec<ActorKey>,
    opaque: Vec<ActorKey>,
    transparent: Vec<ActorKey>,
    archetypes: HashMap<String, Actor>,
    config: SceneConfig,
    events: EventDispatcher,
    pausable: PausableComponent,
    add_requests: EventInbox,
    remove_requests: EventInbox,
}

impl ObjectManager {
    /// Create an empty, running object manager
    pub fn new(config: &SceneConfig, events: &EventDispatcher) -> Self {
        Self {
            actors: SlotMap::with_key(),
            ids: HashMap::new(),
            master: Vec::new(),
            opaque: Vec::new(),
            transparent: Vec::new(),
            archetypes: HashMap::new(),
            config: config.clone(),
            events: events.clone(),
            pausable: PausableComponent::new(events, StatusFlags::DRAWN | StatusFlags::UPDATE),
            add_requests: EventInbox::new(events, EventCategoryType::SystemAdd),
            remove_requests: EventInbox::new(events, EventCategoryType::SystemRemove),
        }
    }

    /// Add a fully formed actor
    pub fn add(&mut self, mut actor: Actor) -> Result<ActorKey, SceneError> {
        if self.ids.contains_key(actor.id()) {
            return Err(SceneError::DuplicateActor(actor.id().to_string()));
        }
        actor.refresh_bounds();
        let transparent = actor.actor_type().is_drawable()
            && actor.material.is_transparent(self.config.transparency_threshold);
        let id = actor.id().to_string();
        let key = self.actors.insert(actor);
        self.ids.insert(id.clone(), key);
        self.master.push(key);
        if transparent {
            self.transparent.push(key);
        } else {
            self.opaque.push(key);
        }
        log::debug!("Added '{}' ({})", id, if transparent { "transparent" } else { "opaque" });
        Ok(key)
    }

    /// Remove an actor by id; removing a missing id does nothing
    pub fn remove(&mut self, id: &str) -> Option<Actor> {
        let key = self.ids.remove(id)?;
        self.master.retain(|k| *k != key);
        self.opaque.retain(|k| *k != key);
        self.transparent.retain(|k| *k != key);
        log::debug!("Removed '{}'", id);
        self.actors.remove(key)
    }

    /// Remove every actor matching `predicate`; returns how many were removed
    pub fn remove_where<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&Actor) -> bool,
    {
        let doomed: Vec<String> = self
            .iter()
            .filter(|actor| predicate(actor))
            .map(|actor| actor.id().to_string())
            .collect();
        for id in &doomed {
            self.remove(id);
        }
        doomed.len()
    }

    /// Remove every actor
    pub fn clear(&mut self) {
        self.actors.clear();
        self.ids.clear();
        self.master.clear();
        self.opaque.clear();
        self.transparent.clear();
    }

    /// Register a template for `OnAddActor` requests
    pub fn register_archetype(&mut self, archetype_id: impl Into<String>, actor: Actor) {
        self.archetypes.insert(archetype_id.into(), actor);
    }

    /// Add a copy of a registered archetype under a new id
    pub fn spawn(&mut self, archetype_id: &str, new_id: &str, translation: Option<Vec3>) -> Result<ActorKey, SceneError> {
        let archetype = self
            .archetypes
            .get(archetype_id)
            .ok_or_else(|| SceneError::UnknownArchetype(archetype_id.to_string()))?;
        let mut actor = archetype.duplicate(new_id);
        if let Some(translation) = translation {
            actor.transform.translation = translation;
        }
        self.add(actor)
    }

    /// Actor by id
    pub fn get(&self, id: &str) -> Option<&Actor> {
        self.ids.get(id).and_then(|key| self.actors.get(*key))
    }

    /// Actor by id, mutable
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Actor> {
        let key = *self.ids.get(id)?;
        self.actors.get_mut(key)
    }

    /// Actor by key
    pub fn get_by_key(&self, key: ActorKey) -> Option<&Actor> {
        self.actors.get(key)
    }

    /// Key of the actor with `id`
    pub fn key_of(&self, id: &str) -> Option<ActorKey> {
        self.ids.get(id).copied()
    }

    /// Whether an actor with `id` is live
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// First actor, in insertion order, matching `predicate`
    pub fn find<P>(&self, predicate: P) -> Option<&Actor>
    where
        P: Fn(&Actor) -> bool,
    {
        self.iter().find(|actor| predicate(actor))
    }

    /// Every actor matching `predicate`, lazily, in insertion order
    pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Actor> + 'a
    where
        P: Fn(&Actor) -> bool + 'a,
    {
        self.iter().filter(move |actor| predicate(actor))
    }

    /// Every actor in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.resolve(&self.master)
    }

    /// Opaque partition in insertion order
    pub fn opaque(&self) -> impl Iterator<Item = &Actor> {
        self.resolve(&self.opaque)
    }

    /// Transparent partition in insertion order
    pub fn transparent(&self) -> impl Iterator<Item = &Actor> {
        self.resolve(&self.transparent)
    }

    /// Ids of the opaque partition in order
    pub fn opaque_ids(&self) -> Vec<&str> {
        self.opaque().map(Actor::id).collect()
    }

    /// Ids of the transparent partition in order
    pub fn transparent_ids(&self) -> Vec<&str> {
        self.transparent().map(Actor::id).collect()
    }

    /// Number of live actors
    pub fn len(&self) -> usize {
        self.master.len()
    }

    /// Whether no actors are live
    pub fn is_empty(&self) -> bool {
        self.master.is_empty()
    }

    /// Draw/update status set by menu events
    pub fn status(&self) -> StatusFlags {
        self.pausable.status()
    }

    /// Override the draw/update status
    pub fn set_status(&self, status: StatusFlags) {
        self.pausable.set_status(status);
    }

    /// Advance one tick
    ///
    /// Applies buffered add/remove requests, then, if not paused, updates every
    /// actor with the update bit in insertion order: controllers first, then
    /// the predictive collision step for any staged move.
    pub fn update(&mut self, time: &GameTime, input: &dyn InputSource) {
        self.apply_requests();
        if !self.pausable.is_updating() {
            return;
        }

        let snapshot = self.snapshot();
        let events = self.events.clone();
        let ctx = UpdateContext::new(time, input, &events).with_scene(&snapshot);
        let order = self.master.clone();
        for key in order {
            let Some(actor) = self.actors.get_mut(key) else {
                continue;
            };
            if !actor.is_updating() {
                continue;
            }
            actor.begin_update();
            actor.run_controllers(&ctx);
            self.resolve_staged_move(key);
        }
    }

    /// Move an actor through the collision step outside of its controllers
    ///
    /// Returns the collidee if the move was blocked.
    pub fn try_move(&mut self, id: &str, translation: Vec3, yaw_degrees: f32) -> Result<Option<Collidee>, SceneError> {
        let key = self.key_of(id).ok_or_else(|| SceneError::UnknownActor(id.to_string()))?;
        if let Some(actor) = self.actors.get_mut(key) {
            actor.begin_update();
            actor.transform.stage_translation(translation);
            actor.transform.stage_rotation(yaw_degrees);
        }
        self.resolve_staged_move(key);
        Ok(self.actors.get(key).and_then(|actor| actor.collidee().cloned()))
    }

    /// Closest collidable actor hit by `ray`, with its distance
    pub fn pick(&self, ray: &Ray) -> Option<(&Actor, f32)> {
        self.pick_where(ray, |_| true)
    }

    /// Closest collidable actor matching `predicate` hit by `ray`
    pub fn pick_where<P>(&self, ray: &Ray, predicate: P) -> Option<(&Actor, f32)>
    where
        P: Fn(&Actor) -> bool,
    {
        self.opaque()
            .chain(self.transparent())
            .filter(|actor| predicate(actor))
            .filter_map(|actor| {
                let distance = actor.primitive()?.intersects_ray(ray)?;
                Some((actor, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Actors to draw for one camera, opaque before transparent
    ///
    /// Actors with a collision primitive outside `frustum` are culled when
    /// frustum culling is enabled.
    pub fn draw_view(&self, frustum: Option<&Frustum>) -> DrawView<'_> {
        if !self.pausable.is_drawn() {
            return DrawView::default();
        }
        let culling = if self.config.frustum_culling { frustum } else { None };
        let visible = |actor: &&Actor| {
            actor.is_drawn()
                && actor.actor_type().is_drawable()
                && match (culling, actor.primitive()) {
                    (Some(frustum), Some(primitive)) => primitive.intersects_frustum(frustum),
                    _ => true,
                }
        };
        DrawView {
            opaque: self.opaque().filter(visible).collect(),
            transparent: self.transparent().filter(visible).collect(),
        }
    }

    fn resolve<'a>(&'a self, keys: &'a [ActorKey]) -> impl Iterator<Item = &'a Actor> + 'a {
        keys.iter().filter_map(move |key| self.actors.get(*key))
    }

    fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot(
            self.iter()
                .map(|actor| (actor.id().to_string(), actor.transform.clone()))
                .collect(),
        )
    }

    /// Commit or veto whatever the actor staged this tick
    fn resolve_staged_move(&mut self, key: ActorKey) {
        let Some(actor) = self.actors.get(key) else {
            return;
        };
        if !actor.transform.has_increment() {
            return;
        }

        let hit = match actor.primitive() {
            Some(primitive) if actor.is_solid() => {
                let translation = actor.transform.translate_increment();
                let candidates = self
                    .opaque
                    .iter()
                    .chain(self.transparent.iter())
                    .filter_map(|k| self.actors.get(*k).map(|candidate| (*k, candidate)));
                detector::find_first_collision(key, primitive, translation, candidates)
            }
            _ => None,
        };

        let Some(actor) = self.actors.get_mut(key) else {
            return;
        };
        match hit {
            None => {
                actor.transform.apply_increments();
                actor.refresh_bounds();
            }
            Some(collidee) => actor.resolve_collision(collidee, &self.events),
        }
    }

    fn apply_requests(&mut self) {
        for event in self.remove_requests.drain() {
            if event.action() != EventActionType::OnRemoveActor {
                continue;
            }
            match event.text(0) {
                Some(id) => {
                    if self.remove(id).is_none() {
                        log::debug!("Remove request for '{}' ignored: not live", id);
                    }
                }
                None => log::warn!("Remove request without an actor id"),
            }
        }

        for event in self.add_requests.drain() {
            if event.action() != EventActionType::OnAddActor {
                continue;
            }
            let (Some(archetype), Some(new_id)) = (event.text(0), event.text(1)) else {
                log::warn!("Add request needs an archetype id and a new id");
                continue;
            };
            let translation = match event.arg(2) {
                Some(crate::events::EventArg::Vector(v)) => Some(*v),
                _ => None,
            };
            if let Err(err) = self.spawn(archetype, new_id, translation) {
                log::warn!("Add request failed: {}", err);
            }
        }
    }
}

impl ActorLookup for ObjectManager {
    fn transform_of(&self, id: &str) -> Option<&Transform3D> {
        self.get(id).map(|actor| &actor.transform)
    }
}

impl std::fmt::Debug for ObjectManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectManager")
            .field("actors", &self.master.len())
            .field("opaque", &self.opaque.len())
            .field("transparent", &self.transparent.len())
            .field("status", &self.pausable.status())
            .finish()
    }
}
