//! # Rendering Interface
//!
//! The core never talks to a graphics API. Each tick it hands every
//! draw-active camera, in draw-depth order, to a [`Renderer`] together with
//! the actors that camera can see: opaque first, then transparent, each in
//! insertion order.

use crate::actor::Actor;
use crate::camera::Camera3D;
use crate::context::DebugSettings;

/// Actors visible to one camera for one tick
#[derive(Debug, Default)]
pub struct DrawView<'a> {
    /// Opaque actors in insertion order
    pub opaque: Vec<&'a Actor>,
    /// Transparent actors in insertion order, drawn after the opaque ones
    pub transparent: Vec<&'a Actor>,
}

impl<'a> DrawView<'a> {
    /// Every actor in draw order
    pub fn iter(&self) -> impl Iterator<Item = &'a Actor> + '_ {
        self.opaque.iter().chain(self.transparent.iter()).copied()
    }

    /// Number of actors to draw
    pub fn len(&self) -> usize {
        self.opaque.len() + self.transparent.len()
    }

    /// Whether nothing is visible
    pub fn is_empty(&self) -> bool {
        self.opaque.is_empty() && self.transparent.is_empty()
    }
}

/// Backend that turns draw views into pixels
pub trait Renderer {
    /// Called once per tick before any camera is drawn
    fn begin_frame(&mut self) {}

    /// Draw one camera's view
    fn draw_view(&mut self, camera: &Camera3D, view: &DrawView<'_>, debug: &DebugSettings);

    /// Called once per tick after every camera is drawn
    fn end_frame(&mut self) {}
}

/// Renderer that draws nothing and counts what it was given
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NullRenderer {
    /// Completed frames
    pub frames: u64,
    /// Camera views received
    pub views: u64,
    /// Actors received across all views
    pub actors: u64,
}

impl NullRenderer {
    /// Create a counting null renderer
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for NullRenderer {
    fn draw_view(&mut self, camera: &Camera3D, view: &DrawView<'_>, _debug: &DebugSettings) {
        log::trace!("'{}' sees {} actor(s)", camera.id(), view.len());
        self.views += 1;
        self.actors += view.len() as u64;
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}
