//! Top-level simulation: owns every subsystem and runs the tick

use thiserror::Error;

use crate::application::Application;
use crate::assets::AssetError;
use crate::camera::CameraManager;
use crate::config::{Config, ConfigError};
use crate::context::SimContext;
use crate::core::config::SimConfig;
use crate::events::{EventCategoryType, EventDispatcher, EventError, EventInbox};
use crate::input::{InputSource, InputState};
use crate::render::Renderer;
use crate::scene::{ObjectManager, SceneError};

/// Simulation errors
#[derive(Error, Debug)]
pub enum SimError {
    /// Configuration failed to load or validate
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Required asset missing
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Event could not be published
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    /// Scene construction failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Application hook failed
    #[error("Application error: {0}")]
    Application(String),
}

/// The simulation core
///
/// One tick runs, in order: time advance, event flush, debug toggles,
/// object update (controllers and collision), camera update, then draw for
/// every draw-active camera. All mutation finishes before any draw read.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    /// Time, countdown and debug switches
    pub context: SimContext,
    /// Event bus shared by every subsystem
    pub events: EventDispatcher,
    /// Live actors
    pub objects: ObjectManager,
    /// Cameras
    pub cameras: CameraManager,
    debug_toggles: EventInbox,
}

impl Simulation {
    /// Build a simulation from validated configuration
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let events = EventDispatcher::from_config(&config.events);
        let objects = ObjectManager::new(&config.scene, &events);
        let cameras = CameraManager::new(&config.cameras, &events);
        let debug_toggles = EventInbox::new(&events, EventCategoryType::Debug);
        log::info!(
            "Simulation ready (event capacity {}, frustum culling {})",
            config.events.queue_capacity,
            config.scene.frustum_culling
        );
        Ok(Self {
            context: SimContext::new(config.engine.debug_mode),
            config,
            events,
            objects,
            cameras,
            debug_toggles,
        })
    }

    /// Configuration the simulation was built from
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run one tick
    pub fn tick(&mut self, delta_seconds: f32, input: &dyn InputSource, renderer: &mut dyn Renderer) {
        if self.context.advance(delta_seconds) {
            log::debug!("Countdown finished at frame {}", self.context.time.frame_count());
        }
        let delivered = self.events.flush();
        if delivered > 0 {
            log::trace!("Delivered {} event(s)", delivered);
        }
        for event in self.debug_toggles.drain() {
            self.context.debug.apply(&event);
        }

        self.objects.update(&self.context.time, input);
        self.cameras.update(&self.context.time, input, &self.events, &self.objects);
        self.draw(renderer);
    }

    /// Hand every draw-active camera's view to `renderer`
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.begin_frame();
        for camera in self.cameras.draw_cameras() {
            let frustum = camera.frustum();
            let view = self.objects.draw_view(Some(&frustum));
            renderer.draw_view(camera, &view, &self.context.debug);
        }
        renderer.end_frame();
    }

    /// Initialize `app`, run `ticks` fixed-length ticks, then clean up
    ///
    /// Input is carried between ticks; the application fills it in through
    /// [`Application::sample_input`]. Cleanup runs even if a tick fails.
    pub fn run_for<A: Application>(
        &mut self,
        app: &mut A,
        renderer: &mut dyn Renderer,
        ticks: u64,
        delta_seconds: f32,
    ) -> Result<(), SimError> {
        app.initialize(self)
            .map_err(|e| SimError::Application(format!("initialize: {}", e)))?;

        let mut input = InputState::new();
        let mut result = Ok(());
        for tick in 0..ticks {
            input.begin_frame();
            app.sample_input(tick, &mut input);
            self.tick(delta_seconds, &input, renderer);
            if let Err(e) = app.update(self) {
                result = Err(SimError::Application(format!("update at tick {}: {}", tick, e)));
                break;
            }
        }

        app.cleanup(self);
        log::info!("Ran {} tick(s), {:.2}s simulated", self.context.time.frame_count(), self.context.time.total_seconds());
        result
    }

    /// Drop every actor, rewind time and discard queued events
    pub fn reset(&mut self) {
        self.objects.clear();
        self.events.clear();
        self.context.reset();
        log::info!("Simulation reset");
    }
}
