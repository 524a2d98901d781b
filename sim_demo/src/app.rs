//! Demo scene: a player walking through a small shop
//!
//! The player walks forward, collects a coin, bumps into an exit zone and
//! turns. Customers are served on a timer, each one resetting the service
//! bar, while the till reacts to cash events and the G/H keys. Cameras start
//! on an intro shot and cut to a chase camera.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sim_core::assets::{ContentDictionary, Geometry, Texture};
use sim_core::collision::{PlayerCollisionResponse, Ray};
use sim_core::controllers::{
    CameraElapsedTimeController, ColorSineLerpController, CurveLoopType, FlightCameraController, MoveKeys, MoveSpeeds,
    PlayerInputController, RailController, RailParameters, RotationController, SecurityCameraController,
    ThirdPersonController, Track3DController, Transform3DCurve, TranslationSineLerpController, TrigonometricParameters,
    UiExpireController, UiProgressController, UiRotationScaleExpireController,
};
use sim_core::events::{EventInbox, SubscriptionId};
use sim_core::prelude::*;

use crate::cash::CashManager;
use crate::customer::CustomerManager;

const PLAYER_ID: &str = "player";
const HEALTH_BAR_ID: &str = "health";
const SERVICE_BAR_ID: &str = "service";
const SERVICE_INTERVAL: u64 = 15;
const CUSTOMER_INTERVAL: u64 = 150;
const SPEND_INTERVAL: u64 = 200;

/// Everything the demo owns beyond the simulation itself
pub struct DemoApp {
    geometry: ContentDictionary<Geometry>,
    textures: ContentDictionary<Texture>,
    rng: StdRng,
    cash: Option<(Rc<RefCell<CashManager>>, SubscriptionId)>,
    customers: Option<CustomerManager>,
    player_events: Option<EventInbox>,
    zone_entries: u32,
    pickups: u32,
}

impl DemoApp {
    /// Create the demo with a fixed random seed
    pub fn new(seed: u64) -> Self {
        Self {
            geometry: ContentDictionary::new("geometry"),
            textures: ContentDictionary::new("textures"),
            rng: StdRng::seed_from_u64(seed),
            cash: None,
            customers: None,
            player_events: None,
            zone_entries: 0,
            pickups: 0,
        }
    }

    fn load_content(&mut self) {
        self.geometry.add("cube", Geometry::new("cube", 36));
        self.geometry.add("sphere", Geometry::new("sphere", 960));
        self.geometry.add("quad", Geometry::new("quad", 6));
        self.textures.add("crate", Texture::new("crate", 256, 256));
        self.textures.add("glass", Texture::new("glass", 128, 128));
        self.textures.add("gold", Texture::new("gold", 64, 64));
        log::info!("Loaded {} geometries and {} textures", self.geometry.len(), self.textures.len());
    }

    fn build_architecture(&self, sim: &mut Simulation) -> Result<(), AppError> {
        let cube = self.geometry.require("cube")?;
        let crate_material = Material::new().with_texture(self.textures.require("crate")?);

        for i in 0..5u8 {
            let x = -20.0 + 10.0 * f32::from(i);
            let mut wall = Actor::new(
                format!("crate {i}"),
                ActorType::CollidableArchitecture,
                Transform3D::from_translation_scale(Vec3::new(x, 0.0, -30.0), Vec3::repeat(4.0)),
            )
            .with_geometry(Arc::clone(&cube))
            .with_material(crate_material.clone())
            .with_collision(CollisionPrimitive::unit_box(), CollisionRole::Solid);
            if i == 2 {
                wall = wall.with_controller(Box::new(RotationController::new("spin", Vec3::new(0.0, 45.0, 0.0))));
            }
            sim.objects.add(wall)?;
        }

        let glass = Actor::new(
            "shop window",
            ActorType::CollidableArchitecture,
            Transform3D::from_translation_scale(Vec3::new(8.0, 0.0, -10.0), Vec3::new(6.0, 4.0, 0.2)),
        )
        .with_geometry(Arc::clone(&cube))
        .with_material(Material::new().with_alpha(0.4).with_texture(self.textures.require("glass")?))
        .with_collision(CollisionPrimitive::unit_box(), CollisionRole::Solid);
        sim.objects.add(glass)?;

        let exit = Actor::new(
            "exit",
            ActorType::CollidableZone,
            Transform3D::from_translation_scale(Vec3::new(0.0, 0.0, -16.0), Vec3::new(6.0, 4.0, 2.0)),
        )
        .with_collision(CollisionPrimitive::unit_box(), CollisionRole::Zone);
        sim.objects.add(exit)?;
        Ok(())
    }

    fn build_props(&self, sim: &mut Simulation) -> Result<(), AppError> {
        let sphere = self.geometry.require("sphere")?;

        let coin = Actor::new("coin", ActorType::CollidablePickup, Transform3D::default())
            .with_geometry(Arc::clone(&sphere))
            .with_material(Material::new().with_texture(self.textures.require("gold")?))
            .with_collision(CollisionPrimitive::sphere(0.5), CollisionRole::Solid)
            .with_controller(Box::new(RotationController::new("coin spin", Vec3::new(0.0, 90.0, 0.0))));
        sim.objects.register_archetype("coin", coin);
        for (id, z) in [("coin 1", -8.0), ("coin 2", -40.0)] {
            sim.events.publish(
                EventData::new(EventActionType::OnAddActor, EventCategoryType::SystemAdd)
                    .with_text("coin")
                    .with_text(id)
                    .with_arg(EventArg::Vector(Vec3::new(0.0, 0.0, z))),
            )?;
        }

        let lamp = Actor::new("lamp", ActorType::Decorator, Transform3D::from_translation(Vec3::new(-6.0, 3.0, -12.0)))
            .with_geometry(Arc::clone(&sphere))
            .with_controller(Box::new(TranslationSineLerpController::new(
                "bob",
                Vec3::y(),
                TrigonometricParameters::new(0.5, 2.0, 0.0),
            )))
            .with_controller(Box::new(ColorSineLerpController::new(
                "glow",
                Vec3::new(1.0, 0.8, 0.2),
                Vec3::new(1.0, 0.2, 0.1),
                TrigonometricParameters::new(1.0, 1.0, 0.0),
            )));
        sim.objects.add(lamp)?;

        let mut path = Transform3DCurve::new(CurveLoopType::Cycle);
        path.add(Vec3::new(-10.0, 6.0, -5.0), -Vec3::z(), Vec3::y(), 0.0);
        path.add(Vec3::new(10.0, 6.0, -5.0), -Vec3::z(), Vec3::y(), 4000.0);
        path.add(Vec3::new(-10.0, 6.0, -5.0), -Vec3::z(), Vec3::y(), 8000.0);
        let drone = Actor::new("drone", ActorType::Decorator, Transform3D::default())
            .with_geometry(sphere)
            .with_controller(Box::new(Track3DController::new("patrol", path)));
        sim.objects.add(drone)?;
        Ok(())
    }

    fn build_player(&self, sim: &mut Simulation) -> Result<(), AppError> {
        let player = Actor::new(PLAYER_ID, ActorType::CollidablePlayer, Transform3D::default())
            .with_geometry(self.geometry.require("cube")?)
            .with_collision(CollisionPrimitive::unit_box(), CollisionRole::Solid)
            .with_controller(Box::new(PlayerInputController::new("keys", MoveKeys::arrows(), MoveSpeeds::default())))
            .with_response(Box::new(PlayerCollisionResponse));
        sim.objects.add(player)?;
        Ok(())
    }

    fn build_ui(&self, sim: &mut Simulation) -> Result<(), AppError> {
        let quad = self.geometry.require("quad")?;
        let bar = Actor::new(
            "health bar",
            ActorType::UITexture,
            Transform3D::from_translation_scale(Vec3::new(20.0, 20.0, 0.0), Vec3::new(200.0, 10.0, 1.0)),
        )
        .with_geometry(Arc::clone(&quad))
        .with_controller(Box::new(UiProgressController::new(HEALTH_BAR_ID, &sim.events, 100, 100)));
        sim.objects.add(bar)?;

        let service = Actor::new(
            "service bar",
            ActorType::UITexture,
            Transform3D::from_translation_scale(Vec3::new(20.0, 40.0, 0.0), Vec3::new(200.0, 10.0, 1.0)),
        )
        .with_geometry(Arc::clone(&quad))
        .with_controller(Box::new(UiProgressController::new(SERVICE_BAR_ID, &sim.events, 0, 100)));
        sim.objects.add(service)?;

        let title = Actor::new("title", ActorType::UIText, Transform3D::from_translation(Vec3::new(960.0, 100.0, 0.0)))
            .with_controller(Box::new(UiExpireController::new("title timeout", 1500.0)));
        sim.objects.add(title)?;

        let badge = Actor::new("badge", ActorType::UITexture, Transform3D::from_translation(Vec3::new(960.0, 540.0, 0.0)))
            .with_geometry(quad)
            .with_controller(Box::new(UiRotationScaleExpireController::new("badge out", 180.0, -0.5, 3000.0)));
        sim.objects.add(badge)?;
        Ok(())
    }

    fn build_customers(&mut self, sim: &mut Simulation) -> Result<(), AppError> {
        let mut customers = CustomerManager::new(&sim.events, SERVICE_BAR_ID);
        for i in 0..3u8 {
            let id = format!("customer {i}");
            let z = -4.0 - 2.0 * f32::from(i);
            sim.objects.add(
                Actor::new(id.as_str(), ActorType::Customer, Transform3D::from_translation(Vec3::new(12.0, 0.0, z)))
                    .with_geometry(self.geometry.require("cube")?),
            )?;
            customers.enqueue(id, &mut self.rng);
        }
        self.customers = Some(customers);
        Ok(())
    }

    fn build_cameras(sim: &mut Simulation) {
        let projection = sim.config().cameras.default_projection;
        let viewport = Viewport::default();

        let intro = Camera3D::new("intro", Transform3D::from_translation(Vec3::new(0.0, 8.0, 25.0)), projection, viewport)
            .with_controller(Box::new(CameraElapsedTimeController::new("cut", "chase", 2000.0)))
            .with_controller(Box::new(FlightCameraController::new("fly", MoveKeys::wasd(), MoveSpeeds::default())));
        sim.cameras.add(intro);

        let chase = Camera3D::new("chase", Transform3D::from_translation(Vec3::new(0.0, 3.0, 10.0)), projection, viewport)
            .with_draw_active(false)
            .with_controller(Box::new(ThirdPersonController::new("follow", PLAYER_ID, 8.0, 20.0, 0.2)));
        sim.cameras.add(chase);

        let rail = Camera3D::new("rail", Transform3D::default(), projection, Viewport::new(1600, 0, 320, 180))
            .with_draw_depth(1.0)
            .with_controller(Box::new(RailController::new(
                "dolly",
                RailParameters::new("aisle", Vec3::new(-15.0, 4.0, 5.0), Vec3::new(15.0, 4.0, 5.0)),
                PLAYER_ID,
            )));
        sim.cameras.add(rail);

        let security = Camera3D::new(
            "security",
            Transform3D::from_translation(Vec3::new(15.0, 8.0, -25.0)),
            projection,
            Viewport::new(1600, 900, 320, 180),
        )
        .with_draw_depth(2.0)
        .with_controller(Box::new(SecurityCameraController::new("sweep", 30.0, 0.5, Vec3::y())));
        sim.cameras.add(security);
    }

    fn handle_player_events(&mut self, sim: &mut Simulation) -> Result<(), AppError> {
        let events = match &self.player_events {
            Some(inbox) => inbox.drain(),
            None => return Ok(()),
        };
        for event in events {
            match event.action() {
                EventActionType::OnZoneEnter => {
                    self.zone_entries += 1;
                    if self.zone_entries == 1 {
                        log::info!("Player reached '{}'", event.text(0).unwrap_or("?"));
                        sim.events.publish(
                            EventData::new(EventActionType::OnHealthDelta, EventCategoryType::Player)
                                .with_text(HEALTH_BAR_ID)
                                .with_arg(EventArg::Int(-25)),
                        )?;
                    }
                }
                EventActionType::OnPickup => {
                    self.pickups += 1;
                    log::info!("Player picked up '{}'", event.text(0).unwrap_or("?"));
                    sim.events.publish(EventData::new(EventActionType::OnMoneyClicked, EventCategoryType::Cash))?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Application for DemoApp {
    fn initialize(&mut self, sim: &mut Simulation) -> Result<(), AppError> {
        self.load_content();
        self.build_architecture(sim)?;
        self.build_props(sim)?;
        self.build_player(sim)?;
        self.build_ui(sim)?;
        self.build_customers(sim)?;
        Self::build_cameras(sim);

        self.cash = Some(CashManager::register(&sim.events, 100));
        self.player_events = Some(EventInbox::new(&sim.events, EventCategoryType::Player));
        log::info!("Scene built: {} actors, {} cameras", sim.objects.len(), sim.cameras.len());
        Ok(())
    }

    fn sample_input(&mut self, tick: u64, input: &mut InputState) {
        match tick {
            0 => input.press(KeyCode::Up),
            120 => {
                input.release(KeyCode::Up);
                input.press(KeyCode::Left);
            }
            150 => input.release(KeyCode::Left),
            250 => input.press(KeyCode::G),
            251 => input.release(KeyCode::G),
            260 => input.press(KeyCode::H),
            261 => input.release(KeyCode::H),
            _ => {}
        }
        if let Some((cash, _)) = &self.cash {
            cash.borrow_mut().handle_input(&*input);
        }
    }

    fn update(&mut self, sim: &mut Simulation) -> Result<(), AppError> {
        self.handle_player_events(sim)?;

        let frame = sim.context.time.frame_count();
        if frame % CUSTOMER_INTERVAL == 0 {
            sim.events.publish(EventData::new(EventActionType::OnCustomerChanged, EventCategoryType::Customer))?;
        }
        if frame % SERVICE_INTERVAL == 0 {
            sim.events.publish(
                EventData::new(EventActionType::OnHealthDelta, EventCategoryType::Player)
                    .with_text(SERVICE_BAR_ID)
                    .with_arg(EventArg::Int(10)),
            )?;
        }
        if frame % SPEND_INTERVAL == 0 {
            sim.events.publish(EventData::new(EventActionType::OnMoneySpent, EventCategoryType::Cash))?;
        }
        if frame == 300 {
            sim.events.publish(EventData::new(EventActionType::OnToggle, EventCategoryType::Debug).with_text("collision"))?;
        }
        if let Some(customers) = &mut self.customers {
            customers.update(&mut sim.objects);
        }

        if frame % 100 == 0 {
            if let Some(camera) = sim.cameras.active_camera() {
                let transform = &camera.actor.transform;
                let ray = Ray::new(transform.translation, transform.look());
                match sim.objects.pick(&ray) {
                    Some((actor, distance)) => log::info!("'{}' is looking at '{}' ({:.1} away)", camera.id(), actor.id(), distance),
                    None => log::info!("'{}' is looking at nothing", camera.id()),
                }
            }
        }
        Ok(())
    }

    fn cleanup(&mut self, sim: &mut Simulation) {
        if let Some(player) = sim.objects.get(PLAYER_ID) {
            log::info!("Player finished at {:?}", player.transform.translation);
        }
        if let Some((cash, subscription)) = self.cash.take() {
            log::info!("Till balance {} after {} transaction(s)", cash.borrow().balance(), cash.borrow().transactions());
            sim.events.unsubscribe(subscription);
        }
        if let Some(customers) = &self.customers {
            log::info!("Served {:?}, {} still waiting", customers.served(), customers.waiting());
        }
        log::info!(
            "{} zone hit(s), {} pickup(s), active camera '{}'",
            self.zone_entries,
            self.pickups,
            sim.cameras.active_camera().map_or("none", Camera3D::id)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_runs_headless() {
        let mut sim = Simulation::new(SimConfig::default()).unwrap();
        let mut app = DemoApp::new(42);
        let mut renderer = NullRenderer::new();
        sim.run_for(&mut app, &mut renderer, 400, 1.0 / 60.0).unwrap();

        assert_eq!(renderer.frames, 400);
        assert_eq!(app.pickups, 1);
        assert!(app.zone_entries >= 1);
        assert!(!sim.objects.contains("coin 1"));
        assert!(sim.objects.contains("coin 2"));
        assert!(!sim.objects.contains("title"));
        assert_eq!(sim.cameras.active_camera().map(Camera3D::id), Some("chase"));
        assert_eq!(app.customers.as_ref().map(CustomerManager::waiting), Some(1));
    }
}
