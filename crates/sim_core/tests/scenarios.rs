//! End-to-end scenarios driven through the public API

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use sim_core::actor::controller::ControllerCore;
use sim_core::collision::PlayerCollisionResponse;
use sim_core::events::{EventInbox, PausableComponent};
use sim_core::input::NoInput;
use sim_core::prelude::*;

/// Stages the same translation every tick
#[derive(Clone)]
struct Push {
    core: ControllerCore,
    step: Vec3,
}

impl Push {
    fn boxed(step: Vec3) -> Box<dyn Controller> {
        Box::new(Self {
            core: ControllerCore::new("push", ControllerType::PlayerInput),
            step,
        })
    }
}

impl Controller for Push {
    fn core(&self) -> &ControllerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ControllerCore {
        &mut self.core
    }

    fn update(&mut self, _ctx: &UpdateContext<'_>, actor: &mut Actor) {
        actor.transform.stage_translation(self.step);
    }

    fn duplicate(&self) -> Box<dyn Controller> {
        Box::new(self.clone())
    }
}

fn sim() -> Simulation {
    Simulation::new(SimConfig::default()).unwrap()
}

fn crate_box(id: &str, x: f32) -> Actor {
    Actor::new(id, ActorType::CollidableProp, Transform3D::from_translation_scale(Vec3::new(x, 0.0, 0.0), Vec3::repeat(2.0)))
        .with_collision(CollisionPrimitive::unit_box(), CollisionRole::Solid)
}

#[test]
fn blocked_move_leaves_actor_in_place() {
    let mut sim = sim();
    sim.objects.add(crate_box("one", 0.0).with_controller(Push::boxed(Vec3::new(1.0, 0.0, 0.0)))).unwrap();
    sim.objects.add(crate_box("two", 2.0)).unwrap();
    sim.objects.add(crate_box("three", 10.0)).unwrap();

    sim.tick(1.0 / 60.0, &NoInput, &mut NullRenderer::new());

    let one = sim.objects.get("one").unwrap();
    assert_relative_eq!(one.transform.translation, Vec3::zeros());
    assert_eq!(one.collidee().map(|c| c.id.as_str()), Some("two"));
    assert_relative_eq!(sim.objects.get("two").unwrap().transform.translation.x, 2.0);
}

#[test]
fn clear_move_is_applied() {
    let mut sim = sim();
    sim.objects.add(crate_box("three", 10.0).with_controller(Push::boxed(Vec3::new(1.0, 0.0, 0.0)))).unwrap();
    sim.objects.add(crate_box("one", 0.0)).unwrap();

    sim.tick(1.0 / 60.0, &NoInput, &mut NullRenderer::new());

    let three = sim.objects.get("three").unwrap();
    assert_relative_eq!(three.transform.translation.x, 11.0);
    assert!(three.collidee().is_none());
}

#[test]
fn small_steps_never_tunnel() {
    let mut sim = sim();
    sim.objects.add(crate_box("mover", 0.0).with_controller(Push::boxed(Vec3::new(0.4, 0.0, 0.0)))).unwrap();
    sim.objects.add(crate_box("wall", 6.0)).unwrap();

    for _ in 0..40 {
        sim.tick(0.016, &NoInput, &mut NullRenderer::new());
    }

    let mover = sim.objects.get("mover").unwrap();
    // Mover's right face never passes the wall's left face at x = 5
    assert!(mover.transform.translation.x + 1.0 <= 5.0 + 1e-4);
    assert!(mover.transform.translation.x > 3.0);
    assert_eq!(mover.collidee().map(|c| c.id.as_str()), Some("wall"));
}

#[test]
fn pure_overlap_is_symmetric_but_projection_is_not() {
    let mut a = CollisionPrimitive::unit_box();
    a.update(&Transform3D::from_translation_scale(Vec3::zeros(), Vec3::repeat(2.0)));
    let mut b = CollisionPrimitive::sphere(0.5);
    b.update(&Transform3D::from_translation(Vec3::new(1.4, 0.0, 0.0)));

    assert_eq!(a.intersects(&b), b.intersects(&a));
    assert!(a.intersects(&b));

    let step = Vec3::new(-1.0, 0.0, 0.0);
    assert!(!a.intersects_projected(&b, step));
    assert!(b.intersects_projected(&a, step));
}

#[test]
fn player_entering_zone_is_announced() {
    let mut sim = sim();
    let entered = EventInbox::new(&sim.events, EventCategoryType::Player);
    sim.objects
        .add(
            crate_box("player", 0.0)
                .with_controller(Push::boxed(Vec3::new(0.5, 0.0, 0.0)))
                .with_response(Box::new(PlayerCollisionResponse)),
        )
        .unwrap();
    sim.objects
        .add(
            Actor::new("exit", ActorType::CollidableZone, Transform3D::from_translation_scale(Vec3::new(3.0, 0.0, 0.0), Vec3::repeat(2.0)))
                .with_collision(CollisionPrimitive::unit_box(), CollisionRole::Zone),
        )
        .unwrap();

    // 0 -> 0.5, then the next step would touch the zone's face at x = 2
    for _ in 0..2 {
        sim.tick(0.016, &NoInput, &mut NullRenderer::new());
    }
    sim.events.flush();
    assert_relative_eq!(sim.objects.get("player").unwrap().transform.translation.x, 0.5);

    let events = entered.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action(), EventActionType::OnZoneEnter);
    assert_eq!(events[0].text(0), Some("exit"));
    assert_eq!(events[0].sender(), Some("player"));
}

#[test]
fn picked_up_item_is_removed_next_tick() {
    let mut sim = sim();
    sim.objects
        .add(
            crate_box("player", 0.0)
                .with_controller(Push::boxed(Vec3::new(1.0, 0.0, 0.0)))
                .with_response(Box::new(PlayerCollisionResponse)),
        )
        .unwrap();
    sim.objects
        .add(
            Actor::new("coin", ActorType::CollidablePickup, Transform3D::from_translation(Vec3::new(2.0, 0.0, 0.0)))
                .with_collision(CollisionPrimitive::sphere(0.5), CollisionRole::Solid),
        )
        .unwrap();

    sim.tick(0.016, &NoInput, &mut NullRenderer::new());
    assert!(sim.objects.contains("coin"));
    sim.tick(0.016, &NoInput, &mut NullRenderer::new());
    assert!(!sim.objects.contains("coin"));
    assert_eq!(sim.objects.len(), 1);
}

#[test]
fn menu_pause_stops_every_pausable() {
    let mut sim = sim();
    let hud = PausableComponent::new(&sim.events, StatusFlags::default());
    sim.objects.add(crate_box("box", 0.0).with_controller(Push::boxed(Vec3::new(0.0, 0.0, -1.0)))).unwrap();

    sim.events.publish(EventData::new(EventActionType::OnPause, EventCategoryType::Menu)).unwrap();
    let mut renderer = NullRenderer::new();
    sim.tick(0.016, &NoInput, &mut renderer);

    assert_eq!(hud.status(), StatusFlags::OFF);
    assert_eq!(sim.objects.status(), StatusFlags::OFF);
    assert_eq!(sim.cameras.status(), StatusFlags::OFF);
    assert_relative_eq!(sim.objects.get("box").unwrap().transform.translation.z, 0.0);

    sim.events.publish(EventData::new(EventActionType::OnStart, EventCategoryType::Menu)).unwrap();
    sim.tick(0.016, &NoInput, &mut renderer);
    assert!(hud.is_updating());
    assert_relative_eq!(sim.objects.get("box").unwrap().transform.translation.z, -1.0);
}

#[test]
fn categories_deliver_in_publish_order() {
    let events = EventDispatcher::new(16);
    let log: Rc<RefCell<Vec<String>>> = Rc::default();
    for category in [EventCategoryType::Cash, EventCategoryType::Customer] {
        let log = Rc::clone(&log);
        events.subscribe_fn(category, move |event| {
            log.borrow_mut().push(format!("{:?}:{}", event.category(), event.int(0).unwrap_or_default()));
        });
    }

    for (i, category) in [EventCategoryType::Cash, EventCategoryType::Customer, EventCategoryType::Cash].into_iter().enumerate() {
        events
            .publish(EventData::new(EventActionType::OnMoneyClicked, category).with_arg(EventArg::Int(i as i32)))
            .unwrap();
    }
    assert_eq!(events.flush(), 3);

    let log = log.borrow();
    let cash: Vec<&String> = log.iter().filter(|line| line.starts_with("Cash")).collect();
    assert_eq!(cash, vec!["Cash:0", "Cash:2"]);
    assert_eq!(log.len(), 3);
    assert_eq!(events.flush(), 0);
}

#[test]
fn add_then_remove_restores_partitions() {
    let mut objects = ObjectManager::new(&SimConfig::default().scene, &EventDispatcher::new(4));
    objects.add(crate_box("a", 0.0)).unwrap();
    objects.add(crate_box("glass", 5.0).with_material(Material::new().with_alpha(0.3))).unwrap();
    let opaque_before: Vec<String> = objects.opaque_ids().into_iter().map(String::from).collect();
    let transparent_before: Vec<String> = objects.transparent_ids().into_iter().map(String::from).collect();

    objects.add(crate_box("b", 9.0)).unwrap();
    objects.add(crate_box("tint", 12.0).with_material(Material::new().with_alpha(0.9))).unwrap();
    objects.remove("b");
    objects.remove("tint");

    assert_eq!(objects.opaque_ids(), opaque_before);
    assert_eq!(objects.transparent_ids(), transparent_before);
}

#[test]
fn unmatched_camera_request_keeps_active_camera() {
    let mut sim = sim();
    for id in ["main", "rail"] {
        sim.cameras.add(Camera3D::new(id, Transform3D::default(), ProjectionParameters::default(), Viewport::default()));
    }
    sim.events
        .publish(EventData::new(EventActionType::OnCameraSetActive, EventCategoryType::Camera).with_text("rail"))
        .unwrap();
    sim.tick(0.016, &NoInput, &mut NullRenderer::new());
    assert_eq!(sim.cameras.active_camera().map(Camera3D::id), Some("rail"));

    sim.events
        .publish(EventData::new(EventActionType::OnCameraSetActive, EventCategoryType::Camera).with_text("drone"))
        .unwrap();
    sim.tick(0.016, &NoInput, &mut NullRenderer::new());
    assert_eq!(sim.cameras.active_camera().map(Camera3D::id), Some("rail"));
}
