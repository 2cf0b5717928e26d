//! Integration tests for habitat-level behavior
//!
//! These tests need species builders and the habitat tick loop together,
//! so they live in vivarium-core which depends on both.

use glam::Vec3;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use vivarium_core::Habitat;
use vivarium_creature::{BodyId, Cod, Food, Shark, Steerable, SteeringParams};

const TANK: Vec3 = Vec3::new(4.0, 4.0, 4.0);

// Unscaled species are built for a much larger tank; everything spawned
// here is shrunk so boundary spheres fit inside the 4x4x4 test tank.
const COD_SCALE: f32 = 0.25;
const SHARK_SCALE: f32 = 0.4;
const FOOD_SCALE: f32 = 0.1;

fn habitat() -> Habitat {
    Habitat::new(TANK, SteeringParams::default())
}

fn spawn_cod(habitat: &mut Habitat, position: Vec3, rng: &mut Xoshiro256StarStar) -> BodyId {
    let mut cod = Cod::build(habitat.scene_mut(), position, rng).unwrap();
    cod.body_mut()
        .set_uniform_scale(COD_SCALE, habitat.scene_mut());
    habitat.spawn(Box::new(cod)).unwrap()
}

fn spawn_shark(habitat: &mut Habitat, position: Vec3, rng: &mut Xoshiro256StarStar) -> BodyId {
    let mut shark = Shark::build(habitat.scene_mut(), position, rng).unwrap();
    shark
        .body_mut()
        .set_uniform_scale(SHARK_SCALE, habitat.scene_mut());
    habitat.spawn(Box::new(shark)).unwrap()
}

fn spawn_food(habitat: &mut Habitat, position: Vec3, rng: &mut Xoshiro256StarStar) -> BodyId {
    let food = Food::build(habitat.scene_mut(), position, FOOD_SCALE, rng).unwrap();
    habitat.spawn(Box::new(food)).unwrap()
}

// ============================================================================
// Occupant Ordering Tests
// ============================================================================

#[test]
fn test_occupants_sorted_by_rank_statics_last() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(1);
    let mut habitat = habitat();

    spawn_food(&mut habitat, Vec3::new(0.0, 1.0, 0.0), &mut rng);
    spawn_cod(&mut habitat, Vec3::new(1.0, 0.0, 0.0), &mut rng);
    spawn_shark(&mut habitat, Vec3::new(-1.0, 0.0, 0.0), &mut rng);

    let ranks: Vec<Option<i32>> = habitat.occupants().iter().map(|o| o.rank()).collect();
    assert_eq!(ranks, vec![Some(100), Some(200), Some(1000), None]);
}

#[test]
fn test_remove_unknown_id_returns_false() {
    let mut habitat = habitat();
    assert!(!habitat.remove(BodyId::new()));
}

// ============================================================================
// Wall Containment Tests
// ============================================================================

#[test]
fn test_wall_bounce_reverses_heading() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(2);
    let mut habitat = habitat();

    // Scaled cod: radius 0.4, so the x limit is 2.0 - 0.4 = 1.6. From
    // x = 1.55 the projected position crosses it and the heading flips.
    let id = spawn_cod(&mut habitat, Vec3::new(1.55, 0.0, 0.0), &mut rng);
    habitat
        .steerable_mut(id)
        .unwrap()
        .body_mut()
        .set_heading(Vec3::X);

    habitat.tick();

    let body = habitat.steerable(id).unwrap().body();
    assert!(body.heading().x < 0.0);
    assert!(body.position().x < 1.55);
}

#[test]
fn test_population_stays_inside_tank() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(3);
    let mut habitat = habitat();

    spawn_cod(&mut habitat, Vec3::new(0.5, 0.0, 0.0), &mut rng);
    spawn_shark(&mut habitat, Vec3::new(-0.5, 0.0, 0.0), &mut rng);
    spawn_food(&mut habitat, Vec3::new(0.0, 1.0, 0.0), &mut rng);

    for _ in 0..200 {
        habitat.tick();
        for occupant in habitat.occupants() {
            let Some(steerable) = occupant.as_steerable() else {
                continue;
            };
            let body = steerable.body();
            let sphere_center = body.position() + body.center();
            for dim in 0..3 {
                assert!(
                    sphere_center[dim].abs() <= TANK[dim] / 2.0,
                    "boundary sphere escaped the tank on axis {dim}: {sphere_center}"
                );
            }
        }
    }
}

// ============================================================================
// Collision and Predation Tests
// ============================================================================

#[test]
fn test_equal_rank_collision_is_symmetric() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(4);
    let mut habitat = habitat();

    let a = spawn_cod(&mut habitat, Vec3::new(-0.2, 0.0, 0.0), &mut rng);
    let b = spawn_cod(&mut habitat, Vec3::new(0.2, 0.0, 0.0), &mut rng);
    habitat
        .steerable_mut(a)
        .unwrap()
        .body_mut()
        .set_heading(Vec3::X);
    habitat
        .steerable_mut(b)
        .unwrap()
        .body_mut()
        .set_heading(Vec3::NEG_X);

    habitat.tick();

    // Equal ranks never predate, they bounce. The setup is a mirror image
    // through the x = 0 plane, so the outcome has to be one as well.
    assert_eq!(habitat.steerable_count(), 2);
    let pos_a = habitat.steerable(a).unwrap().body().position();
    let pos_b = habitat.steerable(b).unwrap().body().position();
    let mirrored = Vec3::new(-pos_a.x, pos_a.y, pos_a.z);
    assert!((pos_b - mirrored).length() < 1e-4);
}

#[test]
fn test_predator_removes_most_junior_prey() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(5);
    let mut habitat = habitat();

    let shark = spawn_shark(&mut habitat, Vec3::ZERO, &mut rng);
    let food = spawn_food(&mut habitat, Vec3::new(0.5, 0.0, 0.0), &mut rng);
    habitat
        .steerable_mut(shark)
        .unwrap()
        .body_mut()
        .set_heading(Vec3::X);
    let food_root = habitat.steerable(food).unwrap().body().root();

    habitat.tick();

    // The food was inside the shark's boundary sphere and is the tank's
    // most junior occupant, so it gets eaten and fully despawned.
    assert_eq!(habitat.steerable_count(), 1);
    assert!(habitat.steerable(food).is_none());
    assert!(habitat.steerable(shark).is_some());
    assert!(habitat.scene().node(food_root).is_none());
}

// ============================================================================
// Rendering Tests
// ============================================================================

#[test]
fn test_draw_commands_cover_whole_population() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(6);
    let mut habitat = habitat();

    let empty = habitat.draw_commands().len();
    assert!(empty >= 1); // at least the tank itself

    spawn_cod(&mut habitat, Vec3::ZERO, &mut rng);
    let with_cod = habitat.draw_commands().len();
    assert!(with_cod > empty);

    habitat.tick();
    assert_eq!(habitat.draw_commands().len(), with_cod);
}
