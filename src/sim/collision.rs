//! Collision detection and proximity queries
//!
//! Two independent queries run every tick, both pure functions of the car and
//! the world: binary contacts (obstacles, goal, screen) and a four-probe
//! clearance field that feeds the observation vector.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Car;
use super::world::World;

/// Result of the binary collision checks for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contacts {
    /// Indices of obstacles overlapping the car footprint
    pub obstacle_hits: Vec<usize>,
    /// Footprint overlaps the (unconsumed) goal
    pub goal: bool,
    /// Car center is outside the playable area
    pub out_of_bounds: bool,
}

impl Contacts {
    pub fn crashed(&self) -> bool {
        !self.obstacle_hits.is_empty()
    }
}

/// Check the car against obstacles, goal and screen bounds
pub fn detect(car: &Car, world: &World) -> Contacts {
    let obstacle_hits = world
        .obstacles
        .iter()
        .enumerate()
        .filter(|(_, obstacle)| car.footprint.intersects(obstacle))
        .map(|(i, _)| i)
        .collect();

    let goal = world
        .goal
        .as_ref()
        .is_some_and(|goal| car.footprint.intersects(goal));

    Contacts {
        obstacle_hits,
        goal,
        out_of_bounds: !world.bounds.contains(car.position.x, car.position.y),
    }
}

/// Minimum distance per probe direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clearances {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Clearances {
    pub fn to_array(self) -> [f32; 4] {
        [self.left, self.right, self.top, self.bottom]
    }
}

/// Strategy for turning a car position into probe distances
pub trait ClearanceModel {
    fn clearances(&self, center: Vec2, world: &World) -> Clearances;
}

/// Same-named-edge heuristic (see [`axis_edge_clearances`])
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisEdgeHeuristic;

impl ClearanceModel for AxisEdgeHeuristic {
    fn clearances(&self, center: Vec2, world: &World) -> Clearances {
        axis_edge_clearances(center, world)
    }
}

/// Clearances using the default model
pub fn clearances(center: Vec2, world: &World) -> Clearances {
    AxisEdgeHeuristic.clearances(center, world)
}

/// Approximate clearance field
///
/// Each probe compares one car coordinate against the wall and the same-named
/// edge of every obstacle, regardless of whether the obstacle lies in that
/// direction. The left/right probes measure the car's y coordinate and the
/// top/bottom probes its x coordinate:
///
/// | probe  | wall           | obstacle             |
/// |--------|----------------|----------------------|
/// | left   | `y`            | `y - left`           |
/// | right  | `width - y`    | `y - right`          |
/// | top    | `x`            | `x - top`            |
/// | bottom | `height - x`   | `x - bottom`         |
///
/// Every term is taken in absolute value and the minimum kept. This is not a
/// nearest-point distance.
pub fn axis_edge_clearances(center: Vec2, world: &World) -> Clearances {
    let Vec2 { x, y } = center;
    let bounds = world.bounds;

    let mut out = Clearances {
        left: y.abs(),
        right: (bounds.width - y).abs(),
        top: x.abs(),
        bottom: (bounds.height - x).abs(),
    };

    for obstacle in &world.obstacles {
        out.left = out.left.min((y - obstacle.left()).abs());
        out.right = out.right.min((y - obstacle.right()).abs());
        out.top = out.top.min((x - obstacle.top()).abs());
        out.bottom = out.bottom.min((x - obstacle.bottom()).abs());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{CarTuning, Settings};
    use crate::sim::rect::Rect;
    use crate::sim::world::Bounds;

    fn empty_world(width: f32, height: f32) -> World {
        World {
            bounds: Bounds::new(width, height),
            obstacles: Vec::new(),
            checkpoints: vec![Rect::new(Vec2::new(10.0, 10.0), 5.0, 5.0)],
            goal: None,
        }
    }

    fn car_at(x: f32, y: f32) -> Car {
        let mut car = Car::new(&CarTuning::default());
        car.place(Vec2::new(x, y));
        car
    }

    #[test]
    fn test_start_position_is_clear() {
        let settings = Settings::default();
        let world = World::new(&settings);
        let car = Car::new(&settings.car);
        let contacts = detect(&car, &world);
        assert_eq!(contacts, Contacts::default());
    }

    #[test]
    fn test_obstacle_hit_reports_index() {
        let world = World::new(&Settings::default());
        // Pad 6 spans x -350..450, y 587.5..612.5
        let car = car_at(200.0, 600.0);
        let contacts = detect(&car, &world);
        assert!(contacts.crashed());
        assert_eq!(contacts.obstacle_hits, vec![6]);
    }

    #[test]
    fn test_goal_contact_and_consumed_goal() {
        let mut world = World::new(&Settings::default());
        let car = car_at(305.0, 25.0);
        assert!(detect(&car, &world).goal);

        world.consume_goal();
        assert!(!detect(&car, &world).goal);
    }

    #[test]
    fn test_out_of_bounds_uses_center() {
        let world = empty_world(100.0, 100.0);
        // Footprint pokes out, center still inside
        assert!(!detect(&car_at(1.0, 50.0), &world).out_of_bounds);
        assert!(!detect(&car_at(100.0, 100.0), &world).out_of_bounds);
        assert!(detect(&car_at(-0.5, 50.0), &world).out_of_bounds);
        assert!(detect(&car_at(50.0, 100.5), &world).out_of_bounds);
    }

    #[test]
    fn test_clearances_walls_only() {
        let world = empty_world(1000.0, 800.0);
        let c = clearances(Vec2::new(100.0, 300.0), &world);
        assert_eq!(c.left, 300.0);
        assert_eq!(c.right, 700.0);
        assert_eq!(c.top, 100.0);
        assert_eq!(c.bottom, 700.0);
    }

    #[test]
    fn test_clearances_ignore_perpendicular_alignment() {
        let mut world = empty_world(1000.0, 800.0);
        // Far away from the car, but its edges line up with the car coordinates
        world
            .obstacles
            .push(Rect::new(Vec2::new(905.0, 600.0), 10.0, 10.0));
        let c = clearances(Vec2::new(605.0, 900.0), &world);
        // y - left = 900 - 900
        assert_eq!(c.left, 0.0);
        // y - right = 900 - 910
        assert_eq!(c.right, 10.0);
        // x - top = 605 - 595
        assert_eq!(c.top, 10.0);
        // x - bottom = 605 - 605
        assert_eq!(c.bottom, 0.0);
    }

    #[test]
    fn test_clearance_model_matches_free_fn() {
        let world = World::new(&Settings::default());
        let p = Vec2::new(60.0, 710.0);
        assert_eq!(AxisEdgeHeuristic.clearances(p, &world), clearances(p, &world));
    }
}
