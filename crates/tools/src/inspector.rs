use ballpit_common::BodyId;
use ballpit_kernel::{Body, PhysicsWorld, TickStats};
use glam::DVec2;

/// World inspector for developer tooling.
///
/// Provides read-only queries against the world for debugging, the CLI and
/// the desktop side panel.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &PhysicsWorld) -> WorldSummary {
        let bodies = world.bodies();
        WorldSummary {
            tick: world.tick_count(),
            body_count: bodies.len(),
            momentum: bodies.iter().map(Body::momentum).sum(),
            kinetic_energy: bodies.iter().map(Body::kinetic_energy).sum(),
            max_speed: bodies
                .iter()
                .map(|b| b.velocity.length())
                .fold(0.0, f64::max),
            out_of_bounds: Self::out_of_bounds(world).len(),
            last_tick: world.last_tick_stats(),
        }
    }

    /// Details of a single body.
    pub fn inspect_body(world: &PhysicsWorld, id: BodyId) -> Option<BodyInfo> {
        world.body(id).map(|b| BodyInfo {
            id,
            position: [b.position.x, b.position.y],
            velocity: [b.velocity.x, b.velocity.y],
            radius: b.radius(),
            mass: b.mass(),
        })
    }

    /// List all body ids in the world.
    pub fn list_bodies(world: &PhysicsWorld) -> Vec<BodyId> {
        world.bodies().iter().map(Body::id).collect()
    }

    /// Bodies whose bounding box pokes outside the boundary. Empty after
    /// every tick in a healthy world.
    pub fn out_of_bounds(world: &PhysicsWorld) -> Vec<BodyId> {
        let boundary = world.boundary();
        world
            .bodies()
            .iter()
            .filter(|b| {
                let max = DVec2::new(
                    boundary.width - b.diameter(),
                    boundary.height - b.diameter(),
                );
                !(b.position.cmpge(DVec2::ZERO).all() && b.position.cmple(max).all())
            })
            .map(Body::id)
            .collect()
    }

    /// Pairs of distinct bodies whose circles currently overlap.
    pub fn overlapping_pairs(world: &PhysicsWorld) -> Vec<(BodyId, BodyId)> {
        let bodies = world.bodies();
        let mut pairs = Vec::new();
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                if a.center().distance(b.center()) < a.radius() + b.radius() {
                    pairs.push((a.id(), b.id()));
                }
            }
        }
        pairs
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone)]
pub struct WorldSummary {
    pub tick: u64,
    pub body_count: usize,
    /// Total momentum, mass times velocity summed over bodies.
    pub momentum: DVec2,
    pub kinetic_energy: f64,
    pub max_speed: f64,
    pub out_of_bounds: usize,
    pub last_tick: TickStats,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tick={} bodies={} momentum=({:.2}, {:.2}) energy={:.2} max_speed={:.2} contacts={} wall_bounces={} out_of_bounds={}",
            self.tick,
            self.body_count,
            self.momentum.x,
            self.momentum.y,
            self.kinetic_energy,
            self.max_speed,
            self.last_tick.contacts,
            self.last_tick.wall_bounces,
            self.out_of_bounds
        )
    }
}

/// Detailed info about a single body.
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub id: BodyId,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub radius: f64,
    pub mass: f64,
}

impl std::fmt::Display for BodyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Body [{}] pos=({:.2}, {:.2}) vel=({:.2}, {:.2}) r={} m={}",
            self.id,
            self.position[0],
            self.position[1],
            self.velocity[0],
            self.velocity[1],
            self.radius,
            self.mass,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballpit_kernel::{Boundary, WorldConfig};

    fn body(x: f64, y: f64, radius: f64, vx: f64, vy: f64) -> Body {
        Body::new(DVec2::new(x, y), radius, DVec2::new(vx, vy))
    }

    #[test]
    fn summary_empty_world() {
        let world = PhysicsWorld::from_bodies(Boundary::default(), Vec::new());
        let summary = WorldInspector::summary(&world);
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.body_count, 0);
        assert_eq!(summary.kinetic_energy, 0.0);
        assert_eq!(summary.max_speed, 0.0);
    }

    #[test]
    fn summary_totals() {
        let world = PhysicsWorld::from_bodies(
            Boundary::default(),
            vec![body(10.0, 10.0, 10.0, 3.0, 4.0), body(100.0, 10.0, 5.0, -2.0, 0.0)],
        );
        let summary = WorldInspector::summary(&world);
        assert_eq!(summary.body_count, 2);
        assert_eq!(summary.momentum, DVec2::new(20.0, 40.0));
        assert_eq!(summary.kinetic_energy, 125.0 + 10.0);
        assert_eq!(summary.max_speed, 5.0);
    }

    #[test]
    fn energy_survives_many_ticks() {
        let config = WorldConfig {
            seed: Some(21),
            ..WorldConfig::default()
        };
        let mut world = PhysicsWorld::from_config(&config).unwrap();
        let before = WorldInspector::summary(&world).kinetic_energy;
        for _ in 0..300 {
            world.tick();
        }
        let after = WorldInspector::summary(&world);
        assert!((before - after.kinetic_energy).abs() < 1e-6 * before);
        assert_eq!(after.out_of_bounds, 0);
    }

    #[test]
    fn inspect_body_found() {
        let world = PhysicsWorld::from_bodies(
            Boundary::default(),
            vec![body(1.0, 2.0, 8.0, 0.5, -0.5)],
        );
        let info = WorldInspector::inspect_body(&world, BodyId(0)).unwrap();
        assert_eq!(info.position, [1.0, 2.0]);
        assert_eq!(info.velocity, [0.5, -0.5]);
        assert_eq!(info.mass, 8.0);
        assert!(info.to_string().starts_with("Body [#000]"));
    }

    #[test]
    fn inspect_body_not_found() {
        let world = PhysicsWorld::from_bodies(Boundary::default(), Vec::new());
        assert!(WorldInspector::inspect_body(&world, BodyId(4)).is_none());
    }

    #[test]
    fn list_bodies_in_order() {
        let world = PhysicsWorld::from_bodies(
            Boundary::default(),
            vec![body(0.0, 0.0, 5.0, 1.0, 1.0), body(50.0, 0.0, 5.0, 1.0, 1.0)],
        );
        assert_eq!(WorldInspector::list_bodies(&world), vec![BodyId(0), BodyId(1)]);
    }

    #[test]
    fn out_of_bounds_detects_straddling_body() {
        // Initial placement may straddle the far wall until the first tick.
        let mut world = PhysicsWorld::from_bodies(
            Boundary::default(),
            vec![body(1185.0, 300.0, 10.0, 1.0, 0.0), body(500.0, 300.0, 10.0, 1.0, 0.0)],
        );
        assert_eq!(WorldInspector::out_of_bounds(&world), vec![BodyId(0)]);
        world.tick();
        assert!(WorldInspector::out_of_bounds(&world).is_empty());
    }

    #[test]
    fn overlapping_pairs_listed_once() {
        let world = PhysicsWorld::from_bodies(
            Boundary::default(),
            vec![
                body(100.0, 100.0, 10.0, 0.0, 0.0),
                body(110.0, 100.0, 10.0, 0.0, 0.0),
                body(500.0, 100.0, 10.0, 0.0, 0.0),
            ],
        );
        assert_eq!(
            WorldInspector::overlapping_pairs(&world),
            vec![(BodyId(0), BodyId(1))]
        );
    }

    #[test]
    fn summary_display() {
        let world = PhysicsWorld::from_bodies(Boundary::default(), Vec::new());
        let s = WorldInspector::summary(&world).to_string();
        assert!(s.contains("tick=0"));
        assert!(s.contains("bodies=0"));
    }
}
