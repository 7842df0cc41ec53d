use ballpit_common::BodyId;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::body::{Body, BodySnapshot};
use crate::collision::{self, Contact};
use crate::config::{Boundary, ConfigError, WorldConfig};

/// Counters gathered during the most recent tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickStats {
    /// Axis reflections off the walls.
    pub wall_bounces: u32,
    /// Ordered pairs resolved. Each unordered pair can count twice.
    pub contacts: u32,
    /// Ordered pairs skipped because their centers coincided.
    pub coincident: u32,
    /// Bodies pulled back inside after overlap correction pushed them out.
    pub clamped: u32,
}

/// The simulation: a fixed set of bodies inside a boundary.
///
/// The world exclusively owns its bodies. Callers advance it with
/// [`PhysicsWorld::tick`] once per frame and read positions back between
/// ticks; nothing here knows how bodies are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsWorld {
    boundary: Boundary,
    bodies: Vec<Body>,
    tick: u64,
    last_stats: TickStats,
}

impl PhysicsWorld {
    /// Create `count` random bodies from the config's ranges.
    ///
    /// The config is not validated here; see [`PhysicsWorld::from_config`].
    pub fn initialize<R: Rng>(count: usize, config: &WorldConfig, rng: &mut R) -> Self {
        let bodies = (0..count)
            .map(|i| Body::random(BodyId(i as u32), config, rng))
            .collect();
        Self::with_bodies(config.boundary, bodies)
    }

    /// Validate the config, seed the RNG, pick a body count and initialize.
    pub fn from_config(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (seed, mut rng) = config.seeded_rng();
        let count = config.body_count.sample(&mut rng) as usize;
        tracing::info!(
            seed,
            count,
            width = config.boundary.width,
            height = config.boundary.height,
            "initializing world"
        );
        Ok(Self::initialize(count, config, &mut rng))
    }

    /// Build a world from explicit bodies. Ids are reassigned in order.
    pub fn from_bodies(boundary: Boundary, bodies: Vec<Body>) -> Self {
        Self::with_bodies(boundary, bodies)
    }

    fn with_bodies(boundary: Boundary, mut bodies: Vec<Body>) -> Self {
        for (i, body) in bodies.iter_mut().enumerate() {
            body.set_id(BodyId(i as u32));
        }
        Self {
            boundary,
            bodies,
            tick: 0,
            last_stats: TickStats::default(),
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Bodies are visited in array order. Each one is integrated, reflected
    /// off the walls, then checked against every other body. Bodies later in
    /// the array have not moved yet when an earlier body checks them, and a
    /// body touching several others keeps only the velocity from its last
    /// contact.
    pub fn tick(&mut self) {
        let mut stats = TickStats::default();
        let count = self.bodies.len();

        for i in 0..count {
            let body = &mut self.bodies[i];
            body.position += body.velocity;
            stats.wall_bounces += collision::reflect_off_walls(body, &self.boundary);

            for j in 0..count {
                if i == j {
                    continue;
                }
                let (a, b) = collision::pair_mut(&mut self.bodies, i, j);
                match collision::resolve_pair(a, b) {
                    Contact::Apart => {}
                    Contact::Resolved => stats.contacts += 1,
                    Contact::Coincident => {
                        tracing::trace!(a = %a.id(), b = %b.id(), "coincident centers, pair skipped");
                        stats.coincident += 1;
                    }
                }
            }
        }

        for body in &mut self.bodies {
            if collision::clamp_inside(body, &self.boundary) {
                stats.clamped += 1;
            }
        }

        self.tick += 1;
        self.last_stats = stats;
        tracing::trace!(
            tick = self.tick,
            wall_bounces = stats.wall_bounces,
            contacts = stats.contacts,
            clamped = stats.clamped,
            "tick complete"
        );
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn last_tick_stats(&self) -> TickStats {
        self.last_stats
    }

    /// Read-only copies of every body, in id order.
    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(Body::snapshot).collect()
    }

    /// FNV-1a over the tick and the exact bits of every body's state.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        for body in &self.bodies {
            mix(&mut h, &body.id().0.to_le_bytes());
            mix(&mut h, &body.position.x.to_le_bytes());
            mix(&mut h, &body.position.y.to_le_bytes());
            mix(&mut h, &body.velocity.x.to_le_bytes());
            mix(&mut h, &body.velocity.y.to_le_bytes());
            mix(&mut h, &body.radius().to_le_bytes());
        }
        h
    }
}
