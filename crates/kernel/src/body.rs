use ballpit_common::{BodyId, Rgb};
use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;

/// A circular body.
///
/// `position` is the top-left corner of the body's bounding box, not its
/// center. `velocity` is displacement per tick. The radius is fixed at
/// creation and the mass is always equal to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    id: BodyId,
    pub position: DVec2,
    pub velocity: DVec2,
    radius: f64,
    color: Rgb,
}

impl Body {
    /// Create a white body. `radius` must be positive. The id is assigned
    /// when the body joins a world.
    pub fn new(position: DVec2, radius: f64, velocity: DVec2) -> Self {
        Self {
            id: BodyId(0),
            position,
            velocity,
            radius,
            color: Rgb::default(),
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Draw a body from the configured ranges.
    ///
    /// Radius, position and speed are whole numbers. The position may leave
    /// the body straddling the far walls; the first wall check pulls it in.
    /// Both axes share one speed, each with its own random sign.
    pub fn random<R: Rng>(id: BodyId, config: &WorldConfig, rng: &mut R) -> Self {
        let radius = f64::from(config.radius.sample(rng));
        let x = random_coordinate(config.boundary.width - radius, rng);
        let y = random_coordinate(config.boundary.height - radius, rng);
        let color = Rgb::new(rng.random(), rng.random(), rng.random());

        let direction = DVec2::new(random_sign(rng), random_sign(rng));
        let speed = f64::from(config.speed.sample(rng));

        Self {
            id,
            position: DVec2::new(x, y),
            velocity: direction * speed,
            radius,
            color,
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: BodyId) {
        self.id = id;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    pub fn mass(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Center of the bounding box.
    pub fn center(&self) -> DVec2 {
        self.position + DVec2::splat(self.radius)
    }

    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass()
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass() * self.velocity.length_squared()
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            id: self.id,
            position: self.position,
            radius: self.radius,
            color: self.color,
        }
    }
}

/// Read-only copy of what a renderer needs to draw a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub position: DVec2,
    pub radius: f64,
    pub color: Rgb,
}

fn random_coordinate<R: Rng>(max: f64, rng: &mut R) -> f64 {
    let max = max.floor().max(0.0) as u32;
    f64::from(rng.random_range(0..=max))
}

fn random_sign<R: Rng>(rng: &mut R) -> f64 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}
