//! Wall reflection and pairwise body collision response.

use glam::DVec2;

use crate::body::Body;
use crate::config::Boundary;

/// Outcome of checking one ordered pair of bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Not touching.
    Apart,
    /// Overlapping; positions were separated and velocities exchanged.
    Resolved,
    /// Centers coincide exactly, so there is no contact normal. Left as is.
    Coincident,
}

/// Reflect a body off the walls it has reached.
///
/// The y axis is checked before the x axis and each axis independently, so a
/// corner hit bounces on both. Per axis the far wall wins over the near one.
/// Returns the number of axes that bounced.
pub fn reflect_off_walls(body: &mut Body, boundary: &Boundary) -> u32 {
    let diameter = body.diameter();
    let mut bounces = 0;
    if reflect_axis(
        &mut body.position.y,
        &mut body.velocity.y,
        boundary.height - diameter,
    ) {
        bounces += 1;
    }
    if reflect_axis(
        &mut body.position.x,
        &mut body.velocity.x,
        boundary.width - diameter,
    ) {
        bounces += 1;
    }
    bounces
}

fn reflect_axis(position: &mut f64, velocity: &mut f64, max: f64) -> bool {
    if *position >= max {
        *position = max;
    } else if *position <= 0.0 {
        *position = 0.0;
    } else {
        return false;
    }
    *velocity = -*velocity;
    true
}

/// Pull a body back inside the boundary without touching its velocity.
/// Returns whether it had to move.
pub fn clamp_inside(body: &mut Body, boundary: &Boundary) -> bool {
    let diameter = body.diameter();
    let max = DVec2::new(boundary.width - diameter, boundary.height - diameter);
    let clamped = body.position.max(DVec2::ZERO).min(max);
    if clamped == body.position {
        return false;
    }
    body.position = clamped;
    true
}

/// Resolve a possible collision between `a` and `b`.
///
/// On overlap both bodies are pushed apart along the center line by half
/// the overlap each, leaving them exactly tangent. Velocities are then
/// replaced per axis by the 1-D elastic collision result computed from the
/// pre-collision velocities and masses.
pub fn resolve_pair(a: &mut Body, b: &mut Body) -> Contact {
    let displacement = b.center() - a.center();
    let distance = displacement.length();
    let reach = a.radius() + b.radius();
    if distance >= reach {
        return Contact::Apart;
    }
    if distance == 0.0 {
        return Contact::Coincident;
    }

    let overlap = reach - distance;
    let normal = displacement / distance;
    let push = normal * overlap / 2.0;
    a.position -= push;
    b.position += push;

    let (m1, m2) = (a.mass(), b.mass());
    let (v1, v2) = (a.velocity, b.velocity);
    let total = m1 + m2;
    a.velocity = (v1 * (m1 - m2) + 2.0 * m2 * v2) / total;
    b.velocity = (v2 * (m2 - m1) + 2.0 * m1 * v1) / total;
    Contact::Resolved
}

/// Borrow two distinct bodies mutably. Panics if `i == j`.
pub(crate) fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    assert_ne!(i, j, "a body cannot collide with itself");
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
