use ballpit_common::{BodyId, Rgb};
use ballpit_kernel::{Body, BodySnapshot};
use glam::DVec2;

/// What a display layer may know about a body: where it is, how big it is
/// and what color to paint it. Read-only by construction.
pub trait Renderable {
    fn id(&self) -> BodyId;

    /// Top-left corner of the bounding box.
    fn position(&self) -> DVec2;

    fn radius(&self) -> f64;

    fn color(&self) -> Rgb;

    fn diameter(&self) -> f64 {
        self.radius() * 2.0
    }

    fn center(&self) -> DVec2 {
        self.position() + DVec2::splat(self.radius())
    }
}

impl Renderable for Body {
    fn id(&self) -> BodyId {
        Body::id(self)
    }

    fn position(&self) -> DVec2 {
        self.position
    }

    fn radius(&self) -> f64 {
        Body::radius(self)
    }

    fn color(&self) -> Rgb {
        Body::color(self)
    }
}

impl Renderable for BodySnapshot {
    fn id(&self) -> BodyId {
        self.id
    }

    fn position(&self) -> DVec2 {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn color(&self) -> Rgb {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_and_snapshot_agree() {
        let body = Body::new(DVec2::new(4.0, 6.0), 9.0, DVec2::ONE).with_color(Rgb::new(9, 8, 7));
        let snap = body.snapshot();

        assert_eq!(Renderable::id(&body), Renderable::id(&snap));
        assert_eq!(Renderable::position(&body), Renderable::position(&snap));
        assert_eq!(Renderable::radius(&body), Renderable::radius(&snap));
        assert_eq!(Renderable::color(&body), Renderable::color(&snap));
    }

    #[test]
    fn default_center_and_diameter() {
        let snap = BodySnapshot {
            id: BodyId(3),
            position: DVec2::new(10.0, 20.0),
            radius: 5.0,
            color: Rgb::default(),
        };
        assert_eq!(snap.diameter(), 10.0);
        assert_eq!(Renderable::center(&snap), DVec2::new(15.0, 25.0));
    }
}
