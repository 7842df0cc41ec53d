use ballpit_kernel::PhysicsWorld;

use crate::renderable::Renderable;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the world between ticks and produces one frame. It never
/// mutates the world; the kernel owns the truth.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render the world as it stands after the latest tick.
    fn render(&self, world: &PhysicsWorld) -> Self::Output;
}

/// Plain text frame: a header plus one line per body.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }

    fn body_line(body: &impl Renderable) -> String {
        let p = body.position();
        format!(
            "  [{}] pos=({:.2}, {:.2}) r={} color={}\n",
            body.id(),
            p.x,
            p.y,
            body.radius(),
            body.color()
        )
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, world: &PhysicsWorld) -> String {
        let boundary = world.boundary();
        let mut out = String::new();
        out.push_str(&format!(
            "=== Ballpit (tick={}, bodies={}, boundary={}x{}) ===\n",
            world.tick_count(),
            world.body_count(),
            boundary.width,
            boundary.height
        ));
        for body in world.bodies() {
            out.push_str(&Self::body_line(body));
        }
        out
    }
}

/// HTML frame: a fixed-size container with one absolutely positioned,
/// fully rounded `div` per body.
#[derive(Debug)]
pub struct HtmlRenderer {
    /// `id` attribute of the container element.
    pub container_id: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            container_id: "box".into(),
        }
    }
}

impl HtmlRenderer {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }

    fn body_element(body: &impl Renderable) -> String {
        let p = body.position();
        let d = body.diameter();
        format!(
            "  <div data-body=\"{}\" style=\"position:absolute;left:{}px;top:{}px;width:{d}px;height:{d}px;border-radius:50%;background-color:{};\"></div>\n",
            body.id().0,
            p.x,
            p.y,
            body.color()
        )
    }
}

impl Renderer for HtmlRenderer {
    type Output = String;

    fn render(&self, world: &PhysicsWorld) -> String {
        let boundary = world.boundary();
        let mut out = String::new();
        out.push_str(&format!(
            "<div id=\"{}\" data-tick=\"{}\" style=\"position:relative;width:{}px;height:{}px;\">\n",
            self.container_id,
            world.tick_count(),
            boundary.width,
            boundary.height
        ));
        for body in world.bodies() {
            out.push_str(&Self::body_element(body));
        }
        out.push_str("</div>\n");
        tracing::trace!(bytes = out.len(), "html frame rendered");
        out
    }
}
