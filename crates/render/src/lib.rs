//! Rendering Adapter: renderer-agnostic interface over the physics world.
//!
//! # Invariants
//! - Renderers read bodies through [`Renderable`] and never mutate the world.
//! - The kernel has no dependency on this crate.

mod renderable;
mod renderer;

pub use renderable::Renderable;
pub use renderer::{DebugTextRenderer, HtmlRenderer, Renderer};

pub fn crate_info() -> &'static str {
    concat!("ballpit-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
