//! Interactive 6x6 grid of shaded spheres, rasterized in software and
//! presented in the terminal.
//!
//! The binary wires these modules together: [`app::run`] opens the terminal
//! [`terminal::Surface`], builds the [`renderer::Renderer`] and runs frames
//! until Escape or Ctrl+C. Clicks are resolved by [`picking`] against the
//! cell layout in [`grid`].

pub mod app;
pub mod cli;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod grid;
pub mod input;
pub mod math;
pub mod picking;
pub mod renderer;
pub mod shading;
pub mod state;
pub mod terminal;
pub mod vertex;
