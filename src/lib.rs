//! A heat-diffusion field simulated on the GPU by ping-ponging between two
//! render targets, with pointer-driven heat injection.

#[cfg(feature = "window")]
#[macro_use]
extern crate glium;

#[cfg(feature = "window")]
pub mod app;
pub mod camera;
pub mod config;
pub mod error;
pub mod executor;
pub mod input;
pub mod kernel;
pub mod render;
pub mod scheduler;
pub mod shaders;
pub mod targets;

pub use crate::error::{Error, Result};
