//! flow-tunnel
//!
//! A textured tunnel rendered with wgpu. The viewer looks down a box-shaped
//! tunnel, moves along it with the arrow keys and switches the texture
//! filtering mode from a menu to compare nearest, linear, mipmapped and
//! anisotropic sampling.
//!
//! High-level modules
//! - `camera`: depth camera, projection, matrix stack and the MVP uniform
//! - `config`: startup settings and asset directory resolution
//! - `context`: window, surface, device/queue and the render pipeline
//! - `controller`: translation of winit input into arrow keys and menu picks
//! - `data_structures`: tunnel geometry, GPU meshes and textures
//! - `flow`: the winit event loop
//! - `pipelines`: the texture-replace pipeline and its shader
//! - `resources`: image decoding and GPU upload of textures and meshes
//! - `render`: frame planning and submission
//! - `tunnel`: application state and per-event handlers
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod controller;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod tunnel;

pub use config::TunnelConfig;
pub use flow::run;
