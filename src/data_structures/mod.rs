//! Tunnel data structures.
//!
//! - `tunnel` contains the procedural geometry of the four tunnel surfaces
//! - `mesh` holds the surfaces once uploaded as vertex buffers
//! - `texture` contains the GPU texture wrapper and its sampling state

pub mod mesh;
pub mod texture;
pub mod tunnel;
