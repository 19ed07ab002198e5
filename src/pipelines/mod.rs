//! Render pipelines.
//!
//! - `texture_replace` draws textured geometry with the sampled colour written as-is

pub mod texture_replace;
