//! Startup configuration.

use std::path::{Path, PathBuf};

/// Everything the tunnel needs to know before the window opens.
#[derive(Clone, Debug, PartialEq)]
pub struct TunnelConfig {
    pub title: String,
    pub window_size: (u32, u32),
    pub clear_colour: wgpu::Color,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub initial_depth: f32,
    pub depth_step: f32,
    pub asset_dir: PathBuf,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            title: "Tunnel".to_string(),
            window_size: (800, 600),
            clear_colour: wgpu::Color::BLACK,
            fovy_degrees: 80.0,
            znear: 1.0,
            zfar: 120.0,
            initial_depth: -65.0,
            depth_step: 0.5,
            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl TunnelConfig {
    /// Resolves the asset directory from the program path (`argv[0]`).
    ///
    /// `<dir of argv[0]>/assets` wins when it exists, otherwise `./assets` is used.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let program = args.into_iter().next();
        let asset_dir = program
            .as_deref()
            .and_then(|program| Path::new(program).parent())
            .map(|dir| dir.join("assets"))
            .filter(|dir| dir.is_dir())
            .unwrap_or_else(|| PathBuf::from("assets"));
        log::debug!("asset directory: {}", asset_dir.display());
        Self {
            asset_dir,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_tunnel_view() {
        let config = TunnelConfig::default();
        assert_eq!(config.window_size, (800, 600));
        assert_eq!(config.fovy_degrees, 80.0);
        assert_eq!((config.znear, config.zfar), (1.0, 120.0));
        assert_eq!(config.initial_depth, -65.0);
        assert_eq!(config.depth_step, 0.5);
        assert_eq!(config.clear_colour, wgpu::Color::BLACK);
    }

    #[test]
    fn assets_next_to_the_program_win() {
        let manifest = env!("CARGO_MANIFEST_DIR");
        let program = format!("{manifest}/flow-tunnel");
        let config = TunnelConfig::from_args(vec![program]);
        assert_eq!(config.asset_dir, Path::new(manifest).join("assets"));
    }

    #[test]
    fn falls_back_to_the_working_directory() {
        let config = TunnelConfig::from_args(vec!["/nonexistent/bin/flow-tunnel".to_string()]);
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
        let config = TunnelConfig::from_args(Vec::new());
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
    }
}
