use flow_tunnel::TunnelConfig;

fn main() -> anyhow::Result<()> {
    flow_tunnel::run(TunnelConfig::from_args(std::env::args()))
}
