//! Listener Config

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Args;

/// Where the HTTP listener binds.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to listen on
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,
}

impl ServerRuntimeConfig {
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
