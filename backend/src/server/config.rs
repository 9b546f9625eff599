//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use crate::demo_data::DemoDataSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) demo_data: DemoDataSettings,
}

impl ServerConfig {
    /// Construct a server configuration binding to `bind_addr` with demo
    /// data seeding switched off.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            demo_data: DemoDataSettings { enabled: false },
        }
    }

    /// Attach demo data settings controlling startup seeding.
    #[must_use]
    pub fn with_demo_data(mut self, demo_data: DemoDataSettings) -> Self {
        self.demo_data = demo_data;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn demo_data_defaults_to_off() {
        let config = ServerConfig::new("127.0.0.1:8080".parse().expect("valid address"));
        assert!(!config.demo_data.enabled);
        assert_eq!(config.bind_addr().port(), 8080);
    }

    #[rstest]
    fn with_demo_data_replaces_the_settings() {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("valid address"))
            .with_demo_data(DemoDataSettings { enabled: true });
        assert!(config.demo_data.enabled);
    }
}
