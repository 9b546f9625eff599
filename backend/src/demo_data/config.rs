//! Demo data configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Configuration values controlling demo data seeding at startup.
///
/// Off by default; set `DEMO_DATA_ENABLED=true` to start the service with
/// the fixture principals and cards in place.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DEMO_DATA")]
pub struct DemoDataSettings {
    /// Seed the demo principals and cards on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
}
