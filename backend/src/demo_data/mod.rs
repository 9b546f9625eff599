//! Startup wiring for demo data seeding.

mod config;
mod startup;

pub use config::DemoDataSettings;
pub use startup::{DemoDataError, seed_demo_data};
