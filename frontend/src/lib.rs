pub mod analytics;
pub mod app;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod mount;
pub mod styles;

pub use app::App;
pub use bootstrap::{start, Bootstrap};
pub use config::{AppConfig, MountTarget};
pub use error::{StartupError, TelemetryError};
