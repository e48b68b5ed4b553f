pub mod credentials;
pub mod loader;
pub mod settings;

pub use credentials::Credentials;
pub use settings::{ClientSettings, FileConfig, LogFormat, LoggingConfig};
