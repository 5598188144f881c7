mod cache;
mod directory;
mod errors;
mod logging;
mod root;
mod server;

pub use cache::CacheConfig;
pub use directory::DirectoryConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
