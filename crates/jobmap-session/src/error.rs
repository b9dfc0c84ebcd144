use jobmap_core::ConfigError;
use jobmap_geocode::GeocodeError;
use thiserror::Error;

/// Startup failures. Once a session is running nothing here is raised.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}
