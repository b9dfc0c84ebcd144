pub mod app_config;
pub mod config;
pub mod deep_link;
pub mod error;
pub mod filter;
pub mod location;
pub mod seed;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use deep_link::DeepLink;
pub use error::{ConfigError, CoreError};
pub use filter::{filter, filter_jobs, matches};
pub use location::{normalize, region_name};
pub use seed::{builtin_seed, load_seed_file, SeedJob};
pub use types::{
    ExperienceLevel, JobRecord, JobType, LatLng, QueryState, ZoomLevel, DEFAULT_MAP_CENTER,
};
