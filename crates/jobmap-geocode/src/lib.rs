pub mod cache;
pub mod client;
pub mod error;
pub mod resolver;
pub(crate) mod retry;
pub mod store;
pub mod types;

pub use cache::GeocodeCache;
pub use client::GeocodeClient;
pub use error::{CacheStoreError, GeocodeError};
pub use resolver::GeocodeResolver;
pub use store::{CacheStore, CACHE_SLOT};
pub use types::{GeocodeResponse, GeocodeResult};
