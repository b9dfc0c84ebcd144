pub mod catalog;
pub mod controller;
pub mod error;
pub mod session;
pub mod view;

pub use catalog::{trending, CatalogLoader};
pub use controller::{Command, FallbackTicket, ViewController, ViewEvent, ViewState};
pub use error::SessionError;
pub use session::Session;
pub use view::{ListingItem, Marker, ViewModel};
