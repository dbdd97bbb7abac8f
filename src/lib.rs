pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod server;

pub use config::ServiceConfig;
pub use error::{RegistryError, Result};
pub use model::{Item, NewItem};
pub use registry::{ItemRegistry, ItemStore};
pub use server::ItemServer;
