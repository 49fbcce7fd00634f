//! The resolution engine: discovery, loading, caching, and lookup.

pub mod discovery;
pub mod loader;
mod registry;
pub mod resolver;

pub use discovery::{Discovery, DiscoveryOutcome, DiscoveryStrategy};
pub use loader::{CatalogLoader, LoadedCatalog};
pub use registry::CatalogRegistry;
