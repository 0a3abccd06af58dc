pub mod schema; // Column schema
pub mod data_loader; // Strategy trait
pub mod flare_data_loader; // Whitespace-separated flare file
pub mod factory; // Factory for loaders

pub use data_loader::{DataLoader, FlareDataset};
pub use flare_data_loader::FlareDataLoader;
pub use factory::DataLoaderFactory;
pub use schema::{FlareRecord, SCHEMA_VERSION};
