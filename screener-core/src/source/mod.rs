// source/mod.rs
pub mod errors;
pub mod memory;
pub mod traits;
pub mod types;
pub mod universe;
pub mod utils;
pub mod yahoo;

// Re-export main interfaces for easy access
pub use errors::SourceError;
pub use memory::MemoryDataSource;
pub use traits::{DataSource, Universe};
pub use universe::StaticUniverse;
pub use yahoo::YahooDataSource;
