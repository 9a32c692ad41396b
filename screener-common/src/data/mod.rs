pub mod errors;
pub mod types;

pub use errors::DataError;
pub use types::{Bar, Instrument, Series};
