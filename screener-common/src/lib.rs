pub mod data;

pub use data::{Bar, DataError, Instrument, Series};
