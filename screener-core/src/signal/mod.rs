pub mod classifier;
pub mod setups;
pub mod types;

pub use classifier::{classify, classify_latest, classify_snapshot};
pub use setups::{create_setup, list_setups, BreakoutSetup, PullbackSetup, Setup, SetupInfo};
pub use types::{Levels, SetupKind, Signal};
