pub mod scanner;
pub mod screener;
pub mod types;

// Re-export main interfaces
pub use scanner::ScannerService;
pub use screener::Screener;
pub use types::*;
