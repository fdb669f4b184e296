mod core;
pub mod types;

// Re-export cache types
pub use types::*;
// Re-export the service trait and the in-memory implementation
pub use self::core::*;
