// Types representing the things being indexed

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
