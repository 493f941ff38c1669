// Rendering occurrences as UOF text

pub mod formatter;
mod renderer;
mod syntax;
mod terminal;

// Re-export all public symbols
pub use formatter::Style;
pub use renderer::*;
pub use syntax::*;
pub use terminal::*;
