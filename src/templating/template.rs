//! Template trait for rendering a printable index

use super::Index;

/// Trait for templates that transform the collected index into text
pub trait Template {
    /// Render the index, sorted and with every occurrence already rendered
    /// as UOF, into the final output
    fn render(&self, index: &Index) -> Result<String, tinytemplate::error::Error>;
}
