use tabularium::{
    formatting::{render_display, Render, Syntax},
    language::{Entry, ParsedReference},
};

/// Trait for types that can present themselves via a renderer
pub trait Present {
    /// Present this value using the given renderer
    fn present(&self, renderer: &dyn Render) -> String;
}

impl Present for ParsedReference {
    fn present(&self, renderer: &dyn Render) -> String {
        render_display(renderer, &self.source, &self.volume, &self.reference)
    }
}

impl Present for Entry {
    fn present(&self, renderer: &dyn Render) -> String {
        renderer.style(Syntax::Entry, &self.name)
    }
}
