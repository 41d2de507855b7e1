use serde_json::Value;

/// Anything that can render itself into a wire-level query body.
///
/// Query builders implement this; raw JSON bodies render as themselves.
pub trait RenderQuery {
    /// Body for search-style calls
    fn render(&self) -> Value;

    /// Body for count-style calls; defaults to [`render`](Self::render)
    fn render_count(&self) -> Value {
        self.render()
    }
}

impl RenderQuery for Value {
    fn render(&self) -> Value {
        self.clone()
    }
}

impl<T: RenderQuery + ?Sized> RenderQuery for &T {
    fn render(&self) -> Value {
        (**self).render()
    }

    fn render_count(&self) -> Value {
        (**self).render_count()
    }
}
