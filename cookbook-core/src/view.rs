//! Rendering boundary between pages and whatever draws them.

/// Shows one-off notices to the user.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Draws a page's list. `render` replaces whatever was shown before.
pub trait View<T>: Notifier {
    fn render(&mut self, items: &[T]);
}
