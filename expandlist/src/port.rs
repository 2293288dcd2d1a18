/// A visual object owned by the embedding toolkit (a widget, a view, a render node, ...).
///
/// The list never inspects a visual; it only sizes, places and recycles it. Dropping a
/// visual destroys it.
pub trait Visual {
    /// Tells the visual its size for the coming layout pass.
    fn measure(&mut self, width: u32, height: u32);

    /// Places the visual at `top` (content coordinates) with the measured size.
    fn place(&mut self, top: i64, width: u32, height: u32);

    /// Called when the visual leaves the visible window and enters the recycle pool.
    fn recycle(&mut self) {}
}

/// Supplies items to the list.
pub trait ItemSource {
    type Visual: Visual;

    fn count(&self) -> usize;

    /// Renders item `index`.
    ///
    /// `recycled` is a visual previously used for another index, if the recycle pool had
    /// one. Implementations should refurbish it when possible, or drop it and build a new
    /// visual. The result must depend only on `index` and the source's own data.
    fn render_item(&mut self, index: usize, recycled: Option<Self::Visual>) -> Self::Visual;
}

/// Observes list movement. Every method defaults to a no-op.
///
/// `()` implements this trait and ignores every notification.
pub trait ListListener<V> {
    /// The content is being dragged toward earlier items.
    fn on_scroll_up(&mut self) {}

    /// The content is being dragged toward later items.
    fn on_scroll_down(&mut self) {}

    fn on_end_of_list_reached(&mut self) {}

    /// Reports the reveal ratio of a laid out visual, in `[0, 1]`.
    fn on_item_ratio_changed(&mut self, _visual: &V, _ratio: f32) {}

    /// Reports the index of the elastic (topmost) item after a scroll offset change.
    fn on_item_index_changed(&mut self, _index: usize) {}

    fn on_item_clicked(&mut self, _index: usize) {}
}

impl<V> ListListener<V> for () {}

impl<V, L: ListListener<V> + ?Sized> ListListener<V> for &mut L {
    fn on_scroll_up(&mut self) {
        (**self).on_scroll_up();
    }

    fn on_scroll_down(&mut self) {
        (**self).on_scroll_down();
    }

    fn on_end_of_list_reached(&mut self) {
        (**self).on_end_of_list_reached();
    }

    fn on_item_ratio_changed(&mut self, visual: &V, ratio: f32) {
        (**self).on_item_ratio_changed(visual, ratio);
    }

    fn on_item_index_changed(&mut self, index: usize) {
        (**self).on_item_index_changed(index);
    }

    fn on_item_clicked(&mut self, index: usize) {
        (**self).on_item_clicked(index);
    }
}
