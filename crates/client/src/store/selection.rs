//! Ephemeral UI selection state.
//!
//! Quick-view and quick-add pointers live for the process only and are
//! never persisted.

use ute_shop_core::Product;

/// The product currently shown in a quick-view surface, plus the draft
/// quantity for a quick add.
#[derive(Debug)]
pub struct Selection {
    quick_view: Option<Product>,
    quick_add_quantity: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    /// An empty selection with a quick-add draft of 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            quick_view: None,
            quick_add_quantity: 1,
        }
    }

    /// The product currently in quick view, if any.
    #[must_use]
    pub const fn quick_view(&self) -> Option<&Product> {
        self.quick_view.as_ref()
    }

    /// Show a product in quick view.
    pub fn set_quick_view(&mut self, product: Product) {
        self.quick_view = Some(product);
    }

    /// Dismiss the quick view.
    pub fn clear_quick_view(&mut self) {
        self.quick_view = None;
    }

    /// The draft quantity for a quick add (at least 1).
    #[must_use]
    pub const fn quick_add_quantity(&self) -> u32 {
        self.quick_add_quantity
    }

    /// Set the quick-add draft quantity, clamped to at least 1.
    pub const fn set_quick_add_quantity(&mut self, quantity: u32) {
        self.quick_add_quantity = if quantity == 0 { 1 } else { quantity };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn quick_add_draft_stays_positive() {
        let mut selection = Selection::new();
        assert_eq!(selection.quick_add_quantity(), 1);
        selection.set_quick_add_quantity(0);
        assert_eq!(selection.quick_add_quantity(), 1);
        selection.set_quick_add_quantity(4);
        assert_eq!(selection.quick_add_quantity(), 4);
    }

    #[test]
    fn quick_view_can_be_set_and_dismissed() {
        let mut selection = Selection::new();
        assert!(selection.quick_view().is_none());
        selection.set_quick_view(Product::new(1, "Tee", Decimal::new(1000, 2)));
        assert!(selection.quick_view().is_some());
        selection.clear_quick_view();
        assert!(selection.quick_view().is_none());
    }
}
