use super::Product;

/// Products marked but not yet committed to a bill.
///
/// Set semantics by product id; insertion order is kept so the committed
/// lines appear in the order the user picked them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    entries: Vec<Product>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the product if present, otherwise adds it.
    /// Returns `true` when the product is selected afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        match self.entries.iter().position(|p| p.id == product.id) {
            Some(index) => {
                self.entries.remove(index);
                false
            }
            None => {
                self.entries.push(product);
                true
            }
        }
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.entries.iter().any(|p| p.id == product_id)
    }

    pub fn members(&self) -> &[Product] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the set, handing back its members.
    pub fn take(&mut self) -> Vec<Product> {
        std::mem::take(&mut self.entries)
    }
}
