use serde::{Deserialize, Serialize};

/// Domain representation of a product category fetched from the catalog backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Optional identifier of the parent category when building a tree.
    pub parent_id: Option<i32>,
    /// Human-readable name of the category.
    pub name: String,
}

impl Category {
    /// Build a root category with the supplied details.
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            parent_id: None,
            name: name.into(),
        }
    }

    /// Attach a parent identifier to the category.
    pub fn with_parent_id(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// A category annotated with the depth computed for indented display.
///
/// Produced fresh on every tree build; `parent_id` records the parent the
/// entry was actually placed under, which is `None` for synthetic roots even
/// when the underlying record declares a parent.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CategoryTreeItem {
    /// Category data represented by this entry.
    pub category: Category,
    /// Depth of the entry, 0 for roots.
    pub level: usize,
    /// Parent used for placement, `None` for roots.
    pub parent_id: Option<i32>,
}
