use std::collections::{HashMap, HashSet};

use crate::domain::category::{Category, CategoryTreeItem};
use crate::repository::CategoryReader;
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the category navigation screen.
pub struct CategoryTreeData {
    /// Depth-first ordered categories with computed indentation levels.
    pub items: Vec<CategoryTreeItem>,
}

/// Loads the flat category listing and arranges it for indented display.
pub fn load_category_tree<R>(repo: &R) -> ServiceResult<CategoryTreeData>
where
    R: CategoryReader + ?Sized,
{
    let mut flat = repo.list_categories().map_err(ServiceError::from)?;

    flat.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(CategoryTreeData {
        items: build_category_tree(&flat),
    })
}

/// Flattens a parent-referencing category list into a depth-first ordering.
///
/// Categories without a parent come first, each followed by its descendants
/// with increasing `level` and siblings in input order. Categories whose
/// declared parent is missing from the input, and categories caught in a
/// parent-reference loop, are emitted as roots at level 0 so that every
/// distinct input id appears exactly once. Never fails; malformed parent
/// references degrade to flat grouping instead of erroring.
pub fn build_category_tree(categories: &[Category]) -> Vec<CategoryTreeItem> {
    // Duplicate ids are normalized up front, last occurrence wins.
    let mut by_id: HashMap<i32, &Category> = HashMap::new();
    let mut order: Vec<i32> = Vec::new();
    for category in categories {
        if by_id.insert(category.id, category).is_none() {
            order.push(category.id);
        }
    }

    let mut children: HashMap<i32, Vec<i32>> = HashMap::new();
    let mut top: Vec<i32> = Vec::new();
    for id in &order {
        match by_id[id].parent_id {
            None => top.push(*id),
            Some(parent_id) if by_id.contains_key(&parent_id) => {
                children.entry(parent_id).or_default().push(*id);
            }
            // Dangling parent, the fallback pass below turns it into a root.
            Some(_) => {}
        }
    }

    fn emit(
        id: i32,
        level: usize,
        placed_under: Option<i32>,
        by_id: &HashMap<i32, &Category>,
        children: &HashMap<i32, Vec<i32>>,
        reserved_roots: &HashSet<i32>,
        visited: &mut HashSet<i32>,
        items: &mut Vec<CategoryTreeItem>,
    ) {
        if !visited.insert(id) {
            return;
        }

        items.push(CategoryTreeItem {
            category: by_id[&id].clone(),
            level,
            parent_id: placed_under,
        });

        if let Some(child_ids) = children.get(&id) {
            for child_id in child_ids {
                if reserved_roots.contains(child_id) {
                    continue;
                }
                emit(
                    *child_id,
                    level + 1,
                    Some(id),
                    by_id,
                    children,
                    reserved_roots,
                    visited,
                    items,
                );
            }
        }
    }

    let mut visited: HashSet<i32> = HashSet::new();
    let mut items: Vec<CategoryTreeItem> = Vec::with_capacity(order.len());
    let no_reserved = HashSet::new();

    for id in &top {
        emit(
            *id,
            0,
            None,
            &by_id,
            &children,
            &no_reserved,
            &mut visited,
            &mut items,
        );
    }

    // Fallback pass: anything still unvisited hangs off a missing parent or
    // sits in a parent-reference loop. Loop members are all promoted to
    // roots before emission so none of them ends up beneath another.
    let mut fallback_roots: Vec<i32> = Vec::new();
    let mut reserved: HashSet<i32> = HashSet::new();
    for id in &order {
        if visited.contains(id) {
            continue;
        }
        let dangling = match by_id[id].parent_id {
            Some(parent_id) => !by_id.contains_key(&parent_id),
            None => false,
        };
        if dangling || in_parent_cycle(*id, &by_id) {
            fallback_roots.push(*id);
            reserved.insert(*id);
        }
    }

    for id in &fallback_roots {
        emit(
            *id,
            0,
            None,
            &by_id,
            &children,
            &reserved,
            &mut visited,
            &mut items,
        );
    }

    items
}

/// Whether walking the parent chain from `start` arrives back at `start`.
fn in_parent_cycle(start: i32, by_id: &HashMap<i32, &Category>) -> bool {
    let mut seen = HashSet::new();
    let mut current = start;

    loop {
        let Some(parent_id) = by_id.get(&current).and_then(|category| category.parent_id) else {
            return false;
        };
        if !by_id.contains_key(&parent_id) {
            return false;
        }
        if parent_id == start {
            return true;
        }
        // A loop further up the chain that does not include `start`.
        if !seen.insert(parent_id) {
            return false;
        }
        current = parent_id;
    }
}
