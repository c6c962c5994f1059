//! Hierarchy building - pure tree logic over flat menu item rows.
//!
//! Storage hands back flat rows sorted by `(depth, order)`. This module groups them into a
//! nested forest through a `parent_id -> children` index built once per call, and provides
//! the small derivations the menu item service needs when inserting or moving items
//! (depth, next sibling order, subtree positions, ancestry checks).
//!
//! Nodes are built by value. Rows whose parent is not part of the input never surface,
//! and rows caught in a stored cycle are unreachable from any root, so building always
//! terminates.

use crate::{
    entities::menu_item,
    models::{HierarchyNode, MenuItemView},
};
use std::collections::{HashMap, HashSet, VecDeque};

/// Builds the forest of root items (`parent_id = None`) with their children nested.
///
/// Siblings keep the order they have in `items`.
#[must_use]
pub fn build_hierarchy(items: Vec<menu_item::Model>) -> Vec<HierarchyNode> {
    let names: HashMap<i64, String> = items
        .iter()
        .map(|item| (item.id, item.name.clone()))
        .collect();

    let mut children_of: HashMap<Option<i64>, Vec<menu_item::Model>> = HashMap::new();
    for item in items {
        children_of.entry(item.parent_id).or_default().push(item);
    }

    build_level(None, &mut children_of, &names)
}

fn build_level(
    parent_id: Option<i64>,
    children_of: &mut HashMap<Option<i64>, Vec<menu_item::Model>>,
    names: &HashMap<i64, String>,
) -> Vec<HierarchyNode> {
    // Each level is taken out of the index exactly once.
    let Some(level) = children_of.remove(&parent_id) else {
        return Vec::new();
    };

    level
        .into_iter()
        .map(|item| {
            let parent_name = item.parent_id.and_then(|id| names.get(&id).cloned());
            let children = build_level(Some(item.id), children_of, names);
            HierarchyNode {
                item: MenuItemView::new(item, parent_name),
                children,
            }
        })
        .collect()
}

/// Flattens a forest back into a list by pre-order traversal.
#[must_use]
pub fn flatten(forest: &[HierarchyNode]) -> Vec<&MenuItemView> {
    let mut flat = Vec::new();
    let mut stack: Vec<&HierarchyNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        flat.push(&node.item);
        stack.extend(node.children.iter().rev());
    }
    flat
}

/// Depth of an item placed under `parent`: one below the parent, or 0 for a root.
#[must_use]
pub fn derive_depth(parent: Option<&menu_item::Model>) -> i32 {
    parent.map_or(0, |parent| parent.depth + 1)
}

/// Order for a new child appended after `siblings`: the highest sibling order plus one,
/// or 0 when there are no siblings.
#[must_use]
pub fn next_sibling_order(siblings: &[menu_item::Model]) -> i32 {
    siblings
        .iter()
        .map(|sibling| sibling.order)
        .max()
        .map_or(0, |max| max + 1)
}

/// Returns true if `ancestor` is `node` itself or lies on the parent chain above `node`.
///
/// `items` must contain the rows the chain runs through; the walk stops at the first
/// parent that is not in `items`.
#[must_use]
pub fn is_ancestor_or_self(items: &[menu_item::Model], ancestor: i64, node: i64) -> bool {
    let parents: HashMap<i64, Option<i64>> =
        items.iter().map(|item| (item.id, item.parent_id)).collect();

    let mut visited = HashSet::new();
    let mut current = Some(node);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        if !visited.insert(id) {
            return false;
        }
        current = parents.get(&id).copied().flatten();
    }
    false
}

/// Re-derives the depth of every descendant of `root` assuming `root` sits at `root_depth`.
///
/// Returns `(id, depth)` pairs in breadth-first order; `root` itself is not included.
#[must_use]
pub fn subtree_depths(items: &[menu_item::Model], root: i64, root_depth: i32) -> Vec<(i64, i32)> {
    let mut children_of: HashMap<i64, Vec<i64>> = HashMap::new();
    for item in items {
        if let Some(parent_id) = item.parent_id {
            children_of.entry(parent_id).or_default().push(item.id);
        }
    }

    let mut depths = Vec::new();
    let mut visited = HashSet::from([root]);
    let mut queue = VecDeque::from([(root, root_depth)]);
    while let Some((id, depth)) = queue.pop_front() {
        for &child in children_of.get(&id).map(Vec::as_slice).unwrap_or_default() {
            if visited.insert(child) {
                depths.push((child, depth + 1));
                queue.push_back((child, depth + 1));
            }
        }
    }
    depths
}
