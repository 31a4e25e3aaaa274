// ── Category, tag, and shipping class models ──

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryModel {
    pub site_id: i64,
    pub remote_id: i64,
    pub name: String,
    pub slug: String,
    /// Remote id of the parent category, 0 for top level.
    pub parent: i64,
    pub description: String,
    pub display: String,
    pub image_url: String,
    pub menu_order: i64,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagModel {
    pub site_id: i64,
    pub remote_id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingClassModel {
    pub site_id: i64,
    pub remote_id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub count: i64,
}

/// Order categories so each parent is followed by its children, depth-first.
///
/// Returns `(depth, category)` pairs. Categories whose parent is not in the
/// list are treated as roots, as is anything left unvisited by a parent cycle.
pub fn sort_category_tree(categories: &[CategoryModel]) -> Vec<(usize, &CategoryModel)> {
    fn by_name<'a>(mut list: Vec<&'a CategoryModel>) -> Vec<&'a CategoryModel> {
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    fn visit<'a>(
        node: &'a CategoryModel,
        depth: usize,
        all: &'a [CategoryModel],
        seen: &mut HashSet<i64>,
        out: &mut Vec<(usize, &'a CategoryModel)>,
    ) {
        if !seen.insert(node.remote_id) {
            return;
        }
        out.push((depth, node));
        let children = by_name(all.iter().filter(|c| c.parent == node.remote_id).collect());
        for child in children {
            visit(child, depth + 1, all, seen, out);
        }
    }

    let known: HashSet<i64> = categories.iter().map(|c| c.remote_id).collect();
    let mut seen: HashSet<i64> = HashSet::with_capacity(categories.len());
    let mut out: Vec<(usize, &CategoryModel)> = Vec::with_capacity(categories.len());

    let roots = by_name(
        categories
            .iter()
            .filter(|c| c.parent == 0 || !known.contains(&c.parent))
            .collect(),
    );
    for root in roots {
        visit(root, 0, categories, &mut seen, &mut out);
    }

    // Parent cycles never reach a root; surface them at the top level.
    let stranded = by_name(
        categories
            .iter()
            .filter(|c| !seen.contains(&c.remote_id))
            .collect(),
    );
    for category in stranded {
        if !seen.contains(&category.remote_id) {
            warn!(
                category_id = category.remote_id,
                parent = category.parent,
                "category parent chain is cyclic"
            );
        }
        visit(category, 0, categories, &mut seen, &mut out);
    }
    out
}
