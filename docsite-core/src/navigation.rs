//! Navigation tree built from scanned slugs.
//!
//! The tree is rebuilt from the current file listing on every render and
//! never stored. Keys are kept in a [`BTreeMap`] so iteration order is the
//! lexicographic order the sidebar shows.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::slug::{DOCS_PREFIX, Slug};

/// A node in the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavNode {
    /// A document with nothing below it.
    Leaf,
    /// A directory. It may also be a document when `name.md` sits next to
    /// a `name/` directory.
    Directory(BTreeMap<String, NavNode>),
}

impl NavNode {
    pub fn children(&self) -> Option<&BTreeMap<String, NavNode>> {
        match self {
            NavNode::Leaf => None,
            NavNode::Directory(children) => Some(children),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, NavNode::Leaf)
    }

    fn children_mut(&mut self) -> &mut BTreeMap<String, NavNode> {
        match self {
            NavNode::Directory(children) => children,
            NavNode::Leaf => {
                *self = NavNode::Directory(BTreeMap::new());
                self.children_mut()
            }
        }
    }
}

/// Root of the navigation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavTree {
    root: BTreeMap<String, NavNode>,
}

impl NavTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slugs<I: IntoIterator<Item = Slug>>(slugs: I) -> Self {
        let mut tree = Self::new();
        for slug in slugs {
            tree.insert(&slug);
        }
        tree
    }

    pub fn insert(&mut self, slug: &Slug) {
        let Some((last, parents)) = slug.segments().split_last() else {
            return;
        };

        let mut level = &mut self.root;
        for segment in parents {
            level = level
                .entry(segment.clone())
                .or_insert(NavNode::Leaf)
                .children_mut();
        }
        level.entry(last.clone()).or_insert(NavNode::Leaf);
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn nodes(&self) -> &BTreeMap<String, NavNode> {
        &self.root
    }

    /// Flatten into serializable items for templates.
    pub fn items(&self) -> Vec<NavItem> {
        nav_items(&self.root, &[])
    }
}

/// Sidebar entry handed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: String,
    pub href: String,
    pub children: Vec<NavItem>,
}

fn nav_items(level: &BTreeMap<String, NavNode>, prefix: &[&str]) -> Vec<NavItem> {
    level
        .iter()
        .map(|(name, node)| {
            let mut path = prefix.to_vec();
            path.push(name);

            let children = node
                .children()
                .map(|children| nav_items(children, &path))
                .unwrap_or_default();

            NavItem {
                name: name.clone(),
                href: format!("{}/{}", DOCS_PREFIX, path.join("/")),
                children,
            }
        })
        .collect()
}
