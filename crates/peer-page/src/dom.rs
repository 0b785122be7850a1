//! Arena-backed element tree the components operate on.
//!
//! The tree stands in for the rendered page: every element the components
//! care about is addressable by `id`, class, or attribute. Nodes are only
//! created attached (via [`Document::append`] / [`Document::prepend`]) and
//! removal tombstones the whole subtree, so a [`NodeId`] never aliases a
//! newer node.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::PageError;

/// Handle to one element of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// One element: tag, identity, classes, attributes and form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    value: String,
    checked: bool,
    hidden: bool,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Add one or more space-separated classes.
    #[must_use]
    pub fn with_class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    #[must_use]
    pub const fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Classes in sorted order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document with a `body` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new("body"))],
            root: NodeId(0),
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, node: NodeId) -> Result<&mut Element, PageError> {
        self.nodes
            .get_mut(node.0)
            .and_then(Option::as_mut)
            .ok_or(PageError::NodeDetached(node))
    }

    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    /// Insert `element` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `parent` is gone.
    pub fn append(&mut self, parent: NodeId, element: Element) -> Result<NodeId, PageError> {
        self.insert(parent, element, false)
    }

    /// Insert `element` as the first child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `parent` is gone.
    pub fn prepend(&mut self, parent: NodeId, element: Element) -> Result<NodeId, PageError> {
        self.insert(parent, element, true)
    }

    fn insert(
        &mut self,
        parent: NodeId,
        mut element: Element,
        first: bool,
    ) -> Result<NodeId, PageError> {
        let node = NodeId(self.nodes.len());
        let parent_el = self.get_mut(parent)?;
        if first {
            parent_el.children.insert(0, node);
        } else {
            parent_el.children.push(node);
        }
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(Some(element));
        Ok(node)
    }

    /// Detach `node` and tombstone its whole subtree.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if the node is already gone and
    /// [`PageError::RootRemoval`] for the root.
    pub fn remove(&mut self, node: NodeId) -> Result<(), PageError> {
        if node == self.root {
            return Err(PageError::RootRemoval);
        }
        let parent = self
            .get(node)
            .ok_or(PageError::NodeDetached(node))?
            .parent;
        if let Some(parent) = parent {
            self.get_mut(parent)?.children.retain(|child| *child != node);
        }
        self.tombstone(node);
        Ok(())
    }

    /// Remove every child of `node`, keeping `node` itself.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `node` is gone.
    pub fn clear_children(&mut self, node: NodeId) -> Result<(), PageError> {
        let children = std::mem::take(&mut self.get_mut(node)?.children);
        for child in children {
            self.tombstone(child);
        }
        Ok(())
    }

    fn tombstone(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(slot) = self.nodes.get_mut(current.0)
                && let Some(element) = slot.take()
            {
                stack.extend(element.children);
            }
        }
    }

    /// Attached nodes in document (pre-)order, root first.
    #[must_use]
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.get(current) {
                out.push(current);
                stack.extend(element.children.iter().rev());
            }
        }
        out
    }

    fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|node| self.get(*node).is_some_and(&pred))
            .collect()
    }

    /// First element carrying `id`, in document order.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_all(|el| el.id() == Some(id)).into_iter().next()
    }

    #[must_use]
    pub fn by_class(&self, class: &str) -> Vec<NodeId> {
        self.find_all(|el| el.has_class(class))
    }

    #[must_use]
    pub fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.by_class(class).into_iter().next()
    }

    #[must_use]
    pub fn by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.find_all(|el| el.tag == tag)
    }

    #[must_use]
    pub fn by_attr(&self, name: &str, value: &str) -> Vec<NodeId> {
        self.find_all(|el| el.attr(name) == Some(value))
    }

    /// `node` itself or its nearest ancestor carrying `class`.
    #[must_use]
    pub fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            let element = self.get(candidate)?;
            if element.has_class(class) {
                return Some(candidate);
            }
            current = element.parent;
        }
        None
    }

    /// First descendant of `node` (excluding `node`) carrying `class`.
    #[must_use]
    pub fn find_within(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .skip(1)
            .find(|child| self.get(*child).is_some_and(|el| el.has_class(class)))
    }

    /// Concatenated text of `node` and its subtree, in document order.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .into_iter()
            .filter_map(|n| self.get(n).map(Element::text))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(Element::value)
    }

    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `node` is gone.
    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<(), PageError> {
        value.clone_into(&mut self.get_mut(node)?.value);
        Ok(())
    }

    #[must_use]
    pub fn is_checked(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(Element::is_checked)
    }

    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `node` is gone.
    pub fn set_checked(&mut self, node: NodeId, checked: bool) -> Result<(), PageError> {
        self.get_mut(node)?.checked = checked;
        Ok(())
    }

    #[must_use]
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|el| el.attr(name))
    }

    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `node` is gone.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), PageError> {
        self.get_mut(node)?
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.has_class(class))
    }

    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `node` is gone.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), PageError> {
        self.get_mut(node)?.classes.insert(class.to_string());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `node` is gone.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), PageError> {
        self.get_mut(node)?.classes.remove(class);
        Ok(())
    }

    #[must_use]
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(Element::is_hidden)
    }

    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `node` is gone.
    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) -> Result<(), PageError> {
        self.get_mut(node)?.hidden = hidden;
        Ok(())
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(Element::children).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Shared handle
// ---------------------------------------------------------------------------

/// Document handle shared between components and their timer tasks.
///
/// The lock is only held inside [`SharedDocument::with`], never across an
/// `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedDocument(Arc<Mutex<Document>>);

impl SharedDocument {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self(Arc::new(Mutex::new(document)))
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    Input,
    Click,
    Submit,
}

/// A user interaction on one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
}

impl Event {
    #[must_use]
    pub const fn new(kind: EventKind, target: NodeId) -> Self {
        Self { kind, target }
    }
}
