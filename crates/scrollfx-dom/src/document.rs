//! Document - High-level document API
//!
//! Element lookup, class mutation and geometry queries on top of
//! [`DomTree`]. All lookups return handles in document order so callers can
//! cache them once and reuse them for the page's lifetime.

use crate::{DOMRect, DOMTokenList, DomError, DomResult, DomTree, ElementData, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    html_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with `<html><body></body></html>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let body = tree.create_element("body");

        let linked = tree
            .append_child(tree.root(), html)
            .and_then(|()| tree.append_child(html, body));
        debug_assert!(linked.is_ok(), "document skeleton: {:?}", linked);

        Self {
            tree,
            html_element: html,
            body_element: body,
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    /// Append `child` to `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.append_child(parent, child)
    }

    /// Element data for `id`
    pub fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.tree
            .get(id)
            .ok_or(DomError::NodeNotFound(id))?
            .as_element()
            .ok_or(DomError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.tree
            .get_mut(id)
            .ok_or(DomError::NodeNotFound(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Set the id attribute
    pub fn set_id(&mut self, node: NodeId, id: &str) -> DomResult<()> {
        self.element_mut(node)?.id = Some(id.to_string());
        Ok(())
    }

    /// classList of an element
    pub fn class_list(&self, node: NodeId) -> DomResult<&DOMTokenList> {
        Ok(&self.element(node)?.class_list)
    }

    /// Mutable classList of an element
    pub fn class_list_mut(&mut self, node: NodeId) -> DomResult<&mut DOMTokenList> {
        Ok(&mut self.element_mut(node)?.class_list)
    }

    /// Check a class, false for missing or non-element nodes
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_ok_and(|e| e.has_class(class))
    }

    /// Set the layout box (document coordinates)
    pub fn set_layout(&mut self, node: NodeId, rect: DOMRect) -> DomResult<()> {
        self.element_mut(node)?.layout = Some(rect);
        Ok(())
    }

    /// Layout box, zero rect if layout never ran for this element
    pub fn layout(&self, node: NodeId) -> DomResult<DOMRect> {
        Ok(self.element(node)?.layout.unwrap_or_default())
    }

    /// getBoundingClientRect: layout box relative to the scrolled viewport
    pub fn bounding_client_rect(&self, node: NodeId, scroll_x: f64, scroll_y: f64) -> DomResult<DOMRect> {
        let element = self.element(node)?;
        Ok(match element.layout {
            Some(rect) => rect.translate(-scroll_x, -scroll_y),
            // Unlaid-out elements report an empty rect at the viewport origin
            None => DOMRect::default(),
        })
    }

    /// Get element by ID (first match in document order)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).into_iter().find(|&node| {
            self.element(node)
                .is_ok_and(|e| e.id.as_deref() == Some(id))
        })
    }

    /// Get elements by class name, in document order
    pub fn get_elements_by_class_name(&self, class: &str) -> Vec<NodeId> {
        let matches: Vec<NodeId> = self
            .tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&node| self.has_class(node, class))
            .collect();
        tracing::trace!("getElementsByClassName({}) -> {} elements", class, matches.len());
        matches
    }

    /// Element children of `parent`, in order
    pub fn element_children(&self, parent: NodeId) -> Vec<NodeId> {
        self.tree.element_children(parent).collect()
    }

    /// Bottom of the lowest laid-out element
    pub fn content_height(&self) -> f64 {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter_map(|node| self.element(node).ok()?.layout)
            .map(|rect| rect.bottom())
            .fold(0.0, f64::max)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
