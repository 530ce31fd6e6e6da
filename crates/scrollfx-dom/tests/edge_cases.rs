//! Edge case tests for scrollfx-dom
//!
//! Boundary conditions around tree construction, lookups and geometry.

use scrollfx_dom::{DOMRect, Document, DomError, DomTree, NodeId};

// ============================================================================
// TREE EDGE CASES
// ============================================================================

#[test]
fn test_append_ancestor_into_descendant_is_rejected() {
    let mut tree = DomTree::new();
    let outer = tree.create_element("div");
    let inner = tree.create_element("div");
    tree.append_child(outer, inner).unwrap();

    // outer is still detached, but appending it under its own child would loop
    assert_eq!(
        tree.append_child(inner, outer),
        Err(DomError::HierarchyRequest { parent: inner, child: outer })
    );
}

#[test]
fn test_append_to_self_is_rejected() {
    let mut tree = DomTree::new();
    let node = tree.create_element("div");
    assert!(tree.append_child(node, node).is_err());
}

#[test]
fn test_root_cannot_be_reparented() {
    let mut tree = DomTree::new();
    let div = tree.create_element("div");
    assert!(tree.append_child(div, NodeId::ROOT).is_err());
}

#[test]
fn test_children_of_missing_node_is_empty() {
    let tree = DomTree::new();
    assert_eq!(tree.children(NodeId::NONE).count(), 0);
}

#[test]
fn test_deep_tree_descendants() {
    let mut tree = DomTree::new();
    let mut parent = tree.root();
    for _ in 0..2_000 {
        let child = tree.create_element("div");
        tree.append_child(parent, child).unwrap();
        parent = child;
    }
    assert_eq!(tree.descendants(tree.root()).len(), 2_000);
}

// ============================================================================
// DOCUMENT EDGE CASES
// ============================================================================

#[test]
fn test_detached_elements_are_not_found() {
    let mut doc = Document::new();
    let nav = doc.create_element("nav");
    doc.set_id(nav, "navbar").unwrap();
    doc.class_list_mut(nav).unwrap().add("aos");

    assert_eq!(doc.get_element_by_id("navbar"), None);
    assert!(doc.get_elements_by_class_name("aos").is_empty());

    doc.append_child(doc.body(), nav).unwrap();
    assert_eq!(doc.get_element_by_id("navbar"), Some(nav));
}

#[test]
fn test_duplicate_ids_return_first_in_document_order() {
    let mut doc = Document::new();
    let first = doc.create_element("nav");
    let second = doc.create_element("nav");
    doc.append_child(doc.body(), first).unwrap();
    doc.append_child(doc.body(), second).unwrap();
    doc.set_id(first, "navbar").unwrap();
    doc.set_id(second, "navbar").unwrap();

    assert_eq!(doc.get_element_by_id("navbar"), Some(first));
}

#[test]
fn test_nested_class_matches_keep_document_order() {
    let mut doc = Document::new();
    let outer = doc.create_element("section");
    let inner = doc.create_element("div");
    let after = doc.create_element("div");
    doc.append_child(doc.body(), outer).unwrap();
    doc.append_child(outer, inner).unwrap();
    doc.append_child(doc.body(), after).unwrap();
    for node in [after, inner, outer] {
        doc.class_list_mut(node).unwrap().add("aos");
    }

    assert_eq!(doc.get_elements_by_class_name("aos"), vec![outer, inner, after]);
}

#[test]
fn test_missing_node_errors() {
    let mut doc = Document::new();
    let ghost = NodeId::NONE;
    assert_eq!(doc.set_layout(ghost, DOMRect::default()), Err(DomError::NodeNotFound(ghost)));
    assert!(doc.bounding_client_rect(ghost, 0.0, 0.0).is_err());
}

#[test]
fn test_content_height_of_empty_document() {
    let doc = Document::new();
    assert_eq!(doc.content_height(), 0.0);
}

// ============================================================================
// GEOMETRY EDGE CASES
// ============================================================================

#[test]
fn test_edge_adjacent_rects_touch_with_zero_area() {
    let viewport = DOMRect::from_xywh(0.0, 0.0, 100.0, 100.0);
    let below = DOMRect::from_xywh(0.0, 100.0, 100.0, 50.0);

    let overlap = below.intersection(&viewport).unwrap();
    assert_eq!(overlap.area(), 0.0);
    assert_eq!(below.visible_ratio(&viewport), 0.0);
}

#[test]
fn test_rect_taller_than_viewport() {
    let viewport = DOMRect::from_xywh(0.0, 0.0, 100.0, 100.0);
    let tall = DOMRect::from_xywh(0.0, -50.0, 100.0, 400.0);
    assert!((tall.visible_ratio(&viewport) - 0.25).abs() < 1e-9);
}
