//! Navbar shadow
//!
//! The navbar is looked up once and cached; scroll handlers only toggle
//! its class.

use scrollfx_dom::{Document, NodeId};

use crate::{NavbarConfig, NavbarLocator};

/// Adds the shadow class to the navbar while the page is scrolled
#[derive(Debug, Clone)]
pub struct NavbarShadow {
    handle: Option<NodeId>,
    shadow_class: String,
}

impl NavbarShadow {
    /// Wrap an already fetched navbar handle (or none)
    pub fn new(handle: Option<NodeId>, shadow_class: &str) -> Self {
        Self {
            handle,
            shadow_class: shadow_class.to_string(),
        }
    }

    /// Resolve the navbar from the document
    pub fn locate(document: &Document, config: &NavbarConfig) -> Self {
        let handle = match &config.locator {
            NavbarLocator::Id(id) => document.get_element_by_id(id),
            NavbarLocator::FirstWithClass(class) => {
                document.get_elements_by_class_name(class).first().copied()
            }
        };
        match handle {
            Some(node) => tracing::debug!("Navbar resolved to {} via {:?}", node, config.locator),
            None => tracing::debug!("No navbar found via {:?}; shadow disabled", config.locator),
        }
        Self::new(handle, &config.shadow_class)
    }

    pub fn handle(&self) -> Option<NodeId> {
        self.handle
    }

    /// Sync the shadow class with a vertical scroll offset.
    ///
    /// Returns whether the shadow should be shown. Without a navbar this
    /// only computes that answer.
    pub fn update(&self, document: &mut Document, scroll_y: f64) -> bool {
        let scrolled = scroll_y > 0.0;
        let Some(navbar) = self.handle else {
            return scrolled;
        };

        match document.class_list_mut(navbar) {
            Ok(classes) => {
                classes.toggle(&self.shadow_class, Some(scrolled));
            }
            Err(err) => tracing::debug!("Navbar handle went stale: {}", err),
        }
        scrolled
    }

    /// Whether the navbar currently carries the shadow class
    pub fn has_shadow(&self, document: &Document) -> bool {
        self.handle
            .is_some_and(|navbar| document.has_class(navbar, &self.shadow_class))
    }
}
