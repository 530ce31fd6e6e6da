//! Enhancement configuration
//!
//! Every class name and number the enhancements use lives here. The defaults
//! match the stylesheet contract: `#navbar`, `.aos`, `.aos-collection`,
//! `has-shadow`, `animated` and `animated-stagger-<i>`.
//!
//! ```toml
//! [navbar]
//! locator = { id = "navbar" }
//!
//! [reveal.detection]
//! mode = "polling"
//! policy = { kind = "top_with_delta", delta = 200.0 }
//!
//! [observer]
//! breakpoint = 768.0
//! ```

use serde::{Deserialize, Serialize};

use crate::{EnhanceError, Result};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnhanceConfig {
    #[serde(default)]
    pub navbar: NavbarConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub observer: ObserverConfig,
}

impl EnhanceConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value setup relies on
    pub fn validate(&self) -> Result<()> {
        check_class("navbar.shadow_class", &self.navbar.shadow_class)?;
        let locator_class = match &self.navbar.locator {
            NavbarLocator::Id(id) => id,
            NavbarLocator::FirstWithClass(class) => class,
        };
        check_class("navbar.locator", locator_class)?;

        check_class("reveal.standalone_class", &self.reveal.standalone_class)?;
        check_class("reveal.group_class", &self.reveal.group_class)?;
        check_class("reveal.animated_class", &self.reveal.animated_class)?;
        check_class("reveal.stagger_prefix", &self.reveal.stagger_prefix)?;

        if let DetectionMode::Polling {
            policy: VisibilityPolicy::TopWithDelta { delta },
        } = self.reveal.detection
            && (!delta.is_finite() || delta < 0.0)
        {
            return Err(EnhanceError::InvalidDelta(delta));
        }

        let observer = &self.observer;
        if !observer.breakpoint.is_finite() || observer.breakpoint <= 0.0 {
            return Err(EnhanceError::InvalidBreakpoint(observer.breakpoint));
        }
        for threshold in [observer.wide_threshold, observer.narrow_threshold] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(EnhanceError::InvalidThreshold(threshold));
            }
        }
        Ok(())
    }
}

fn check_class(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(EnhanceError::InvalidClassName(field));
    }
    Ok(())
}

// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavbarConfig {
    /// How the navbar is found (once, at setup)
    #[serde(default)]
    pub locator: NavbarLocator,
    /// Class present while the page is scrolled
    #[serde(default = "default_shadow_class")]
    pub shadow_class: String,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            locator: NavbarLocator::default(),
            shadow_class: default_shadow_class(),
        }
    }
}

/// Navbar lookup strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavbarLocator {
    /// Element with this id
    Id(String),
    /// First element carrying this class
    FirstWithClass(String),
}

impl Default for NavbarLocator {
    fn default() -> Self {
        Self::Id("navbar".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Marker for standalone revealable elements
    #[serde(default = "default_standalone_class")]
    pub standalone_class: String,
    /// Marker for groups whose element children reveal with a stagger
    #[serde(default = "default_group_class")]
    pub group_class: String,
    /// Class added once an element is revealed
    #[serde(default = "default_animated_class")]
    pub animated_class: String,
    /// Prefix of the per-child delay class, followed by the child index
    #[serde(default = "default_stagger_prefix")]
    pub stagger_prefix: String,
    #[serde(default)]
    pub detection: DetectionMode,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            standalone_class: default_standalone_class(),
            group_class: default_group_class(),
            animated_class: default_animated_class(),
            stagger_prefix: default_stagger_prefix(),
            detection: DetectionMode::default(),
        }
    }
}

/// How reveal candidates are detected
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DetectionMode {
    /// Re-measure every candidate on each scroll event
    Polling {
        #[serde(default)]
        policy: VisibilityPolicy,
    },
    /// Shared intersection observer with a width-dependent threshold
    #[default]
    Observer,
}

/// Visibility predicate for polling detection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisibilityPolicy {
    /// Visible once the bottom edge is above the viewport bottom
    #[default]
    Bottom,
    /// Visible once the top edge is `delta` above the viewport bottom
    TopWithDelta {
        #[serde(default = "default_delta")]
        delta: f64,
    },
}

impl VisibilityPolicy {
    /// Top-reveal with the usual 200 unit delta
    pub fn top_with_default_delta() -> Self {
        Self::TopWithDelta { delta: default_delta() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// Viewport widths at or above this use `wide_threshold`
    #[serde(default = "default_breakpoint")]
    pub breakpoint: f64,
    #[serde(default = "default_wide_threshold")]
    pub wide_threshold: f64,
    #[serde(default = "default_narrow_threshold")]
    pub narrow_threshold: f64,
    /// Add stagger classes to group children revealed by the observer
    #[serde(default = "default_true")]
    pub stagger_groups: bool,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            breakpoint: default_breakpoint(),
            wide_threshold: default_wide_threshold(),
            narrow_threshold: default_narrow_threshold(),
            stagger_groups: true,
        }
    }
}

fn default_shadow_class() -> String {
    "has-shadow".to_string()
}

fn default_standalone_class() -> String {
    "aos".to_string()
}

fn default_group_class() -> String {
    "aos-collection".to_string()
}

fn default_animated_class() -> String {
    "animated".to_string()
}

fn default_stagger_prefix() -> String {
    "animated-stagger-".to_string()
}

fn default_delta() -> f64 {
    200.0
}

fn default_breakpoint() -> f64 {
    768.0
}

fn default_wide_threshold() -> f64 {
    0.6
}

fn default_narrow_threshold() -> f64 {
    0.25
}

fn default_true() -> bool {
    true
}
