//! Enhancement errors
//!
//! Only setup can fail. Once handlers are installed, missing elements just
//! mean there is nothing to do.

use scrollfx_dom::DomError;
use scrollfx_host::HostError;

#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    #[error("Invalid reveal threshold {0}: must be within 0.0..=1.0")]
    InvalidThreshold(f64),

    #[error("Invalid viewport breakpoint {0}: must be a positive width")]
    InvalidBreakpoint(f64),

    #[error("Invalid reveal delta {0}: must be a finite, non-negative offset")]
    InvalidDelta(f64),

    #[error("Class name for {0} must be non-empty and contain no whitespace")]
    InvalidClassName(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

pub type Result<T> = std::result::Result<T, EnhanceError>;
