//! Scroll area errors

use latch_dom::{DomError, ElementId};
use thiserror::Error;

/// Invalid configuration values, from config files or markup attributes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid scroll type {0:?}, expected one of auto, always, hover, scroll")]
    InvalidType(String),

    #[error("invalid hide delay {0:?}, expected a non-negative number of milliseconds")]
    InvalidHideDelay(String),

    #[error(transparent)]
    Markup(#[from] DomError),
}

/// Errors returned when attaching a scroll area
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrollAreaError {
    #[error("unknown root element {0:?}")]
    UnknownRoot(ElementId),

    #[error("scroll area {0:?} has no element marked data-part=\"viewport\"")]
    MissingViewport(ElementId),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
