//! Error types shared across the scene core

use thiserror::Error;

/// Catalog validation failures
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("body catalog is empty")]
    Empty,

    #[error("duplicate body identifier: {0}")]
    DuplicateName(String),

    #[error("invalid body '{name}': {reason}")]
    InvalidDescriptor { name: String, reason: String },

    #[error("invalid color (expected #rrggbb): {0}")]
    InvalidColor(String),
}

/// Scene construction and control failures
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("scene is already built; tear it down before rebuilding")]
    AlreadyBuilt,

    #[error("no output surface is available")]
    MissingSurface,

    #[error("unknown body: {0}")]
    UnknownBody(String),
}

/// Errors raised while running a single frame
#[derive(Debug, Error)]
pub enum FrameError {
    /// The window backing the output surface is gone; the loop must stop.
    #[error("output surface lost")]
    SurfaceLost,

    #[error("render failed: {0}")]
    Render(String),
}
