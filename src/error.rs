//! Error taxonomy for color and gradient resolution.

use thiserror::Error;

/// Failures raised while resolving colors, palettes and gradients.
///
/// Resolution is atomic: when one of these is returned nothing was partially
/// built. Out-of-range RGB channels are never an error, they are clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// Not a hex string, not an RGB triple and not an alias in either palette.
    #[error("{0} is invalid: not a hex color, RGB triple, or aliased color name")]
    InvalidColor(String),

    /// Named gradient not present in the gradient table.
    #[error("unknown gradient: {0}")]
    UnknownGradient(String),

    /// A colormap needs at least two stops.
    #[error("a gradient needs at least 2 stops, got {stops}")]
    InvalidGradient { stops: usize },

    /// Alias chain loops back on itself or is unreasonably deep.
    #[error("alias {0} does not resolve to a color (cycle or chain too deep)")]
    AliasCycle(String),

    /// No explicit output path and autosave is disabled.
    #[error("no output path given and autosave is disabled")]
    NoOutput,
}

pub type StyleResult<T> = std::result::Result<T, StyleError>;
