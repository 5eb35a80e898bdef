//! Error types for positioning operations.

use thiserror::Error;

/// Result type for positioning operations.
pub type TetherResult<T> = Result<T, TetherError>;

/// Errors that can occur while measuring or positioning.
///
/// Positioning itself never fails; errors only arise at the platform
/// boundary (measuring anchors, reaching the window) or in debug
/// serialization. A failed measurement is degraded-but-safe: the
/// floating content simply stays hidden until the next trigger.
#[derive(Debug, Error)]
pub enum TetherError {
    /// The anchor handle could not be measured (e.g. a detached DOM
    /// element or a view that has not been laid out yet).
    #[error("Anchor not measurable: {0}")]
    AnchorUnmeasurable(String),

    /// The platform surface needed for measurement is unavailable
    /// (no window, no document).
    #[error("Platform unavailable: {0}")]
    PlatformUnavailable(String),

    /// State snapshot serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
