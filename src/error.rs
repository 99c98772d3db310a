use thiserror::Error;

use crate::plan::WallId;

/// Top-level error type for the wall-panel engine.
#[derive(Debug, Error)]
pub enum WallPanelError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Malformed wall records or lengths. The offending wall is skipped; the rest
/// of the plan is still processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("wall {wall}: field `{field}` is not a finite number")]
    NonFinite { wall: WallId, field: &'static str },

    #[error("wall {wall}: field `{field}` must be positive, got {value}")]
    NonPositive {
        wall: WallId,
        field: &'static str,
        value: f64,
    },

    #[error("wall {wall} has zero length")]
    ZeroLength { wall: WallId },

    #[error("{field} must be a positive finite number, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },
}

/// Errors related to wall connectivity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("walls do not form a closed room: {0}")]
    NotClosed(String),

    #[error("no walls given")]
    EmptyWallSet,
}

/// Errors related to geometric computations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Convenience type alias for results using [`WallPanelError`].
pub type Result<T> = std::result::Result<T, WallPanelError>;
