//! Error types with rich diagnostics using miette
//!
//! Missing keypoints are never errors (they propagate as `None`). These types
//! cover genuine misuse: unknown names in textual tokens, degenerate layout
//! sizes, and graph mutations that reference ids which do not exist.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::editor::{AngleId, ConnectionId, PointId};
use crate::types::NumericError;

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur when parsing keypoint names and vector tokens
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("unknown keypoint: {name}")]
    #[diagnostic(code(posescore::parse::unknown_keypoint))]
    UnknownKeypoint {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a keypoint name")]
        span: SourceSpan,
        #[help]
        suggestion: Option<String>,
    },

    #[error("unknown joint or axis: {name}")]
    #[diagnostic(
        code(posescore::parse::unknown_token),
        help("axis tokens are `vertical` and `horizontal`, optionally prefixed with `-`")
    )]
    UnknownToken {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown name")]
        span: SourceSpan,
    },

    #[error("empty token")]
    #[diagnostic(code(posescore::parse::empty_token))]
    EmptyToken,
}

impl ParseError {
    pub(crate) fn unknown_keypoint(input: &str, suggestion: Option<String>) -> Self {
        ParseError::UnknownKeypoint {
            name: input.to_string(),
            src: NamedSource::new("<keypoint>", input.to_string()),
            span: (0, input.len()).into(),
            suggestion,
        }
    }

    /// `offset` skips an inversion prefix so the label points at the name.
    pub(crate) fn unknown_token(input: &str, offset: usize) -> Self {
        ParseError::UnknownToken {
            name: input[offset..].to_string(),
            src: NamedSource::new("<token>", input.to_string()),
            span: (offset, input.len() - offset).into(),
        }
    }
}

// ============================================================================
// Layout Errors
// ============================================================================

/// Errors from fitting an image into a viewport
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum LayoutError {
    #[error("invalid image size {width}x{height}: {source}")]
    #[diagnostic(
        code(posescore::layout::invalid_image),
        help("the source image must have positive, finite dimensions")
    )]
    InvalidImage {
        width: f64,
        height: f64,
        source: NumericError,
    },

    #[error("invalid viewport size {width}x{height}: {source}")]
    #[diagnostic(code(posescore::layout::invalid_viewport))]
    InvalidViewport {
        width: f64,
        height: f64,
        source: NumericError,
    },
}

// ============================================================================
// Graph Errors
// ============================================================================

/// Errors from direct editor graph mutations
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown point {0}")]
    #[diagnostic(
        code(posescore::graph::unknown_point),
        help("the point was deleted or never belonged to this graph")
    )]
    UnknownPoint(PointId),

    #[error("unknown connection {0}")]
    #[diagnostic(code(posescore::graph::unknown_connection))]
    UnknownConnection(ConnectionId),

    #[error("unknown angle {0}")]
    #[diagnostic(code(posescore::graph::unknown_angle))]
    UnknownAngle(AngleId),
}
