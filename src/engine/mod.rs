//! Pose geometry and scoring
//!
//! This module is organized into submodules:
//! - `vector`: joint/axis tokens and their resolution to direction vectors
//! - `angle`: signed angles and declarative angle definitions
//! - `score`: scoring curves, averaging and ranks

pub mod angle;
pub mod score;
pub mod vector;

pub use angle::{AngleDefinition, angle_between, evaluate, line_tilt};
pub use score::{NOT_COMPUTED, average_present, average_score, linear_score, rank, sub_score};
pub use vector::{Axis, Joint, VectorToken, resolve};
