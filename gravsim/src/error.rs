//! Error type shared by the simulation kernel and scenario loading

use thiserror::Error;

/// Everything the kernel can refuse to do
///
/// Degenerate geometry (a zero-length direction, two bodies sharing a position)
/// is reported here instead of being propagated into velocities as NaN
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("cannot normalize degenerate {what} vector")]
    DegenerateVector { what: &'static str },

    #[error("bodies {a} and {b} share the same position; gravity direction is undefined")]
    CoincidentBodies { a: String, b: String },

    #[error("gravity between {a} and {b} is not finite (bodies too close or too massive for f32)")]
    NonFiniteAcceleration { a: String, b: String },

    #[error("acceleration of {0} is not finite")]
    NonFiniteTotal(String),

    #[error("no body at index {0}")]
    UnknownBody(usize),

    #[error("body references unknown force `{0}`")]
    UnknownForce(String),

    #[error("force `{0}` is declared more than once")]
    DuplicateForce(String),

    #[error("time step must be finite, got {0}")]
    InvalidTimeStep(f32),
}

pub type SimResult<T> = Result<T, SimError>;
