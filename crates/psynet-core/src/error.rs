//! Typed failures for every psynet operation.
//!
//! All operations validate their inputs up front and return a
//! [`NetworkError`] instead of producing a partial result. Each variant maps
//! to a stable [`ErrorCode`] so callers orchestrating many runs (bootstrap
//! resampling, parameter sweeps) can branch on the kind of failure without
//! parsing messages.

use std::fmt;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors raised by matrix validation, graph construction, precision
/// estimation, and centrality computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    /// Malformed input: ragged or empty observations, missing values, a
    /// non-square or non-symmetric matrix, a non-chordal topology, or
    /// mismatched dimensions between collaborating inputs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The graph is too small for the requested construction.
    #[error("insufficient nodes: need at least {required}, got {actual}")]
    InsufficientNodes { required: usize, actual: usize },

    /// A clique or separator covariance block could not be inverted.
    #[error("singular {kind} sub-matrix over nodes {nodes:?}")]
    SingularSubmatrix { kind: BlockKind, nodes: Vec<usize> },

    /// A tuning parameter is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl NetworkError {
    /// Shorthand for [`NetworkError::InvalidInput`].
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Shorthand for [`NetworkError::InvalidParameter`].
    #[must_use]
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// The machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::InsufficientNodes { .. } => ErrorCode::InsufficientNodes,
            Self::SingularSubmatrix { .. } => ErrorCode::SingularSubmatrix,
            Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
        }
    }
}

/// Which part of a junction tree (or linear system) failed to invert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Clique,
    Separator,
    /// The `I - W` operator of a randomized-shortest-paths computation.
    TransitionOperator,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Clique => "clique",
            Self::Separator => "separator",
            Self::TransitionOperator => "transition-operator",
        })
    }
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidInput,
    InsufficientNodes,
    SingularSubmatrix,
    InvalidParameter,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidInput => "E1001",
            Self::InsufficientNodes => "E1002",
            Self::SingularSubmatrix => "E2001",
            Self::InvalidParameter => "E3001",
        }
    }

    /// Short human-facing summary for logs.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input data",
            Self::InsufficientNodes => "Too few nodes for graph construction",
            Self::SingularSubmatrix => "Singular sub-matrix",
            Self::InvalidParameter => "Invalid tuning parameter",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidInput => {
                Some("Check that matrices are square, symmetric and free of missing values.")
            }
            Self::InsufficientNodes => Some("TMFG needs at least 9 items."),
            Self::SingularSubmatrix => {
                Some("Regularize the covariance matrix (e.g. shrinkage) and retry.")
            }
            Self::InvalidParameter => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::InvalidInput,
            ErrorCode::InsufficientNodes,
            ErrorCode::SingularSubmatrix,
            ErrorCode::InvalidParameter,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::SingularSubmatrix.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn errors_map_to_codes() {
        let err = NetworkError::InsufficientNodes {
            required: 9,
            actual: 4,
        };
        assert_eq!(err.code(), ErrorCode::InsufficientNodes);
        assert_eq!(err.to_string(), "insufficient nodes: need at least 9, got 4");

        let err = NetworkError::SingularSubmatrix {
            kind: BlockKind::Separator,
            nodes: vec![1, 2, 3],
        };
        assert_eq!(err.code().code(), "E2001");
        assert!(err.to_string().contains("separator"));
    }
}
