use thiserror::Error;

use crate::graph::WeightWidth;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! invalid_argument {
    ($($arg:tt)*) => {
        crate::Error::InvalidArgument(format!($($arg)*))
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Argument Errors
/// - [`Error::InvalidArgument`] - Bad generation, campaign or bounds parameters
/// - [`Error::UnsafeBounds`] - The sentinel cannot be told apart from a legal path sum
/// - [`Error::ConversionOverflow`] - A weight does not fit the target width of a copy
///
/// ## Kernel Resolution Errors
/// - [`Error::UnknownKernel`] - The identifier is not part of the kernel catalog
/// - [`Error::BackendUnavailable`] - The bundle providing the kernel could not be loaded
/// - [`Error::ProcedureNotFound`] - The bundle loaded, but does not export the procedure
/// - [`Error::WidthMismatch`] - The procedure exists, but for a different weight width
///
/// Resolution errors are recoverable: a benchmark campaign records a missing sample and a
/// multi-kernel comparison marks the kernel as skipped.
///
/// ## Input and Result Errors
/// - [`Error::Malformed`] - Graph text input could not be parsed
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::Mismatch`] - Two kernels disagree on the shortest distances
///
/// # Examples
///
/// ```rust,no_run
/// use fwbench::{Error, Graph, WeightBounds};
///
/// match Graph::<i32>::read_from_path("graph.txt", WeightBounds::default()) {
///     Ok(graph) => println!("Loaded graph with {} vertices", graph.size()),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed graph: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied parameter is out of range.
    ///
    /// Raised for non-positive graph sizes, probabilities above 100, inverted weight
    /// ranges, empty size sweeps and similar mistakes. Always fatal to the operation
    /// that received the parameter.
    #[error("Invalid argument - {0}")]
    InvalidArgument(String),

    /// The sentinel is not safely above every legal path sum.
    ///
    /// A shortest path uses at most `size - 1` edges, so `(size - 1) * max` must stay
    /// strictly below `inf`. Otherwise a long but real path would be indistinguishable
    /// from "unreachable".
    #[error("Unsafe weight bounds - {size} vertices with edge weights up to {max} may reach the sentinel {inf}")]
    UnsafeBounds {
        /// Vertex count that was checked
        size: usize,
        /// Largest legal edge weight
        max: i64,
        /// Sentinel value
        inf: i64,
    },

    /// A value did not fit into the destination weight width during a checked copy.
    #[error("Value {value} does not fit into {width} weights")]
    ConversionOverflow {
        /// The offending value, widened to `i64`
        value: i64,
        /// The destination width
        width: WeightWidth,
    },

    /// The identifier does not name any known kernel.
    #[error("No such algorithm procedure available - {0}")]
    UnknownKernel(String),

    /// The backend bundle that provides a kernel could not be loaded.
    #[error("Cannot load backend '{backend}' - {reason}")]
    BackendUnavailable {
        /// Name of the backend bundle
        backend: String,
        /// Why loading failed
        reason: String,
    },

    /// The backend bundle loaded, but does not export the requested procedure.
    #[error("Cannot find procedure '{procedure}' in backend '{backend}'")]
    ProcedureNotFound {
        /// Name of the backend bundle
        backend: String,
        /// Requested procedure name
        procedure: String,
    },

    /// The procedure exists, but operates on a different weight width than requested.
    #[error("Procedure '{procedure}' operates on {found} weights, not {expected}")]
    WidthMismatch {
        /// Requested procedure name
        procedure: String,
        /// Width the caller asked for
        expected: WeightWidth,
        /// Width the procedure actually uses
        found: WeightWidth,
    },

    /// The graph text input is damaged and could not be parsed.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A kernel produced different shortest distances than the reference.
    #[error("The reference and {label} results are NOT equal ({mismatches} differing entries)")]
    Mismatch {
        /// Label of the candidate that was compared
        label: String,
        /// Number of differing matrix entries
        mismatches: usize,
    },

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while reading graphs or persisting
    /// benchmark results.
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for errors raised while resolving a kernel.
    ///
    /// These are the errors a campaign or a multi-kernel comparison degrades to
    /// "kernel skipped" instead of aborting.
    #[must_use]
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Error::UnknownKernel(_)
                | Error::BackendUnavailable { .. }
                | Error::ProcedureNotFound { .. }
                | Error::WidthMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_error_macro() {
        let err = malformed_error!("bad size {}", -3);
        match err {
            Error::Malformed { message, file, .. } => {
                assert_eq!(message, "bad size -3");
                assert!(file.ends_with("error.rs"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolution_failures() {
        assert!(Error::UnknownKernel("x".into()).is_resolution_failure());
        assert!(Error::ProcedureNotFound {
            backend: "native".into(),
            procedure: "x".into()
        }
        .is_resolution_failure());
        assert!(!invalid_argument!("size {}", 0).is_resolution_failure());
        assert!(!Error::Mismatch {
            label: "8-bit weights".into(),
            mismatches: 1
        }
        .is_resolution_failure());
    }

    #[test]
    fn test_display() {
        let err = Error::UnsafeBounds {
            size: 32,
            max: 10,
            inf: 99,
        };
        assert_eq!(
            err.to_string(),
            "Unsafe weight bounds - 32 vertices with edge weights up to 10 may reach the sentinel 99"
        );
    }
}
