//! Error types for pbxproj serialization.
//!
//! The writer itself never fails in lenient mode: malformed trees degrade the
//! same way Xcode's own tooling tolerates them. Errors surface when
//! [`WriterOptions::strict`](crate::WriterOptions::strict) is enabled, when
//! writing to an [`std::io::Write`] sink fails, or when a Rust value cannot be
//! converted into a [`Value`](crate::Value) tree.
//!
//! ## Error Categories
//!
//! - **Unsupported shapes**: a value whose shape the format has no spelling for
//!   at that position (e.g. a sequence nested directly in a sequence)
//! - **Ambiguous comment keys**: a real key ending in the `_comment` suffix,
//!   which collides with the legacy comment annotation convention
//! - **I/O Errors**: writer sink failures
//!
//! Every structural error carries the dotted path of the offending key or
//! record id, e.g. `objects.PBXGroup.1D6058900D05DD3D006BFB54.children[2]`.
//!
//! ## Examples
//!
//! ```rust
//! use serde_pbxproj::{pbx, to_string_with_options, Contents, Error, WriterOptions};
//!
//! let project = pbx!({ "archiveVersion": 1, "name_comment": "orphan" });
//! let contents = Contents::from_value(None, project).unwrap();
//!
//! let result = to_string_with_options(&contents, WriterOptions::new().with_strict(true));
//! assert!(matches!(result, Err(Error::AmbiguousCommentKey { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while producing pbxproj text.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// A value has a shape the format cannot express at this position.
    #[error("Unsupported value shape at {path}: found {found} {context}")]
    UnsupportedValueShape {
        path: String,
        found: &'static str,
        context: &'static str,
    },

    /// A real key textually collides with the `_comment` annotation suffix.
    #[error("Ambiguous comment key at {path}: '{key}' ends in the comment suffix but annotates no sibling key")]
    AmbiguousCommentKey { path: String, key: String },

    /// A Rust type that has no pbxproj value representation
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported shape error.
    ///
    /// `found` names the offending shape, `context` describes where it was met.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pbxproj::Error;
    ///
    /// let err = Error::unsupported_shape("root.files[0]", "sequence", "inside a sequence");
    /// assert!(err.to_string().contains("root.files[0]"));
    /// ```
    pub fn unsupported_shape(path: &str, found: &'static str, context: &'static str) -> Self {
        Error::UnsupportedValueShape {
            path: path.to_string(),
            found,
            context,
        }
    }

    /// Creates an ambiguous comment key error.
    pub fn ambiguous_comment_key(path: &str, key: &str) -> Self {
        Error::AmbiguousCommentKey {
            path: path.to_string(),
            key: key.to_string(),
        }
    }

    /// Creates an unsupported type error for Rust types that cannot become a [`Value`](crate::Value).
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pbxproj::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the dotted input path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::UnsupportedValueShape { path, .. } | Error::AmbiguousCommentKey { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
