//! Configuration options for pbxproj serialization.
//!
//! [`WriterOptions`] is the only configuration surface of the writer. It can be
//! built in code or deserialized from the same camelCase option bag the Node
//! tooling around Xcode projects accepts:
//!
//! ```rust
//! use serde_pbxproj::WriterOptions;
//!
//! let options: WriterOptions = serde_json::from_str(r#"{ "omitEmptyValues": true }"#).unwrap();
//! assert!(options.omit_empty_values);
//! assert!(!options.strict);
//! ```

use serde::Deserialize;

/// Configuration options for pbxproj serialization.
///
/// # Examples
///
/// ```rust
/// use serde_pbxproj::WriterOptions;
///
/// // Byte-compatible defaults
/// let options = WriterOptions::new();
///
/// // Drop null values and report malformed trees as errors
/// let options = WriterOptions::new()
///     .with_omit_empty_values(true)
///     .with_strict(true);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriterOptions {
    /// Drop `key = value;` lines whose value is null, in the project block,
    /// in nested record blocks and in inline records.
    pub omit_empty_values: bool,

    /// Also drop null entries inside `( ... )` sequences.
    ///
    /// Off by default: sequence entries have never been filtered by
    /// `omit_empty_values`, and turning this on changes output.
    pub omit_empty_sequence_entries: bool,

    /// Report unsupported value shapes and ambiguous comment keys as errors
    /// instead of formatting them best-effort.
    pub strict: bool,
}

impl WriterOptions {
    /// Creates default options: nothing omitted, lenient formatting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pbxproj::WriterOptions;
    ///
    /// let options = WriterOptions::new();
    /// assert!(!options.omit_empty_values);
    /// assert!(!options.strict);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether null values are dropped from record blocks.
    #[must_use]
    pub fn with_omit_empty_values(mut self, omit: bool) -> Self {
        self.omit_empty_values = omit;
        self
    }

    /// Sets whether null entries are dropped from sequences as well.
    #[must_use]
    pub fn with_omit_empty_sequence_entries(mut self, omit: bool) -> Self {
        self.omit_empty_sequence_entries = omit;
        self
    }

    /// Sets strict mode.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pbxproj::WriterOptions;
    ///
    /// let options = WriterOptions::new().with_strict(true);
    /// assert!(options.strict);
    /// ```
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
