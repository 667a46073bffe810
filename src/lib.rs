//! # serde_pbxproj
//!
//! A writer for Xcode `project.pbxproj` files.
//!
//! ## What is a pbxproj?
//!
//! Every Xcode project stores its targets, files, build phases and build
//! settings in a single `project.pbxproj`: an old-style (NeXTSTEP) property
//! list with a very particular layout. Xcode rewrites the file in that layout
//! whenever the project changes, so any tool that edits a project must write
//! the exact same bytes or it produces noisy diffs and merge conflicts.
//!
//! ## Key Features
//!
//! - **Byte-faithful**: tab indentation, `/* Begin X section */` banners at
//!   column 0 and single-line `PBXBuildFile` / `PBXFileReference` records
//! - **Ordered**: keys are written in insertion order, never sorted
//! - **Commented**: each record entry can carry the `/* ... */` comment Xcode
//!   writes next to object identifiers
//! - **Serde Compatible**: build trees from JSON dumps or from your own
//!   `#[derive(Serialize)]` types
//! - **Strict mode**: optionally reject trees the format cannot express
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_pbxproj::{pbx, to_string, Contents};
//!
//! let project = pbx!({
//!     "archiveVersion": 1,
//!     "classes": {},
//!     "objectVersion": 46,
//!     "objects": {
//!         "PBXBuildFile": {
//!             "1D60589B0D05DD56006BFB54": {
//!                 "isa": "PBXBuildFile",
//!                 "fileRef": "29B97316FDCFA39411CA2CEA",
//!                 "fileRef_comment": "main.m"
//!             },
//!             "1D60589B0D05DD56006BFB54_comment": "main.m in Sources"
//!         }
//!     },
//!     "rootObject": "29B97313FDCFA39411CA2CEA",
//!     "rootObject_comment": "Project object"
//! });
//!
//! let contents = Contents::from_value(Some("!$*UTF8*$!"), project).unwrap();
//! let text = to_string(&contents).unwrap();
//!
//! assert!(text.starts_with("// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n"));
//! assert!(text.contains(
//!     "\t\t1D60589B0D05DD56006BFB54 /* main.m in Sources */ = {isa = PBXBuildFile; fileRef = 29B97316FDCFA39411CA2CEA /* main.m */; };\n"
//! ));
//! assert!(text.ends_with("\trootObject = 29B97313FDCFA39411CA2CEA /* Project object */;\n}\n"));
//! ```
//!
//! ### From JSON
//!
//! Trees produced by JavaScript pbxproj parsers deserialize directly into
//! [`Contents`], including their `<key>_comment` annotations:
//!
//! ```rust
//! use serde_pbxproj::{to_string, Contents};
//!
//! let json = r#"{ "project": { "archiveVersion": 1, "rootObject": "ABC", "rootObject_comment": "Project object" } }"#;
//! let contents: Contents = serde_json::from_str(json).unwrap();
//!
//! assert_eq!(
//!     to_string(&contents).unwrap(),
//!     "{\n\tarchiveVersion = 1;\n\trootObject = ABC /* Project object */;\n}\n"
//! );
//! ```
//!
//! ## Strings and quoting
//!
//! String values are written verbatim. Values that need quotes in the output
//! (`"<group>"`, paths with spaces) must be stored quoted; [`quote`] applies
//! Xcode's quoting rules.
//!
//! ## Logging
//!
//! The writer emits [`tracing`] events under the `pbxproj::writer` target:
//! `debug` per render and section, `trace` for skipped keys, `warn` for
//! shapes written best-effort in lenient mode. No subscriber is installed.
//!
//! ## Format
//!
//! See the [`format`] module for the output grammar.

pub mod contents;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use contents::Contents;
pub use error::{Error, Result};
pub use map::{Field, PbxMap, COMMENT_SUFFIX};
pub use options::WriterOptions;
pub use ser::{ValueSerializer, Writer};
pub use value::{quote, Number, RecordKind, Shape, Value};

use serde::Serialize;
use std::io;

/// Writes `contents` as pbxproj text with default options.
///
/// # Examples
///
/// ```rust
/// use serde_pbxproj::{to_string, Contents};
///
/// assert_eq!(to_string(&Contents::new()).unwrap(), "{\n}\n");
/// ```
///
/// # Errors
///
/// Never fails with default options; see [`to_string_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(contents: &Contents) -> Result<String> {
    to_string_with_options(contents, WriterOptions::default())
}

/// Writes `contents` as pbxproj text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_pbxproj::{pbx, to_string_with_options, Contents, WriterOptions};
///
/// let project = pbx!({ "archiveVersion": 1, "name": null });
/// let contents = Contents::from_value(None, project).unwrap();
/// let options = WriterOptions::new().with_omit_empty_values(true);
///
/// assert_eq!(
///     to_string_with_options(&contents, options).unwrap(),
///     "{\n\tarchiveVersion = 1;\n}\n"
/// );
/// ```
///
/// # Errors
///
/// In strict mode, returns an error naming the first key whose value has no
/// spelling in the format, or the first orphan `_comment` key.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(contents: &Contents, options: WriterOptions) -> Result<String> {
    Writer::new(options).render(contents)
}

/// Writes `contents` as pbxproj text to an I/O sink.
///
/// # Examples
///
/// ```rust
/// use serde_pbxproj::{to_writer, Contents};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Contents::new().with_head_comment("!$*UTF8*$!")).unwrap();
/// assert_eq!(buffer, b"// !$*UTF8*$!\n{\n}\n");
/// ```
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, contents: &Contents) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, contents, WriterOptions::default())
}

/// Writes `contents` as pbxproj text to an I/O sink with custom options.
///
/// The text is rendered in full before anything is written, so a strict-mode
/// failure leaves the sink untouched.
///
/// # Errors
///
/// Returns an error if rendering fails or writing to the sink fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, contents: &Contents, options: WriterOptions) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(contents, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// Struct fields named `<field>_comment` become the comment of `<field>`, and
/// `{ value, comment }` structs inside sequences become annotated entries.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_pbxproj::{to_value, Value};
///
/// #[derive(Serialize)]
/// struct Project {
///     #[serde(rename = "archiveVersion")]
///     archive_version: u32,
///     #[serde(rename = "objectVersion")]
///     object_version: u32,
/// }
///
/// let value = to_value(&Project { archive_version: 1, object_version: 46 }).unwrap();
/// assert_eq!(value.as_object().unwrap().get("objectVersion"), Some(&Value::from(46)));
/// ```
///
/// # Errors
///
/// Returns an error for types with no pbxproj representation (byte arrays,
/// data-carrying enum variants, non-string map keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbx;

    #[derive(Serialize)]
    struct BuildFile {
        isa: &'static str,
        #[serde(rename = "fileRef")]
        file_ref: &'static str,
        #[serde(rename = "fileRef_comment")]
        file_ref_comment: &'static str,
    }

    #[test]
    fn test_empty_contents() {
        assert_eq!(to_string(&Contents::new()).unwrap(), "{\n}\n");
    }

    #[test]
    fn test_empty_head_comment_is_skipped() {
        let contents = Contents::new().with_head_comment("");
        assert_eq!(to_string(&contents).unwrap(), "{\n}\n");
    }

    #[test]
    fn test_struct_to_inline_record() {
        let mut section = PbxMap::new();
        let file = to_value(&BuildFile {
            isa: "PBXBuildFile",
            file_ref: "ABC",
            file_ref_comment: "main.m in Sources",
        })
        .unwrap();
        section.insert("ID".to_string(), file);

        let mut objects = PbxMap::new();
        objects.insert("PBXBuildFile".to_string(), Value::Object(section));
        let mut project = PbxMap::new();
        project.insert("objects".to_string(), Value::Object(objects));

        let text = to_string(&Contents::new().with_project(project)).unwrap();
        assert_eq!(
            text,
            "{\n\tobjects = {\n\n/* Begin PBXBuildFile section */\n\t\tID = {isa = PBXBuildFile; fileRef = ABC /* main.m in Sources */; };\n/* End PBXBuildFile section */\n\t};\n}\n"
        );
    }

    #[test]
    fn test_to_writer_matches_to_string() {
        let contents = Contents::from_value(Some("!$*UTF8*$!"), pbx!({ "archiveVersion": 1 })).unwrap();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &contents).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), to_string(&contents).unwrap());
    }

    #[test]
    fn test_to_writer_io_error() {
        struct Failing;
        impl io::Write for Failing {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = to_writer(Failing, &Contents::new()).unwrap_err();
        assert!(matches!(err, Error::Io(msg) if msg.contains("disk full")));
    }
}
