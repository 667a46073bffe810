//! The root value handed to the writer.

use crate::{Error, PbxMap, Result, Value};
use serde::{Deserialize, Serialize};

/// A complete `project.pbxproj` document: an optional header comment and the
/// root project record.
///
/// The serde representation matches the `{ headComment, project }` shape the
/// JavaScript parsers produce, so a JSON dump of a parsed project can be fed
/// straight back in:
///
/// ```rust
/// use serde_pbxproj::{to_string, Contents};
///
/// let contents: Contents = serde_json::from_str(r#"{
///     "headComment": "!$*UTF8*$!",
///     "project": { "archiveVersion": 1, "objectVersion": 46 }
/// }"#).unwrap();
///
/// assert_eq!(
///     to_string(&contents).unwrap(),
///     "// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n\tobjectVersion = 46;\n}\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<PbxMap>,
}

impl Contents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds contents from a project value, which must be a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValueShape`] if `project` is not a record.
    pub fn from_value(head_comment: Option<&str>, project: Value) -> Result<Self> {
        match project {
            Value::Object(map) => Ok(Contents {
                head_comment: head_comment.map(str::to_string),
                project: Some(map),
            }),
            other => Err(Error::unsupported_shape(
                "project",
                other.type_name(),
                "as the project root",
            )),
        }
    }

    #[must_use]
    pub fn with_head_comment(mut self, comment: impl Into<String>) -> Self {
        self.head_comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_project(mut self, project: PbxMap) -> Self {
        self.project = Some(project);
        self
    }
}
