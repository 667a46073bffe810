//! pbxproj serialization.
//!
//! This module provides the [`Writer`] that turns a [`Contents`] tree into the
//! exact text Xcode writes and re-reads, and [`ValueSerializer`], which turns
//! any `T: Serialize` into a [`Value`] tree.
//!
//! ## Overview
//!
//! The writer is a single synchronous pass over the tree into one buffer:
//!
//! - **Project block**: the root record, with the `objects` key routed to the
//!   section layout instead of a plain nested block
//! - **Sections**: one `/* Begin NAME section */` ... `/* End NAME section */`
//!   group per entry of `objects`, always at column 0
//! - **Inline records**: `PBXBuildFile` and `PBXFileReference` objects are
//!   flattened onto one line, nested records included
//! - **Everything else**: tab-indented `key = value;` lines, `{ ... };` blocks
//!   and `( ... );` sequences
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_pbxproj::{pbx, to_string, Contents};
//!
//! let contents = Contents::from_value(None, pbx!({ "archiveVersion": 1 })).unwrap();
//! assert_eq!(to_string(&contents).unwrap(), "{\n\tarchiveVersion = 1;\n}\n");
//! ```
//!
//! ## Direct Writer Usage
//!
//! A [`Writer`] is consumed by [`Writer::render`], so every output gets a
//! fresh buffer and indentation state:
//!
//! ```rust
//! use serde_pbxproj::{Contents, Writer, WriterOptions};
//!
//! let writer = Writer::new(WriterOptions::new());
//! assert_eq!(writer.render(&Contents::new()).unwrap(), "{\n}\n");
//! ```

use crate::map::COMMENT_SUFFIX;
use crate::value::sequence_annotation;
use crate::{Contents, Error, Number, PbxMap, RecordKind, Result, Shape, Value, WriterOptions};
use serde::{ser, Serialize};
use tracing::{debug, trace, warn};

const INDENT: &str = "\t";
const OBJECTS_KEY: &str = "objects";
const LOG_TARGET: &str = "pbxproj::writer";

/// Returns the indentation for `depth` nesting levels.
///
/// # Examples
///
/// ```rust
/// use serde_pbxproj::ser::indent;
///
/// assert_eq!(indent(0), "");
/// assert_eq!(indent(2), "\t\t");
/// ```
#[must_use]
pub fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// The pbxproj writer.
///
/// Holds the output buffer, the current depth and the path of the key being
/// written (for error reports). Created via [`Writer::new`] and consumed by
/// [`Writer::render`].
pub struct Writer {
    output: String,
    options: WriterOptions,
    indent_level: usize,
    path: Vec<String>,
}

impl Writer {
    pub fn new(options: WriterOptions) -> Self {
        // Project files are rarely smaller than a few kilobytes.
        Writer {
            output: String::with_capacity(4096),
            options,
            indent_level: 0,
            path: Vec::new(),
        }
    }

    /// Writes the header comment and the project block, returning the text.
    ///
    /// # Errors
    ///
    /// Only fails in strict mode, on unsupported value shapes or ambiguous
    /// comment keys. The error names the offending key path.
    pub fn render(mut self, contents: &Contents) -> Result<String> {
        debug!(
            target: LOG_TARGET,
            keys = contents.project.as_ref().map_or(0, PbxMap::len),
            strict = self.options.strict,
            "Writing project"
        );

        if let Some(comment) = contents.head_comment.as_deref().filter(|c| !c.is_empty()) {
            self.line(&format!("// {}", comment));
        }
        self.write_project(contents.project.as_ref())?;

        debug!(target: LOG_TARGET, bytes = self.output.len(), "Wrote project");
        Ok(self.output)
    }

    fn line(&mut self, text: &str) {
        self.output.push_str(&indent(self.indent_level));
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Writes a line at column 0 regardless of the current depth.
    fn flush_line(&mut self, text: &str) {
        let depth = std::mem::replace(&mut self.indent_level, 0);
        self.line(text);
        self.indent_level = depth;
    }

    fn indented<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.indent_level += 1;
        let result = f(self);
        self.indent_level -= 1;
        result
    }

    fn at<F>(&mut self, segment: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.path.push(segment.to_string());
        let result = f(self);
        self.path.pop();
        result
    }

    fn path_with(&self, leaf: &str) -> String {
        let mut path = String::new();
        let segments = self.path.iter().map(String::as_str).chain(Some(leaf));
        for segment in segments.filter(|s| !s.is_empty()) {
            if !path.is_empty() && !segment.starts_with('[') {
                path.push('.');
            }
            path.push_str(segment);
        }
        path
    }

    /// Keys spelled with the comment suffix are annotations, never entries.
    /// Only a suffixed key with no base key in `object` is an error in strict
    /// mode.
    fn is_comment_key(&self, key: &str, object: &PbxMap) -> Result<bool> {
        if !key.ends_with(COMMENT_SUFFIX) {
            return Ok(false);
        }
        if self.options.strict && !object.annotates_sibling(key) {
            return Err(Error::ambiguous_comment_key(&self.path_with(key), key));
        }
        trace!(target: LOG_TARGET, key, "Skipping comment key");
        Ok(true)
    }

    fn unsupported(&self, leaf: &str, found: &'static str, context: &'static str) -> Result<()> {
        let path = self.path_with(leaf);
        if self.options.strict {
            return Err(Error::unsupported_shape(&path, found, context));
        }
        warn!(target: LOG_TARGET, path = %path, found, context, "Unsupported value shape");
        Ok(())
    }

    fn omits(&self, value: &Value) -> bool {
        value.is_null() && self.options.omit_empty_values
    }

    fn write_project(&mut self, project: Option<&PbxMap>) -> Result<()> {
        self.line("{");
        if let Some(project) = project {
            self.indented(|w| w.write_entries(project, true))?;
        }
        self.line("}");
        Ok(())
    }

    fn write_object(&mut self, object: &PbxMap) -> Result<()> {
        self.write_entries(object, false)
    }

    fn write_entries(&mut self, object: &PbxMap, top_level: bool) -> Result<()> {
        for (key, field) in object {
            if self.is_comment_key(key, object)? {
                continue;
            }
            let comment = object.comment(key);

            match field.value.shape() {
                Shape::Sequence(items) => self.at(key, |w| w.write_array(key, items))?,
                Shape::Record(record) => {
                    self.line(&format!("{} = {{", key));
                    self.at(key, |w| {
                        w.indented(|w| {
                            if top_level && key == OBJECTS_KEY {
                                w.write_objects_sections(record)
                            } else {
                                w.write_object(record)
                            }
                        })
                    })?;
                    self.line("};");
                }
                Shape::Scalar(value) if self.omits(value) => {
                    trace!(target: LOG_TARGET, key = %key, "Omitting empty value");
                }
                Shape::Scalar(value) => {
                    let line = self.scalar_entry(key, value, comment)?;
                    self.line(&line);
                }
            }
        }
        Ok(())
    }

    /// `key = value;` or `key = value /* comment */;`
    fn scalar_entry(&self, key: &str, value: &Value, comment: Option<&str>) -> Result<String> {
        let (value, comment) = match value {
            Value::Annotated {
                value: inner,
                comment: own,
            } => {
                self.unsupported(key, "annotated pair", "as a record value")?;
                let own = Some(own.as_str()).filter(|c| !c.is_empty());
                (&**inner, comment.or(own))
            }
            _ => (value, comment),
        };

        Ok(match comment {
            Some(comment) => format!("{} = {} /* {} */;", key, value, comment),
            None => format!("{} = {};", key, value),
        })
    }

    fn write_array(&mut self, name: &str, items: &[Value]) -> Result<()> {
        self.line(&format!("{} = (", name));
        self.indented(|w| {
            for (i, entry) in items.iter().enumerate() {
                w.at(&format!("[{}]", i), |w| w.write_array_entry(entry))?;
            }
            Ok(())
        })?;
        self.line(");");
        Ok(())
    }

    // Null entries are kept unless `omit_empty_sequence_entries` is set;
    // `omit_empty_values` does not reach into sequences.
    fn write_array_entry(&mut self, entry: &Value) -> Result<()> {
        match entry {
            Value::Null if self.options.omit_empty_sequence_entries => {
                trace!(target: LOG_TARGET, "Omitting empty sequence entry");
            }
            Value::Annotated { value, comment } if !comment.is_empty() => {
                self.line(&format!("{} /* {} */,", value, comment));
            }
            Value::Annotated { value, .. } => self.line(&format!("{},", value)),
            Value::Object(record) => match sequence_annotation(record) {
                Some((value, comment)) => self.line(&format!("{} /* {} */,", value, comment)),
                None => {
                    self.line("{");
                    self.indented(|w| w.write_object(record))?;
                    self.line("},");
                }
            },
            Value::Array(_) => {
                self.unsupported("", "sequence", "inside a sequence")?;
                self.line(&format!("{},", entry));
            }
            _ => self.line(&format!("{},", entry)),
        }
        Ok(())
    }

    fn write_objects_sections(&mut self, objects: &PbxMap) -> Result<()> {
        for (name, field) in objects {
            self.flush_line("");

            match field.value.as_object() {
                Some(section) => {
                    debug!(target: LOG_TARGET, section = %name, records = section.len(), "Writing section");
                    self.flush_line(&format!("/* Begin {} section */", name));
                    self.at(name, |w| w.write_section(section))?;
                    self.flush_line(&format!("/* End {} section */", name));
                }
                None => self.unsupported(name, field.value.type_name(), "as an objects section")?,
            }
        }
        Ok(())
    }

    fn write_section(&mut self, section: &PbxMap) -> Result<()> {
        for (id, field) in section {
            if self.is_comment_key(id, section)? {
                continue;
            }
            let comment = section.comment(id);

            let Some(record) = field.value.as_object() else {
                self.unsupported(id, field.value.type_name(), "as a section entry")?;
                match field.value.shape() {
                    Shape::Sequence(items) => self.at(id, |w| w.write_array(id, items))?,
                    _ => {
                        let line = self.scalar_entry(id, &field.value, comment)?;
                        self.line(&line);
                    }
                }
                continue;
            };

            self.at(id, |w| match RecordKind::of(record) {
                RecordKind::BuildFile(record) | RecordKind::FileReference(record) => {
                    w.write_inline_object(id, comment, record)
                }
                RecordKind::Other(record) => w.write_record_block(id, comment, record),
            })?;
        }
        Ok(())
    }

    fn write_record_block(&mut self, id: &str, comment: Option<&str>, record: &PbxMap) -> Result<()> {
        match comment {
            Some(comment) => self.line(&format!("{} /* {} */ = {{", id, comment)),
            None => self.line(&format!("{} = {{", id)),
        }
        self.indented(|w| w.write_object(record))?;
        self.line("};");
        Ok(())
    }

    fn write_inline_object(&mut self, id: &str, comment: Option<&str>, record: &PbxMap) -> Result<()> {
        let mut fragments = Vec::new();
        self.inline_fragments(&mut fragments, id, comment, record)?;
        let line = fragments.concat();
        self.line(line.trim());
        Ok(())
    }

    /// Appends `name = { k = v; ... }; ` to `out`, flattening nested records
    /// into the same fragments.
    fn inline_fragments(
        &mut self,
        out: &mut Vec<String>,
        name: &str,
        comment: Option<&str>,
        record: &PbxMap,
    ) -> Result<()> {
        out.push(match comment {
            Some(comment) => format!("{} /* {} */ = {{", name, comment),
            None => format!("{} = {{", name),
        });

        for (key, field) in record {
            if self.is_comment_key(key, record)? {
                continue;
            }
            let comment = record.comment(key);

            match field.value.shape() {
                Shape::Sequence(items) => {
                    out.push(format!("{} = (", key));
                    for (i, item) in items.iter().enumerate() {
                        if !item.is_scalar() {
                            self.unsupported(
                                &format!("{}[{}]", key, i),
                                item.type_name(),
                                "inside an inline record sequence",
                            )?;
                        }
                        out.push(format!("{}, ", item));
                    }
                    out.push("); ".to_string());
                }
                Shape::Record(nested) => {
                    self.at(key, |w| w.inline_fragments(out, key, comment, nested))?;
                }
                Shape::Scalar(value) if self.omits(value) => {
                    trace!(target: LOG_TARGET, key = %key, "Omitting empty value");
                }
                Shape::Scalar(value) => {
                    let mut entry = self.scalar_entry(key, value, comment)?;
                    entry.push(' ');
                    out.push(entry);
                }
            }
        }

        out.push("}; ".to_string());
        Ok(())
    }
}

/// Serializer producing a [`Value`] tree from any `T: Serialize`.
///
/// Maps fold `<key>_comment` fields into annotations and sequences turn
/// `{value, comment}` structs into annotated entries, so plain Rust structs
/// can describe commented records.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_pbxproj::{to_value, Value};
///
/// #[derive(Serialize)]
/// struct BuildFile {
///     isa: &'static str,
///     #[serde(rename = "fileRef")]
///     file_ref: &'static str,
///     #[serde(rename = "fileRef_comment")]
///     file_ref_comment: &'static str,
/// }
///
/// let value = to_value(&BuildFile {
///     isa: "PBXBuildFile",
///     file_ref: "ABC",
///     file_ref_comment: "main.m",
/// }).unwrap();
///
/// let record = value.as_object().unwrap();
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.comment("fileRef"), Some("main.m"));
/// ```
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    entries: Vec<(String, Value)>,
    current_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        if v <= i64::MAX as u64 {
            Ok(Value::Number(Number::Integer(v as i64)))
        } else {
            Ok(Value::Number(Number::Float(v as f64)))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::Float(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Value> {
        Err(Error::unsupported_type("byte arrays"))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            entries: Vec::with_capacity(capacity),
            current_key: None,
        }
    }

    fn into_value(self) -> Value {
        Value::Object(PbxMap::from_legacy(self.entries))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::sequence(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::sequence(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::sequence(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::sequence(self.vec))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("Map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.entries.push((key, to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.into_value())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entries.push((key.to_string(), to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.into_value())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entries.push((key.to_string(), to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.into_value())
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}
