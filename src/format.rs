//! The pbxproj output format.
//!
//! This module documents the text layout produced by [`Writer`](crate::Writer).
//! It matches what Xcode itself writes, so a project rewritten by this crate
//! diffs cleanly against one saved by Xcode.
//!
//! # Overview
//!
//! A `project.pbxproj` is an old-style property list: records in braces,
//! sequences in parentheses, `key = value;` entries. Xcode adds its own layout
//! rules on top:
//!
//! - one tab per nesting level, no spaces
//! - a `// !$*UTF8*$!` header comment on the first line
//! - the top-level `objects` record grouped into per-`isa` sections
//! - build files and file references collapsed onto one line each
//!
//! # Header and root
//!
//! ```text
//! // !$*UTF8*$!
//! {
//! 	archiveVersion = 1;
//! 	objectVersion = 46;
//! }
//! ```
//!
//! The header line is written only when the header comment is non-empty. The
//! root braces are always written, even for an empty or absent project, and
//! the output always ends with a newline.
//!
//! # Entries
//!
//! | Value | Layout |
//! |-------|--------|
//! | Scalar | `key = value;` or `key = value /* comment */;` |
//! | Record | `key = {`, nested entries one level deeper, `};` |
//! | Sequence | `key = (`, one entry per line one level deeper, `);` |
//!
//! Comments on record values are ignored; only scalars and section entries
//! print their comment. Keys are written in insertion order.
//!
//! ## Sequence entries
//!
//! ```text
//! 	children = (
//! 		29B97315FDCFA39411CA2CEA /* Other Sources */,
//! 		19C28FACFE9D520D11CA2CBB,
//! 		{
//! 			name = x;
//! 		},
//! 	);
//! ```
//!
//! Every entry ends with a comma, including the last one. An annotated entry
//! with an empty comment is written without the comment. A record entry with
//! both a `value` and a `comment` field is written as `value /* comment */,`
//! rather than as a block.
//!
//! # Sections
//!
//! Under the top-level `objects` key each entry is a section named after an
//! `isa` value, mapping object ids to records:
//!
//! ```text
//! 	objects = {
//!
//! /* Begin PBXGroup section */
//! 		19C28FACFE9D520D11CA2CBB /* Products */ = {
//! 			isa = PBXGroup;
//! 			children = (
//! 				1D6058910D05DD3D006BFB54 /* App.app */,
//! 			);
//! 			name = Products;
//! 			sourceTree = "<group>";
//! 		};
//! /* End PBXGroup section */
//! 	};
//! ```
//!
//! Each section is preceded by an empty line. The banners and the empty line
//! are written at column 0 whatever the current depth. A key named `objects`
//! anywhere else is an ordinary record.
//!
//! # Inline records
//!
//! A section record whose `isa` is `PBXBuildFile` or `PBXFileReference` is
//! written on a single line:
//!
//! ```text
//! 		1D60589B0D05DD56006BFB54 /* main.m in Sources */ = {isa = PBXBuildFile; fileRef = 29B97316FDCFA39411CA2CEA /* main.m */; };
//! 		8D1107310486CEB800E47090 /* Info.plist */ = {isa = PBXFileReference; lastKnownFileType = text.plist.xml; path = Info.plist; sourceTree = "<group>"; };
//! ```
//!
//! Inside an inline record every entry is followed by a single space:
//! scalars as `key = value; `, sequences as `key = (a, b, ); `, nested records
//! as `key = {...}; `. The line is trimmed, so it ends at the final `};`.
//!
//! # Empty values
//!
//! With [`omit_empty_values`](crate::WriterOptions::omit_empty_values) set,
//! null scalars are left out of records and inline records. Null entries in
//! sequences are still written as `null,` unless
//! [`omit_empty_sequence_entries`](crate::WriterOptions::omit_empty_sequence_entries)
//! is set as well.
//!
//! # Comment keys
//!
//! A key ending in `_comment` is never written as an entry. When its base key
//! exists it becomes that entry's comment; otherwise it is skipped, or
//! reported as [`Error::AmbiguousCommentKey`](crate::Error::AmbiguousCommentKey)
//! in strict mode.
//!
//! # Quoting
//!
//! Strings are written exactly as stored. Xcode quotes any string containing
//! characters other than ASCII letters, digits and `_$./`; use
//! [`quote`](crate::quote) to apply that rule when building a tree.
//!
//! # Numbers
//!
//! Integers are written in decimal. Floats use JavaScript's number spelling:
//! `0.5`, `Infinity`, `NaN`, and exponent form such as `1e+21` or `1.5e-7`
//! outside the range `[1e-6, 1e21)`.
