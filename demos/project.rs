//! Build a minimal iOS project tree and print it as a project.pbxproj.
//!
//! Run with: cargo run --example project

use serde_pbxproj::{pbx, quote, to_string, to_string_with_options, Contents, WriterOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let group_tree = quote("<group>").into_owned();

    let project = pbx!({
        "archiveVersion": 1,
        "classes": {},
        "objectVersion": 46,
        "objects": {
            "PBXBuildFile": {
                "1D60589B0D05DD56006BFB54": {
                    "isa": "PBXBuildFile",
                    "fileRef": "29B97316FDCFA39411CA2CEA",
                    "fileRef_comment": "main.m"
                },
                "1D60589B0D05DD56006BFB54_comment": "main.m in Sources"
            },
            "PBXFileReference": {
                "29B97316FDCFA39411CA2CEA": {
                    "isa": "PBXFileReference",
                    "fileEncoding": 4,
                    "lastKnownFileType": "sourcecode.c.objc",
                    "path": "main.m",
                    "sourceTree": group_tree
                },
                "29B97316FDCFA39411CA2CEA_comment": "main.m"
            },
            "PBXGroup": {
                "29B97314FDCFA39411CA2CEA": {
                    "isa": "PBXGroup",
                    "children": [
                        { "value": "29B97316FDCFA39411CA2CEA", "comment": "main.m" }
                    ],
                    "name": "CustomTemplate",
                    "sourceTree": group_tree
                },
                "29B97314FDCFA39411CA2CEA_comment": "CustomTemplate"
            }
        },
        "rootObject": "29B97313FDCFA39411CA2CEA",
        "rootObject_comment": "Project object"
    });

    let contents = Contents::from_value(Some("!$*UTF8*$!"), project)?;

    let text = to_string(&contents)?;
    println!("{}", text);

    // Strict mode accepts the same tree unchanged.
    let strict = to_string_with_options(&contents, WriterOptions::new().with_strict(true))?;
    assert_eq!(text, strict);

    Ok(())
}
