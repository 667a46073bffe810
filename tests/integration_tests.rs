use serde::Serialize;
use serde_pbxproj::{
    pbx, to_string, to_string_with_options, to_value, to_writer, Contents, Error, PbxMap, Value,
    WriterOptions,
};

const PROJECT_JSON: &str = r#"{
    "headComment": "!$*UTF8*$!",
    "project": {
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
                    "sourceTree": "\"<group>\""
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
                    "sourceTree": "\"<group>\""
                },
                "29B97314FDCFA39411CA2CEA_comment": "CustomTemplate"
            },
            "XCBuildConfiguration": {
                "C01FCF4F08A954540054247B": {
                    "isa": "XCBuildConfiguration",
                    "buildSettings": {
                        "SDKROOT": "iphoneos",
                        "OTHER_LDFLAGS": ["\"-ObjC\""]
                    },
                    "name": "Debug"
                },
                "C01FCF4F08A954540054247B_comment": "Debug"
            }
        },
        "rootObject": "29B97313FDCFA39411CA2CEA",
        "rootObject_comment": "Project object"
    }
}"#;

const PROJECT_TEXT: &[&str] = &[
    "// !$*UTF8*$!",
    "{",
    "\tarchiveVersion = 1;",
    "\tclasses = {",
    "\t};",
    "\tobjectVersion = 46;",
    "\tobjects = {",
    "",
    "/* Begin PBXBuildFile section */",
    "\t\t1D60589B0D05DD56006BFB54 /* main.m in Sources */ = {isa = PBXBuildFile; fileRef = 29B97316FDCFA39411CA2CEA /* main.m */; };",
    "/* End PBXBuildFile section */",
    "",
    "/* Begin PBXFileReference section */",
    "\t\t29B97316FDCFA39411CA2CEA /* main.m */ = {isa = PBXFileReference; fileEncoding = 4; lastKnownFileType = sourcecode.c.objc; path = main.m; sourceTree = \"<group>\"; };",
    "/* End PBXFileReference section */",
    "",
    "/* Begin PBXGroup section */",
    "\t\t29B97314FDCFA39411CA2CEA /* CustomTemplate */ = {",
    "\t\t\tisa = PBXGroup;",
    "\t\t\tchildren = (",
    "\t\t\t\t29B97316FDCFA39411CA2CEA /* main.m */,",
    "\t\t\t);",
    "\t\t\tname = CustomTemplate;",
    "\t\t\tsourceTree = \"<group>\";",
    "\t\t};",
    "/* End PBXGroup section */",
    "",
    "/* Begin XCBuildConfiguration section */",
    "\t\tC01FCF4F08A954540054247B /* Debug */ = {",
    "\t\t\tisa = XCBuildConfiguration;",
    "\t\t\tbuildSettings = {",
    "\t\t\t\tSDKROOT = iphoneos;",
    "\t\t\t\tOTHER_LDFLAGS = (",
    "\t\t\t\t\t\"-ObjC\",",
    "\t\t\t\t);",
    "\t\t\t};",
    "\t\t\tname = Debug;",
    "\t\t};",
    "/* End XCBuildConfiguration section */",
    "\t};",
    "\trootObject = 29B97313FDCFA39411CA2CEA /* Project object */;",
    "}",
];

fn expected(lines: &[&str]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn project_contents() -> Contents {
    serde_json::from_str(PROJECT_JSON).unwrap()
}

fn render(project: Value) -> String {
    to_string(&Contents::from_value(None, project).unwrap()).unwrap()
}

fn render_with(project: Value, options: WriterOptions) -> Result<String, Error> {
    to_string_with_options(&Contents::from_value(None, project).unwrap(), options)
}

#[test]
fn test_full_project() {
    let text = to_string(&project_contents()).unwrap();
    assert_eq!(text, expected(PROJECT_TEXT));
}

#[test]
fn test_full_project_strict_matches_lenient() {
    let contents = project_contents();
    let strict = to_string_with_options(&contents, WriterOptions::new().with_strict(true)).unwrap();
    assert_eq!(strict, to_string(&contents).unwrap());
}

#[test]
fn test_output_is_idempotent() {
    let contents = project_contents();
    assert_eq!(to_string(&contents).unwrap(), to_string(&contents).unwrap());
}

#[test]
fn test_json_roundtrip_preserves_output() {
    let contents = project_contents();
    let json = serde_json::to_string(&contents).unwrap();
    let back: Contents = serde_json::from_str(&json).unwrap();

    assert_eq!(back, contents);
    assert_eq!(to_string(&back).unwrap(), to_string(&contents).unwrap());
}

#[test]
fn test_build_file_line() {
    let text = render(pbx!({
        "objects": {
            "PBXBuildFile": {
                "ID": {
                    "isa": "PBXBuildFile",
                    "fileRef": "ABC",
                    "fileRef_comment": "main.m in Sources"
                }
            }
        }
    }));
    assert_eq!(
        text,
        expected(&[
            "{",
            "\tobjects = {",
            "",
            "/* Begin PBXBuildFile section */",
            "\t\tID = {isa = PBXBuildFile; fileRef = ABC /* main.m in Sources */; };",
            "/* End PBXBuildFile section */",
            "\t};",
            "}",
        ])
    );
}

#[test]
fn test_file_reference_with_settings() {
    let text = render(pbx!({
        "objects": {
            "PBXFileReference": {
                "F1": {
                    "isa": "PBXFileReference",
                    "path": "libz.dylib",
                    "attributes": ["Weak", "CodeSignOnCopy"],
                    "settings": { "COMPILER_FLAGS": "\"-fobjc-arc\"" }
                },
                "F1_comment": "libz.dylib"
            }
        }
    }));
    assert!(text.contains(
        "\t\tF1 /* libz.dylib */ = {isa = PBXFileReference; path = libz.dylib; attributes = (Weak, CodeSignOnCopy, ); settings = {COMPILER_FLAGS = \"-fobjc-arc\"; }; };\n"
    ));
}

#[test]
fn test_empty_project() {
    assert_eq!(to_string(&Contents::new()).unwrap(), "{\n}\n");
    assert_eq!(render(pbx!({})), "{\n}\n");

    let with_head = Contents::new().with_head_comment("!$*UTF8*$!");
    assert_eq!(to_string(&with_head).unwrap(), "// !$*UTF8*$!\n{\n}\n");
}

#[test]
fn test_scalar_rendering() {
    let text = render(pbx!({
        "flag": true,
        "off": false,
        "ratio": 0.5,
        "missing": null,
        "negative": (-3)
    }));
    assert_eq!(
        text,
        expected(&[
            "{",
            "\tflag = true;",
            "\toff = false;",
            "\tratio = 0.5;",
            "\tmissing = null;",
            "\tnegative = -3;",
            "}",
        ])
    );
}

#[test]
fn test_omit_empty_values_skips_records_not_sequences() {
    let project = pbx!({
        "name": null,
        "list": [null, "x"],
        "objects": {
            "PBXFileReference": {
                "F": { "isa": "PBXFileReference", "name": null, "path": "a.m" }
            }
        }
    });

    let kept = render_with(project.clone(), WriterOptions::new()).unwrap();
    assert!(kept.contains("\tname = null;\n"));
    assert!(kept.contains("F = {isa = PBXFileReference; name = null; path = a.m; };"));

    let omitted = render_with(project.clone(), WriterOptions::new().with_omit_empty_values(true)).unwrap();
    assert_eq!(
        omitted,
        expected(&[
            "{",
            "\tlist = (",
            "\t\tnull,",
            "\t\tx,",
            "\t);",
            "\tobjects = {",
            "",
            "/* Begin PBXFileReference section */",
            "\t\tF = {isa = PBXFileReference; path = a.m; };",
            "/* End PBXFileReference section */",
            "\t};",
            "}",
        ])
    );

    let both = WriterOptions::new()
        .with_omit_empty_values(true)
        .with_omit_empty_sequence_entries(true);
    let text = render_with(project, both).unwrap();
    assert!(text.contains("\tlist = (\n\t\tx,\n\t);\n"));
}

#[test]
fn test_record_value_comment_is_ignored() {
    let mut settings = PbxMap::new();
    settings.insert("SDKROOT".to_string(), Value::from("iphoneos"));
    let mut project = PbxMap::new();
    project.insert_with_comment("buildSettings".to_string(), Value::Object(settings), "ignored");

    let text = to_string(&Contents::new().with_project(project)).unwrap();
    assert_eq!(text, "{\n\tbuildSettings = {\n\t\tSDKROOT = iphoneos;\n\t};\n}\n");
}

#[test]
fn test_empty_annotation_comment() {
    let mut project = PbxMap::new();
    project.insert(
        "files".to_string(),
        Value::Array(vec![Value::annotated("A", ""), Value::annotated("B", "b.m")]),
    );
    let text = to_string(&Contents::new().with_project(project)).unwrap();
    assert_eq!(text, "{\n\tfiles = (\n\t\tA,\n\t\tB /* b.m */,\n\t);\n}\n");
}

#[test]
fn test_orphan_comment_key() {
    let project = pbx!({ "archiveVersion": 1, "name_comment": "orphan" });

    let text = render_with(project.clone(), WriterOptions::new()).unwrap();
    assert_eq!(text, "{\n\tarchiveVersion = 1;\n}\n");

    let err = render_with(project, WriterOptions::new().with_strict(true)).unwrap_err();
    match err {
        Error::AmbiguousCommentKey { path, key } => {
            assert_eq!(path, "name_comment");
            assert_eq!(key, "name_comment");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_non_record_section() {
    let project = pbx!({ "objects": { "PBXGroup": "oops" } });

    let text = render_with(project.clone(), WriterOptions::new()).unwrap();
    assert_eq!(text, "{\n\tobjects = {\n\n\t};\n}\n");

    let err = render_with(project, WriterOptions::new().with_strict(true)).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedValueShape { ref path, found: "string", .. } if path == "objects.PBXGroup"
    ));
}

#[test]
fn test_non_record_section_entry() {
    let project = pbx!({ "objects": { "PBXGroup": { "ABC": "x", "DEF": ["y"] } } });

    let text = render_with(project.clone(), WriterOptions::new()).unwrap();
    assert!(text.contains("\t\tABC = x;\n\t\tDEF = (\n\t\t\ty,\n\t\t);\n"));

    let err = render_with(project, WriterOptions::new().with_strict(true)).unwrap_err();
    assert_eq!(err.path(), Some("objects.PBXGroup.ABC"));
}

#[test]
fn test_annotated_record_value() {
    let mut project = PbxMap::new();
    project.insert("rootObject".to_string(), Value::annotated("ABC", "Project object"));

    let contents = Contents::new().with_project(project);
    assert_eq!(
        to_string(&contents).unwrap(),
        "{\n\trootObject = ABC /* Project object */;\n}\n"
    );

    let err = to_string_with_options(&contents, WriterOptions::new().with_strict(true)).unwrap_err();
    assert!(matches!(err, Error::UnsupportedValueShape { found: "annotated pair", .. }));
}

#[test]
fn test_record_inside_inline_sequence() {
    let project = pbx!({
        "objects": {
            "PBXBuildFile": {
                "ID": { "isa": "PBXBuildFile", "tags": [{ "a": 1 }] }
            }
        }
    });

    let text = render_with(project.clone(), WriterOptions::new()).unwrap();
    assert!(text.contains("\t\tID = {isa = PBXBuildFile; tags = ({a = 1; }, ); };\n"));

    let err = render_with(project, WriterOptions::new().with_strict(true)).unwrap_err();
    assert_eq!(err.path(), Some("objects.PBXBuildFile.ID.tags[0]"));
}

#[test]
fn test_to_writer() {
    let contents = project_contents();
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &contents).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), expected(PROJECT_TEXT));
}

#[test]
fn test_struct_project() {
    #[derive(Serialize)]
    struct Reference {
        value: &'static str,
        comment: &'static str,
    }

    #[derive(Serialize)]
    struct Group {
        isa: &'static str,
        children: Vec<Reference>,
        #[serde(rename = "sourceTree")]
        source_tree: &'static str,
    }

    let group = to_value(&Group {
        isa: "PBXGroup",
        children: vec![Reference {
            value: "ABC",
            comment: "main.m",
        }],
        source_tree: "\"<group>\"",
    })
    .unwrap();

    let mut section = PbxMap::new();
    section.insert_with_comment("G".to_string(), group, "Sources");
    let mut objects = PbxMap::new();
    objects.insert("PBXGroup".to_string(), Value::Object(section));
    let mut project = PbxMap::new();
    project.insert("objects".to_string(), Value::Object(objects));

    let text = to_string(&Contents::new().with_project(project)).unwrap();
    assert!(text.contains(
        "\t\tG /* Sources */ = {\n\t\t\tisa = PBXGroup;\n\t\t\tchildren = (\n\t\t\t\tABC /* main.m */,\n\t\t\t);\n\t\t\tsourceTree = \"<group>\";\n\t\t};\n"
    ));
}

#[test]
fn test_options_from_json() {
    let options: WriterOptions =
        serde_json::from_str(r#"{ "omitEmptyValues": true, "strict": true }"#).unwrap();
    assert!(options.omit_empty_values);
    assert!(options.strict);
    assert!(!options.omit_empty_sequence_entries);
}

#[test]
fn test_sibling_comment_key_from_insert() {
    let mut project = PbxMap::new();
    project.insert("rootObject".to_string(), Value::from("ABC"));
    project.insert("rootObject_comment".to_string(), Value::from("Project object"));
    let contents = Contents::new().with_project(project);

    let expected = "{\n\trootObject = ABC /* Project object */;\n}\n";
    assert_eq!(to_string(&contents).unwrap(), expected);
    assert_eq!(
        to_string_with_options(&contents, WriterOptions::new().with_strict(true)).unwrap(),
        expected
    );
}

#[test]
fn test_sibling_comment_keys_from_collect() {
    let record: PbxMap = vec![
        ("isa".to_string(), Value::from("PBXBuildFile")),
        ("fileRef".to_string(), Value::from("F1")),
        ("fileRef_comment".to_string(), Value::from("main.m")),
    ]
    .into_iter()
    .collect();
    let section: PbxMap = vec![
        ("B1".to_string(), Value::Object(record)),
        ("B1_comment".to_string(), Value::from("main.m in Sources")),
    ]
    .into_iter()
    .collect();
    let objects: PbxMap = vec![("PBXBuildFile".to_string(), Value::Object(section))]
        .into_iter()
        .collect();
    let project: PbxMap = vec![("objects".to_string(), Value::Object(objects))]
        .into_iter()
        .collect();

    let text = to_string_with_options(
        &Contents::new().with_project(project),
        WriterOptions::new().with_strict(true),
    )
    .unwrap();
    assert!(text.contains(
        "\n\t\tB1 /* main.m in Sources */ = {isa = PBXBuildFile; fileRef = F1 /* main.m */; };\n"
    ));
}

#[test]
fn test_value_comment_record_in_sequence() {
    let entry: PbxMap = vec![
        ("value".to_string(), Value::from("ABC")),
        ("comment".to_string(), Value::from("main.m")),
    ]
    .into_iter()
    .collect();
    let partial: PbxMap = vec![
        ("value".to_string(), Value::from("DEF")),
        ("comment".to_string(), Value::from("")),
    ]
    .into_iter()
    .collect();

    let mut project = PbxMap::new();
    project.insert(
        "children".to_string(),
        Value::Array(vec![Value::Object(entry), Value::Object(partial)]),
    );

    let text = to_string(&Contents::new().with_project(project)).unwrap();
    assert_eq!(
        text,
        expected(&[
            "{",
            "\tchildren = (",
            "\t\tABC /* main.m */,",
            "\t\t{",
            "\t\t\tvalue = DEF;",
            "\t\t\tcomment = ;",
            "\t\t},",
            "\t);",
            "}",
        ])
    );
}
