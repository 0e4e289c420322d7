/*!
 * Tests for script loading and per-line export
 */

use anyhow::Result;
use scriptcast::errors::ScriptError;
use scriptcast::script::Script;

use crate::common;

/// Test that raw lines are trimmed and blanks dropped
#[test]
fn test_from_lines_withBlanksAndWhitespace_shouldTrimAndDrop() {
    let script = Script::from_lines(vec!["  first  ", "", "   ", "second"]);

    assert_eq!(script.lines, vec!["first", "second"]);
    assert_eq!(script.len(), 2);
    assert!(!script.is_empty());
}

/// Test loading a JSON script document
#[test]
fn test_from_json_file_withValidDocument_shouldLoadLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "script.json",
        r#"{"lines": [" a line ", "", "another line"]}"#,
    )?;

    let script = Script::from_json_file(&path)?;

    assert_eq!(script.lines, vec!["a line", "another line"]);

    Ok(())
}

/// Test that a document without a lines array loads as empty
#[test]
fn test_from_json_file_withMissingLinesField_shouldBeEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "script.json", r#"{"title": "x"}"#)?;

    let script = Script::from_json_file(&path)?;

    assert!(script.is_empty());

    Ok(())
}

/// Test that malformed JSON is a fatal, named error
#[test]
fn test_from_json_file_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{not json")?;

    let err = Script::from_json_file(&path).unwrap_err();

    assert!(matches!(err, ScriptError::Malformed { .. }));
    assert!(err.to_string().contains("broken.json"));

    Ok(())
}

/// Test that a missing source file is an unreadable error
#[test]
fn test_from_json_file_withMissingFile_shouldFail() {
    let err = Script::from_json_file("does_not_exist.json").unwrap_err();
    assert!(matches!(err, ScriptError::Unreadable { .. }));
}

/// Test loading a flat text script
#[test]
fn test_from_text_file_withBlankRows_shouldDropThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "script.txt",
        "first line\n\n  second line  \n\n",
    )?;

    let script = Script::from_text_file(&path)?;

    assert_eq!(script.lines, vec!["first line", "second line"]);

    Ok(())
}

/// Test exporting one zero-padded file per line
#[test]
fn test_export_to_dir_withTenLines_shouldZeroPadNames() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let out_dir = temp_dir.path().join("lines");

    let lines: Vec<String> = (1..=10).map(|i| format!("line number {}", i)).collect();
    let script = Script::from_lines(lines);

    let written = script.export_to_dir(&out_dir)?;

    assert_eq!(written.len(), 10);
    assert!(out_dir.join("01.txt").is_file());
    assert!(out_dir.join("10.txt").is_file());
    assert!(!out_dir.join("00.txt").exists());

    // Content is the line plus a trailing newline
    let first = std::fs::read_to_string(out_dir.join("01.txt"))?;
    assert_eq!(first, "line number 1\n");

    Ok(())
}

/// Test exporting an empty script writes nothing but still creates the directory
#[test]
fn test_export_to_dir_withEmptyScript_shouldWriteNoFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let out_dir = temp_dir.path().join("lines");

    let script = Script::from_lines(Vec::<String>::new());
    let written = script.export_to_dir(&out_dir)?;

    assert!(written.is_empty());
    assert!(out_dir.is_dir());
    assert_eq!(std::fs::read_dir(&out_dir)?.count(), 0);

    Ok(())
}
