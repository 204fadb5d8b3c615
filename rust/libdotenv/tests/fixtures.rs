//! Test harness for the dotenv parser against fixture files.
//!
//! Every `test/env/*.env` file is parsed and compared with the JSON document
//! of the same name in `test/json/` (`{"env": {...}, "comments": {...}}`).
//! Every `test/bad/*.env` file is expected to fail with the message stored
//! in the matching `.error` file.

use std::fs;
use std::path::{Path, PathBuf};

use libdotenv::{
    encode, parse, parse_bytes, parse_with_comments, parse_with_options, Document, Env,
    ParseError, ParseOptions, SpecName,
};
use serde_json::Value as JsonValue;

/// Root test directory.
fn test_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("test")
}

/// All files matching `test/<subdir>/*.<ext>`, sorted.
fn get_files_in_subdir(subdir: &str, ext: &str) -> Vec<PathBuf> {
    let pattern = test_root().join(subdir).join(format!("*.{}", ext));
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .expect("valid glob pattern")
        .flatten()
        .collect();
    files.sort();
    files
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

/// Read the expected JSON document for a `.env` fixture.
fn read_expected_json(env_path: &Path) -> Option<JsonValue> {
    let basename = env_path.file_stem().unwrap().to_string_lossy();
    let json_path = test_root().join("json").join(format!("{}.json", basename));
    let text = fs::read_to_string(json_path).ok()?;
    serde_json::from_str(&text).ok()
}

/// Convert an expected JSON object into a mapping.
fn json_to_map(value: &JsonValue) -> Env {
    value
        .as_object()
        .map(|obj| {
            obj.iter()
                .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn run_env_test(path: &Path) -> Result<(), String> {
    let name = file_name(path);
    let source =
        fs::read_to_string(path).map_err(|e| format!("{}: failed to read: {}", name, e))?;
    let expected = read_expected_json(path)
        .ok_or_else(|| format!("{}: missing or invalid expected JSON", name))?;

    let doc = parse_with_comments(&source).map_err(|e| format!("{}: {}", name, e))?;

    let expected_env = json_to_map(&expected["env"]);
    if doc.env != expected_env {
        return Err(format!(
            "{}: values differ\n    expected: {:?}\n    actual:   {:?}",
            name, expected_env, doc.env
        ));
    }

    let expected_comments = json_to_map(&expected["comments"]);
    if doc.comments != expected_comments {
        return Err(format!(
            "{}: comments differ\n    expected: {:?}\n    actual:   {:?}",
            name, expected_comments, doc.comments
        ));
    }

    Ok(())
}

fn run_bad_test(path: &Path) -> Result<(), String> {
    let name = file_name(path);
    let source =
        fs::read_to_string(path).map_err(|e| format!("{}: failed to read: {}", name, e))?;
    let error_path = path.with_extension("error");
    let expected = fs::read_to_string(&error_path)
        .map_err(|_| format!("{}: missing .error file", name))?;

    let options = ParseOptions::default().filename(name.clone());
    match parse_with_options(&source, &options) {
        Ok(doc) => Err(format!("{}: expected failure, parsed {:?}", name, doc.env)),
        Err(e) if e.to_string() == expected.trim() => Ok(()),
        Err(e) => Err(format!(
            "{}: wrong error\n    expected: {}\n    actual:   {}",
            name,
            expected.trim(),
            e
        )),
    }
}

fn report(kind: &str, results: Vec<Result<(), String>>) {
    let failed: Vec<String> = results.into_iter().filter_map(Result::err).collect();
    if !failed.is_empty() {
        println!("\nErrors:");
        for error in &failed {
            println!("  - {}", error);
        }
    }
    assert!(failed.is_empty(), "{} {} tests failed", failed.len(), kind);
}

#[test]
fn test_all_env_fixtures() {
    let files = get_files_in_subdir("env", "env");
    assert!(!files.is_empty(), "no .env fixtures found");
    println!("\nRunning {} .env test files:", files.len());
    report(".env", files.iter().map(|f| run_env_test(f)).collect());
}

#[test]
fn test_all_bad_fixtures() {
    let files = get_files_in_subdir("bad", "env");
    assert!(!files.is_empty(), "no bad fixtures found");
    println!("\nRunning {} bad .env test files:", files.len());
    report("bad .env", files.iter().map(|f| run_bad_test(f)).collect());
}

/// Encoding a parsed fixture and parsing it again yields the same mapping.
#[test]
fn test_encode_roundtrip_all_env_fixtures() {
    let results = get_files_in_subdir("env", "env")
        .iter()
        .map(|path| {
            let name = file_name(path);
            let source = fs::read_to_string(path).map_err(|e| e.to_string())?;
            let env = parse(&source).map_err(|e| format!("{}: {}", name, e))?;
            let text = encode(&env).map_err(|e| format!("{}: {}", name, e))?;
            let reparsed = parse(&text).map_err(|e| format!("{}: reparse: {}", name, e))?;
            if reparsed != env {
                return Err(format!("{}: roundtrip changed values:\n{}", name, text));
            }
            Ok(())
        })
        .collect();
    report("roundtrip", results);
}

#[test]
fn test_annotations_fixture() {
    let path = test_root().join("env").join("annotations.env");
    let source = fs::read_to_string(path).unwrap();
    let specs = parse_with_comments(&source).unwrap().specs();

    assert_eq!(specs["API_KEY"].name, SpecName::Secret);
    assert!(specs["API_KEY"].required);
    assert!(specs["API_KEY"].valid);

    assert_eq!(specs["PASSWORD"].name, SpecName::Password);
    assert!(specs["PASSWORD"].required);
    assert!(!specs["PASSWORD"].valid);

    assert_eq!(specs["PORT"].name, SpecName::Number);
    assert!(!specs["PORT"].required);
    assert!(specs["PORT"].valid);

    assert_eq!(specs["NAME"].name, SpecName::Plain);
    assert!(specs["NAME"].required);
    assert!(!specs["NAME"].valid);

    assert_eq!(
        specs["NOTE"].name,
        SpecName::Unknown("Whatever".to_string())
    );
    assert!(!specs["NOTE"].valid);
}

// ============================================================================
// Individual behaviors
// ============================================================================

#[test]
fn test_single_quotes_are_literal() {
    let env = parse("B=real\nA='$B'").unwrap();
    assert_eq!(env["A"], "$B");
}

#[test]
fn test_double_quote_escape_ordering() {
    let env = parse("B=\"a\\nb\"\nC=\"a\\\\nb\"").unwrap();
    assert_eq!(env["B"], "a\nb");
    assert_eq!(env["C"], "a\\nb");
}

#[test]
fn test_inline_comment_needs_whitespace() {
    let doc = parse_with_comments("D=http://x.com/#frag\nE=value # note").unwrap();
    assert_eq!(doc.get("D"), Some("http://x.com/#frag"));
    assert_eq!(doc.comment("D"), None);
    assert_eq!(doc.get("E"), Some("value"));
    assert_eq!(doc.comment("E"), Some("note"));
}

#[test]
fn test_invalid_key_cites_character() {
    let err = parse("BA&D=x").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidKeySyntax {
            ch: '&',
            fragment: "BA&D=x".to_string(),
            location: String::new(),
        }
    );
}

#[test]
fn test_unterminated_quote_at_end() {
    let err = parse("F=\"abc").unwrap_err();
    assert!(matches!(err, ParseError::UnterminatedQuote { .. }));
    assert_eq!(err.to_string(), "unterminated quoted value \"abc");
}

#[test]
fn test_parse_bytes() {
    let env = parse_bytes(b"A=1\r\nB=caf\xc3\xa9\r\n").unwrap();
    assert_eq!(env["A"], "1");
    assert_eq!(env["B"], "caf\u{e9}");
}

#[test]
fn test_options_without_comments() {
    let doc = parse_with_options("A=1 # note", &ParseOptions::default()).unwrap();
    assert_eq!(doc.get("A"), Some("1"));
    assert!(doc.comments.is_empty());
}

#[test]
fn test_document_conversions() {
    let doc: Document = parse("A=1\nB=2").unwrap().into();
    assert_eq!(doc.len(), 2);
    assert!(!doc.is_empty());
    let env: Env = doc.into();
    assert_eq!(env.keys().collect::<Vec<_>>(), vec!["A", "B"]);
}

#[test]
fn test_empty_input() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("\n\n# only comments\n").unwrap().is_empty());
}
