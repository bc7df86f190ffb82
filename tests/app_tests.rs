use std::{fs, io::Write};

use select_star_analyzer::{
    app::{AnalyzeParams, RemediateParams, load_batches, run_analyze, run_remediate},
    cli::Format,
    config::{AnalysisConfig, Config}
};
use tempfile::{NamedTempFile, TempDir};

fn batch_file(code: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let units = serde_json::json!([{
        "pgm_name": "ZREP",
        "inc_name": "ZREP",
        "type": "PROG",
        "code": code
    }]);
    write!(file, "{}", units).unwrap();
    file
}

fn path(file: &NamedTempFile) -> String {
    file.path().to_str().unwrap().to_string()
}

fn analyze_params(inputs: Vec<String>, format: Format) -> AnalyzeParams {
    AnalyzeParams {
        inputs,
        output_format: Some(format),
        verbose: false,
        no_color: true
    }
}

#[test]
fn test_analyze_exit_code_with_findings() {
    let file = batch_file("SELECT * FROM spfli INTO wa. WRITE wa-carrid.");
    let output = run_analyze(analyze_params(vec![path(&file)], Format::Text), Config::default())
        .unwrap();

    assert_eq!(output.exit_code, 1);
    assert_eq!(output.stdout.len(), 1);
    assert!(output.stdout[0].contains("[REMEDIABLE]"));
}

#[test]
fn test_analyze_exit_code_clean() {
    let file = batch_file("SELECT carrid FROM spfli INTO wa.");
    let output = run_analyze(analyze_params(vec![path(&file)], Format::Json), Config::default())
        .unwrap();
    assert_eq!(output.exit_code, 0);
}

#[test]
fn test_batches_are_independent() {
    let producer = batch_file("SELECT * FROM mara INTO TABLE lt.");
    let consumer = batch_file("LOOP AT lt INTO ls. WRITE ls-matnr. ENDLOOP.");
    let output = run_analyze(
        analyze_params(vec![path(&producer), path(&consumer)], Format::Json),
        Config::default()
    )
    .unwrap();

    assert_eq!(output.stdout.len(), 2);
    let first: serde_json::Value = serde_json::from_str(&output.stdout[0]).unwrap();
    assert_eq!(first[0]["selects"][0]["status"], "insufficient_evidence");
}

#[test]
fn test_analyze_respects_ignored_tables() {
    let file = batch_file("SELECT * FROM t000 INTO wa. WRITE wa-mandt.");
    let config = Config {
        analysis: AnalysisConfig {
            ignored_tables: vec!["t000".to_string()]
        },
        ..Default::default()
    };
    let output = run_analyze(analyze_params(vec![path(&file)], Format::Text), config).unwrap();
    assert_eq!(output.exit_code, 0);
}

#[test]
fn test_analyze_missing_file() {
    let result = run_analyze(
        analyze_params(vec!["/nonexistent/units.json".to_string()], Format::Text),
        Config::default()
    );
    assert!(result.is_err());
}

#[test]
fn test_analyze_malformed_batch() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{ not a batch").unwrap();
    let result = run_analyze(analyze_params(vec![path(&file)], Format::Text), Config::default());
    assert!(result.is_err());
}

#[test]
fn test_remediate_to_stdout() {
    let file = batch_file("SELECT * FROM spfli INTO wa. WRITE wa-carrid.");
    let params = RemediateParams {
        inputs:        vec![path(&file)],
        output_format: Some(Format::Json),
        output:        None,
        verbose:       false,
        no_color:      true
    };
    let output = run_remediate(params, Config::default()).unwrap();

    assert_eq!(output.exit_code, 0);
    let value: serde_json::Value = serde_json::from_str(&output.stdout[0]).unwrap();
    assert_eq!(
        value[0]["remediated_code"],
        "SELECT carrid FROM spfli INTO CORRESPONDING FIELDS OF wa. WRITE wa-carrid."
    );
}

#[test]
fn test_remediate_to_file() {
    let file = batch_file("SELECT * FROM spfli INTO wa. WRITE wa-carrid.");
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("remediated.json");
    let params = RemediateParams {
        inputs:        vec![path(&file)],
        output_format: Some(Format::Json),
        output:        Some(out_path.to_str().unwrap().to_string()),
        verbose:       false,
        no_color:      false
    };
    let output = run_remediate(params, Config::default()).unwrap();

    assert!(output.stdout[0].contains("remediated.json"));
    let written = fs::read_to_string(&out_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value[0]["pgm_name"], "ZREP");
}

#[test]
fn test_load_batches_preserves_order() {
    let a = batch_file("CLEAR a.");
    let b = batch_file("CLEAR b.");
    let batches = load_batches(&[path(&a), path(&b)]).unwrap();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0][0].code(), "CLEAR a.");
    assert_eq!(batches[1][0].code(), "CLEAR b.");
}

#[test]
fn test_load_batches_rejects_repeated_stdin() {
    let file = batch_file("CLEAR a.");
    let result = load_batches(&["-".to_string(), path(&file), "-".to_string()]);
    assert!(result.is_err());
}
