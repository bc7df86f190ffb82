use select_star_analyzer::{
    error::{config_error, file_read_error, file_write_error, input_error, serialize_error},
    unit::parse_batch
};

#[test]
fn test_file_read_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("/path/to/units.json", io_error);
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_file_write_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error = file_write_error("/readonly/out.json", io_error);
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_config_error() {
    let error = config_error("Invalid config file: expected a table");
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_input_error() {
    let error = input_error("Standard input ('-') can only be given once");
    assert!(error.message.as_deref().is_some_and(|m| m.contains("once")));
}

#[test]
fn test_serialize_error() {
    let error = serialize_error("YAML", "unsupported value");
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_batch_parse_error_malformed() {
    let result = parse_batch("[{\"pgm_name\": ", "units.json");
    assert!(result.is_err());
}

#[test]
fn test_batch_parse_error_wrong_shape() {
    assert!(parse_batch("{\"pgm_name\": \"Z\"}", "units.json").is_err());
    assert!(parse_batch("[{\"pgm_name\": \"Z\"}]", "units.json").is_err());
}

#[test]
fn test_batch_parse_ok() {
    let units = parse_batch(
        r#"[{"pgm_name":"Z","inc_name":"Z","type":"PROG","code":"CLEAR x."}]"#,
        "units.json"
    )
    .unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].code(), "CLEAR x.");
}
