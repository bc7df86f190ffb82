pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create file write error
pub fn file_write_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to write file '{}': {}", path, source))
}

/// Create unit batch parse error with position info
pub fn batch_parse_error(source: &str, err: serde_json::Error) -> AppError {
    AppError::bad_request(format_batch_error(source, &err))
}

/// Create invalid input list error
pub fn input_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create output serialization error
pub fn serialize_error(format: &str, message: impl std::fmt::Display) -> AppError {
    AppError::internal(format!("Failed to encode {} output: {}", format, message))
}

/// Format batch error with position highlighting
fn format_batch_error(source: &str, err: &serde_json::Error) -> String {
    use serde_json::error::Category;

    let kind = match err.classify() {
        Category::Eof => "unexpected end of input",
        Category::Syntax => "malformed JSON",
        Category::Data => "not a unit batch",
        Category::Io => "read failure"
    };
    if err.line() > 0 {
        format!(
            "Invalid unit batch '{}' ({}) at line {}, column {}:\n  {}",
            source,
            kind,
            err.line(),
            err.column(),
            err
        )
    } else {
        format!("Invalid unit batch '{}' ({}):\n  {}", source, kind, err)
    }
}
