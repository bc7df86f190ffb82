//! Compilation units as exchanged with callers.
//!
//! A unit is a named chunk of ABAP source (a report, include, method or
//! function module body). The engine only reads [`Unit::code`]; every
//! other field is echoed back unchanged.
//!
//! # Batch Format
//!
//! ```json
//! [
//!   {
//!     "pgm_name": "ZREPORT",
//!     "inc_name": "ZREPORT_F01",
//!     "type": "PROG",
//!     "name": null,
//!     "class_implementation": null,
//!     "start_line": 1,
//!     "end_line": 40,
//!     "code": "SELECT * FROM mara INTO TABLE lt_mara. ..."
//!   }
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AppResult, batch_parse_error};

/// One compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub pgm_name:             String,
    pub inc_name:             String,
    /// Kind tag (`PROG`, `CLAS`, `FUGR`, ...)
    #[serde(rename = "type")]
    pub kind:                 String,
    #[serde(default)]
    pub name:                 Option<String>,
    #[serde(default)]
    pub class_implementation: Option<String>,
    #[serde(default)]
    pub start_line:           Option<u32>,
    #[serde(default)]
    pub end_line:             Option<u32>,
    /// Source text; absent or null means empty
    #[serde(default)]
    pub code:                 Option<String>
}

impl Unit {
    /// Create a unit with only the identifying fields and source text set.
    pub fn new(pgm_name: &str, inc_name: &str, code: &str) -> Self {
        Self {
            pgm_name: pgm_name.to_string(),
            inc_name: inc_name.to_string(),
            kind: String::from("PROG"),
            code: Some(code.to_string()),
            ..Default::default()
        }
    }

    /// Source text, empty when absent.
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or("")
    }
}

/// Concatenate all unit texts, each followed by a newline.
pub fn concat_units(units: &[Unit]) -> String {
    let capacity = units.iter().map(|u| u.code().len() + 1).sum();
    let mut corpus = String::with_capacity(capacity);
    for unit in units {
        corpus.push_str(unit.code());
        corpus.push('\n');
    }
    corpus
}

/// Parse a JSON array of units.
///
/// `source` names the input in error messages.
pub fn parse_batch(json: &str, source: &str) -> AppResult<Vec<Unit>> {
    serde_json::from_str(json).map_err(|e| batch_parse_error(source, e))
}
