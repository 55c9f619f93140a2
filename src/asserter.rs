use core::fmt;

use reqwest::StatusCode;
use serde_json::Value;

use crate::runner::CapturedResponse;
use crate::scenario::Marker;

/// How a step missed its success marker. Every kind aborts the run the same
/// way; the distinction only shapes the report.
#[derive(Debug, Clone)]
pub enum FailureKind {
    Transport(String),
    HttpStatus(StatusCode),
    NotJson,
    MarkerMissing {
        field: &'static str,
        expected: &'static str,
        found: Option<String>,
    },
}

/// Structural success check: the response must be 2xx, parse as JSON, and
/// carry the marker field with exactly the expected value at the top level.
/// A matching fragment nested deeper in the body does not count.
pub fn check(marker: &Marker, resp: &CapturedResponse) -> Result<Value, FailureKind> {
    if !resp.status.is_success() {
        return Err(FailureKind::HttpStatus(resp.status));
    }

    let Some(body) = &resp.body_json else {
        return Err(FailureKind::NotJson);
    };

    match body.get(marker.field) {
        Some(Value::String(s)) if s == marker.value => Ok(body.clone()),
        found => Err(FailureKind::MarkerMissing {
            field: marker.field,
            expected: marker.value,
            found: found.map(|v| v.to_string()),
        }),
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport(err) => {
                write!(
                    f,
                    "{} {}",
                    console::style("Request failed with error:").red(),
                    console::style(err).red().bold()
                )
            }

            FailureKind::HttpStatus(status) => {
                write!(
                    f,
                    "Expected: {}\n  Actual:   {}",
                    console::style("a 2xx status").green(),
                    console::style(format!("{status}")).red()
                )
            }

            FailureKind::NotJson => {
                write!(f, "{}", console::style("Response body is not JSON").red())
            }

            FailureKind::MarkerMissing {
                field,
                expected,
                found,
            } => {
                let expected = console::style(format!("{field} = \"{expected}\"")).green();
                match found {
                    Some(found) => write!(
                        f,
                        "Expected: {}\n  Actual:   {}",
                        expected,
                        console::style(format!("{field} = {found}")).red()
                    ),
                    None => write!(
                        f,
                        "Expected: {}\n  Actual:   {}",
                        expected,
                        console::style(format!("no `{field}` field")).red()
                    ),
                }
            }
        }
    }
}
