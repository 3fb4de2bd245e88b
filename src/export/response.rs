//! Interpretation of the export endpoint's answer.

use serde_json::Value;

use super::disposition::export_filename;
use crate::error::{Result, TableError};

/// What the browser received from the export endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub status: u16,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl ExportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A spreadsheet ready to be handed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Turn a response into a downloadable file, or an error carrying the
/// server's `message` (or a generic status message).
pub fn interpret_response(response: ExportResponse, default_filename: &str) -> Result<ExportFile> {
    if !response.is_success() {
        return Err(TableError::Http {
            status: response.status,
            message: error_message(response.status, &response.body),
        });
    }

    let filename = export_filename(response.content_disposition.as_deref(), default_filename);
    Ok(ExportFile {
        filename,
        bytes: response.body,
    })
}

fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map_or_else(|| format!("HTTP error {status}"), str::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn failed(status: u16, body: &str) -> ExportResponse {
        ExportResponse {
            status,
            content_disposition: None,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_server_message_surfaces() {
        let err = interpret_response(
            failed(400, r#"{"success":false,"message":"No data to export"}"#),
            "x.xlsx",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "No data to export");
    }

    #[test]
    fn test_generic_message_without_body() {
        for body in ["", "<html>oops</html>", r#"{"message":""}"#, r#"{"error":1}"#] {
            let err = interpret_response(failed(502, body), "x.xlsx").unwrap_err();
            match err {
                TableError::Http { status, message } => {
                    assert_eq!(status, 502);
                    assert_eq!(message, "HTTP error 502");
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_success_keeps_bytes() {
        let file = interpret_response(
            ExportResponse {
                status: 200,
                content_disposition: Some("attachment; filename=out.xlsx".into()),
                body: vec![0x50, 0x4b, 0x03, 0x04],
            },
            "x.xlsx",
        )
        .unwrap();
        assert_eq!(file.filename, "out.xlsx");
        assert_eq!(file.bytes, vec![0x50, 0x4b, 0x03, 0x04]);
    }
}
