//! Submission payload construction.

use serde::Serialize;
use serde_json::Value;

use crate::error::{DocgateError, Result};

/// JSON body sent to the registration service.
///
/// Field order is fixed: `document` first, then `signature`.
#[derive(Debug, Serialize)]
struct SubmissionPayload<'a> {
    document: &'a Value,
    signature: &'a str,
}

/// Build the JSON body for one submission.
pub fn build_payload(document: &Value, signature: &str) -> Result<Vec<u8>> {
    validate(document, signature)?;
    serde_json::to_vec(&SubmissionPayload {
        document,
        signature,
    })
    .map_err(DocgateError::Serialization)
}

/// Reject null documents and empty signatures before any slot is claimed
/// or byte is sent.
pub(crate) fn validate(document: &Value, signature: &str) -> Result<()> {
    if document.is_null() {
        return Err(DocgateError::InvalidArgument(
            "document cannot be null".to_string(),
        ));
    }
    if signature.is_empty() {
        return Err(DocgateError::InvalidArgument(
            "signature cannot be empty".to_string(),
        ));
    }
    Ok(())
}
