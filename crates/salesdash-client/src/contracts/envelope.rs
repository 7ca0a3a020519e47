use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Command name plus its serialized payload. Renderers pick a layout by
/// `command`; the payload shape is owned by `contracts::types`.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub command: String,
    pub data: Value,
}

/// Machine-readable failure, serialized as `{ "error": { ... } }`.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

pub fn success(command: &str, payload: impl Serialize) -> ClientResult<SuccessEnvelope> {
    let data = serde_json::to_value(payload).map_err(|err| {
        ClientError::internal_serialization(&format!("could not serialize `{command}` output: {err}"))
    })?;
    Ok(SuccessEnvelope {
        command: command.to_string(),
        data,
    })
}

impl From<&ClientError> for FailureEnvelope {
    fn from(error: &ClientError) -> Self {
        Self {
            error: ErrorDetail {
                code: error.code.clone(),
                message: error.message.clone(),
                recovery_steps: error.recovery_steps.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FailureEnvelope, success};
    use crate::ClientError;

    #[test]
    fn success_wraps_serialized_payload() {
        let envelope = success("filters", json!({ "years": [2015, 2016] }));
        assert!(envelope.is_ok());
        if let Ok(envelope) = envelope {
            assert_eq!(envelope.command, "filters");
            assert_eq!(envelope.data["years"], json!([2015, 2016]));
        }
    }

    #[test]
    fn failure_serializes_under_a_single_error_key() {
        let error = ClientError::data_load_error("sales.csv", "missing required columns: Year");
        let failure = FailureEnvelope::from(&error);
        let value = serde_json::to_value(&failure);
        assert!(value.is_ok());
        if let Ok(value) = value {
            assert_eq!(value["error"]["code"], "data_load_error");
            assert_eq!(value["error"]["recovery_steps"].as_array().map(Vec::len), Some(3));
            assert_eq!(value.as_object().map(|object| object.len()), Some(1));
        }
    }
}
