use std::io;

use salesdash_client::{ClientError, FailureEnvelope, SuccessEnvelope};
use serde::Serialize;
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "dash" | "demo" | "filters" => versioned(&success.data),
        _ => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{}`",
                success.command
            )));
        }
    };

    serialize_json_pretty(&value)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&FailureEnvelope::from(error))
}

fn versioned(data: &Value) -> Value {
    json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": data.clone()
    })
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use salesdash_client::{ClientError, SuccessEnvelope};
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    fn success(command: &str, data: Value) -> SuccessEnvelope {
        SuccessEnvelope {
            command: command.to_string(),
            data,
        }
    }

    #[test]
    fn dashboard_json_uses_versioned_envelope() {
        let payload = success(
            "dash",
            json!({
                "filtered_records": 2,
                "totals": { "revenue": 150.0 }
            }),
        );

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(true));
                assert_eq!(value["version"], Value::String("v1".to_string()));
                assert_eq!(value["data"]["filtered_records"], json!(2));
            }
        }
    }

    #[test]
    fn runtime_error_json_uses_universal_shape() {
        let error = ClientError::new(
            "data_load_error",
            "bad row",
            vec!["fix the row".to_string()],
        );
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(
                    value["error"]["code"],
                    Value::String("data_load_error".to_string())
                );
                assert_eq!(value["error"]["recovery_steps"], json!(["fix the row"]));
                assert!(value.get("ok").is_none());
            }
        }
    }

    #[test]
    fn unknown_command_is_rejected() {
        let rendered = render_success_json(&success("explore", json!({})));
        assert!(rendered.is_err());
    }
}
