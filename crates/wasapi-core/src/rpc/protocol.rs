use serde_json::Value;

use crate::config::Config;
use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'a str,
    pub id: &'a str,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Build the request envelope for `method`.
///
/// `params` is dropped from the envelope entirely when it is empty: `null`,
/// `[]`, `{}`, `false`, `0` or `""`.
pub fn build_envelope<'a>(config: &'a Config, method: &'a str, params: Value) -> JsonRpcRequest<'a> {
    JsonRpcRequest {
        jsonrpc: config.json_rpc(),
        id: config.id(),
        method,
        params: (!is_empty_params(&params)).then_some(params),
    }
}

fn is_empty_params(params: &Value) -> bool {
    match params {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// A decoded daemon reply body.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct JsonRpcReply {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl JsonRpcReply {
    pub fn from_value(body: Value) -> Result<Self, CoreError> {
        serde_json::from_value(body)
            .map_err(|e| CoreError::InvalidResponse(format!("decode JSON-RPC reply: {e}")))
    }

    /// The `result` member, or the `error` member as a [`CoreError`].
    pub fn into_result(self) -> Result<Value, CoreError> {
        if let Some(err) = self.error {
            return Err(parse_jsonrpc_error(err));
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// `{"code": <int>, "message": <string>}` becomes `Daemon`; any other shape
/// falls back to `InvalidResponse` with the raw JSON.
fn parse_jsonrpc_error(err: Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => CoreError::Daemon {
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => CoreError::InvalidResponse(format!("non-standard JSON-RPC error: {err}")),
    }
}
