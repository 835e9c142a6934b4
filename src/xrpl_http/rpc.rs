use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::error::{Error, Result};

/// A JSON-RPC method: its name and the shape of its `result`.
pub trait RpcRequest: Serialize {
    const METHOD: &'static str;

    type Response: DeserializeOwned;
}

/// Wraps a request in the `{"method", "params": [..]}` body rippled expects.
pub fn envelope<R: RpcRequest>(request: &R) -> Result<Value> {
    let params = serde_json::to_value(request)?;
    Ok(json!({
        "method": R::METHOD,
        "params": [params],
    }))
}

/// Pulls `result` out of a response body, turning rippled error objects into
/// [`Error::Rpc`].
pub fn decode_result<R: RpcRequest>(body: Value) -> Result<R::Response> {
    let Value::Object(mut body) = body else {
        return Err(Error::InvalidResponse("response body is not an object".into()));
    };

    let result = body
        .remove("result")
        .ok_or_else(|| Error::InvalidResponse("response has no result".into()))?;

    if let Some(err) = rpc_error(&result) {
        return Err(err);
    }

    Ok(serde_json::from_value(result)?)
}

fn rpc_error(result: &Value) -> Option<Error> {
    let status = result.get("status").and_then(Value::as_str);
    let error = result.get("error").and_then(Value::as_str);
    if status != Some("error") && error.is_none() {
        return None;
    }

    Some(Error::Rpc {
        error: error.unwrap_or("unknown").to_string(),
        code: result.get("error_code").and_then(Value::as_i64),
        message: result
            .get("error_message")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Serialize)]
    struct Ping {
        account: &'static str,
    }

    #[derive(Debug, Deserialize)]
    struct Pong {
        status: String,
    }

    impl RpcRequest for Ping {
        const METHOD: &'static str = "ping";
        type Response = Pong;
    }

    #[test]
    fn envelope_shape() {
        let body = envelope(&Ping { account: "rA" }).unwrap();
        assert_eq!(
            body,
            json!({ "method": "ping", "params": [{ "account": "rA" }] })
        );
    }

    #[test]
    fn success_result() {
        let pong = decode_result::<Ping>(json!({ "result": { "status": "success" } })).unwrap();
        assert_eq!(pong.status, "success");
    }

    #[test]
    fn error_result() {
        let body = json!({
            "result": {
                "error": "actNotFound",
                "error_code": 19,
                "error_message": "Account not found.",
                "status": "error"
            }
        });
        match decode_result::<Ping>(body) {
            Err(Error::Rpc { error, code, message }) => {
                assert_eq!(error, "actNotFound");
                assert_eq!(code, Some(19));
                assert_eq!(message.as_deref(), Some("Account not found."));
            }
            other => panic!("expected rpc error, got {other:?}"),
        }
    }

    #[test]
    fn missing_result() {
        assert!(matches!(
            decode_result::<Ping>(json!({ "id": 1 })),
            Err(Error::InvalidResponse(_))
        ));
        assert!(matches!(
            decode_result::<Ping>(json!("nope")),
            Err(Error::InvalidResponse(_))
        ));
    }
}
