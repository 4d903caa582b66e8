use anyhow::Context;
use serde::Serialize;

/// A JSON-RPC 2.0 `signatureSubscribe` request.
///
/// Serialization follows field declaration order, so the rendered payload is
/// byte-for-byte stable across runs: `jsonrpc`, `id`, `method`, `params`.
#[derive(Debug, Serialize)]
pub struct SubscribeRequest<'a> {
    jsonrpc: &'static str,
    id: i64,
    method: &'static str,
    params: [&'a str; 1],
}

impl<'a> SubscribeRequest<'a> {
    /// Creates a subscription request for status notifications on `signature`.
    pub fn new(signature: &'a str) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method: "signatureSubscribe",
            params: [signature],
        }
    }

    /// Renders the request to its wire form.
    pub fn render(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("Failed to serialize subscription request")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_is_exact() {
        let rendered = SubscribeRequest::new("sig").render().unwrap();
        assert_eq!(
            rendered,
            r#"{"jsonrpc":"2.0","id":1,"method":"signatureSubscribe","params":["sig"]}"#
        );
    }

    #[test]
    fn wire_format_is_stable_across_renders() {
        let request = SubscribeRequest::new(crate::config::DEFAULT_SIGNATURE);
        assert_eq!(request.render().unwrap(), request.render().unwrap());
    }

    #[test]
    fn signature_is_the_only_param() {
        let rendered = SubscribeRequest::new("4Nd1mY").render().unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["params"], serde_json::json!(["4Nd1mY"]));
        assert_eq!(value["id"], serde_json::json!(1));
        assert_eq!(value["jsonrpc"], serde_json::json!("2.0"));
        assert_eq!(value["method"], serde_json::json!("signatureSubscribe"));
    }
}
