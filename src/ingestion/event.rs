use serde::{Deserialize, Serialize};
use serde_json::json;

/// An incoming HTTP-shaped event
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The raw JSON request body, if any
    #[serde(default)]
    pub body: Option<String>,
}

impl Event {
    /// Wrap a JSON value as an event body
    pub fn with_json(body: &serde_json::Value) -> Self {
        Self {
            body: Some(body.to_string()),
        }
    }
}

/// The comment payload expected in an event body
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CommentBody {
    /// The user comment; anything other than a string counts as missing
    #[serde(default, deserialize_with = "string_or_none")]
    pub comment: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// An HTTP-shaped response with a JSON string body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code
    pub status_code: u16,

    /// JSON-encoded response body
    pub body: String,
}

impl Response {
    /// A response carrying a serialized value
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self {
        let body = serde_json::to_string(body)
            .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string());

        Self { status_code, body }
    }

    /// A response carrying `{"error": message}`
    pub fn error(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: json!({ "error": message }).to_string(),
        }
    }

    /// Decode the body back into JSON
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_event_without_body() {
        let event: Event = serde_json::from_str(r#"{"headers": {}}"#).unwrap();

        assert_eq!(event.body, None);
    }

    #[test]
    fn test_comment_must_be_a_string() {
        let body: CommentBody = serde_json::from_str(r#"{"comment": 42}"#).unwrap();
        assert_eq!(body.comment, None);

        let body: CommentBody = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(body.comment, None);

        let body: CommentBody = serde_json::from_str(r#"{"comment": "hi"}"#).unwrap();
        assert_eq!(body.comment.as_deref(), Some("hi"));
    }

    #[test]
    fn test_response_wire_format() {
        let response = Response::error(400, "nope");

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "statusCode": 400, "body": "{\"error\":\"nope\"}" })
        );
    }
}
