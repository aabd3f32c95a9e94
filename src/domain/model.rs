use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of a GraphQL-over-HTTP POST.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GraphqlOutcome {
    Success(serde_json::Value),
    Failed { status: u16 },
}

/// Payload created by the REST POST. Sent form-encoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPost {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub title: String,
    pub body: String,
}

impl Default for NewPost {
    fn default() -> Self {
        Self {
            user_id: "1".to_string(),
            title: "blah".to_string(),
            body: "Woow".to_string(),
        }
    }
}

impl Validate for NewPost {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("rest.new_post.user_id", &self.user_id)?;
        validate_non_empty_string("rest.new_post.title", &self.title)?;
        validate_non_empty_string("rest.new_post.body", &self.body)?;
        Ok(())
    }
}

/// Status line of an HTTP response, printed the way `requests` shows a response object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSummary {
    pub status: u16,
}

impl fmt::Display for ResponseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Response [{}]>", self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl InboundMessage {
    pub fn payload_text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_request_omits_missing_variables() {
        let request = GraphqlRequest::new("{ ping }");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({"query": "{ ping }"}));
    }

    #[test]
    fn test_new_post_rejects_empty_title() {
        let post = NewPost {
            title: " ".to_string(),
            ..NewPost::default()
        };
        assert!(post.validate().is_err());
        assert!(NewPost::default().validate().is_ok());
    }

    #[test]
    fn test_response_summary_display() {
        assert_eq!(ResponseSummary { status: 201 }.to_string(), "<Response [201]>");
    }

    #[test]
    fn test_payload_text_replaces_invalid_utf8() {
        let message = InboundMessage {
            topic: "t".to_string(),
            payload: vec![b'o', b'k', 0xff],
        };
        assert_eq!(message.payload_text(), "ok\u{fffd}");
    }
}
