//! Remote story repository for the hosted document backend.
//!
//! Calls the backend's HTTP function API: `POST <url>/api/query` and
//! `POST <url>/api/mutation` with `{"path", "args", "format": "json"}`. The
//! reply is `{"status": "success", "value": ...}` or
//! `{"status": "error", "errorMessage": ...}`.

use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use crate::repository::StoryRepositoryTrait;
use crate::types::errors::StoryError;
use crate::types::story::{Story, StoryMetadata};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Message the backend's mutations raise for an unknown id.
const NOT_FOUND_MESSAGE: &str = "Story not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Query,
    Mutation,
}

impl CallKind {
    fn endpoint(&self) -> &'static str {
        match self {
            CallKind::Query => "query",
            CallKind::Mutation => "mutation",
        }
    }
}

/// Builds the JSON body of a function call.
pub fn request_body(path: &str, args: Value) -> Value {
    json!({ "path": path, "args": args, "format": "json" })
}

/// Unwraps a function call reply into its value.
pub fn parse_reply(reply: Value) -> Result<Value, StoryError> {
    match reply.get("status").and_then(Value::as_str) {
        Some("success") => Ok(reply.get("value").cloned().unwrap_or(Value::Null)),
        Some("error") => {
            let message = reply
                .get("errorMessage")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            Err(StoryError::RemoteError(message.to_string()))
        }
        _ => Err(StoryError::RemoteError(format!(
            "Unexpected reply: {}",
            reply
        ))),
    }
}

/// Decodes a value that is either `null` or a story document.
pub fn decode_optional_story(value: Value) -> Result<Option<Story>, StoryError> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| StoryError::RemoteError(format!("Malformed story document: {}", e)))
}

/// Story repository backed by the hosted document backend.
pub struct RemoteStoryRepository {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RemoteStoryRepository {
    pub fn new(base_url: &str) -> Result<Self, StoryError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoryError::RemoteError(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn call(&self, kind: CallKind, path: &str, args: Value) -> Result<Value, StoryError> {
        let url = format!("{}/api/{}", self.base_url, kind.endpoint());
        debug!(%url, path, "Remote story call");
        let reply: Value = self
            .client
            .post(&url)
            .json(&request_body(path, args))
            .send()
            .and_then(|r| r.json())
            .map_err(|e| StoryError::RemoteError(format!("{} failed: {}", path, e)))?;
        parse_reply(reply)
    }
}

impl StoryRepositoryTrait for RemoteStoryRepository {
    fn list_metadata(&self) -> Result<Vec<StoryMetadata>, StoryError> {
        let value = self.call(CallKind::Query, "stories:listMetadata", json!({}))?;
        serde_json::from_value(value)
            .map_err(|e| StoryError::RemoteError(format!("Malformed story list: {}", e)))
    }

    fn list_stories(&self) -> Result<Vec<Story>, StoryError> {
        let value = self.call(CallKind::Query, "stories:list", json!({}))?;
        serde_json::from_value(value)
            .map_err(|e| StoryError::RemoteError(format!("Malformed story list: {}", e)))
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Story>, StoryError> {
        decode_optional_story(self.call(CallKind::Query, "stories:get", json!({ "id": id }))?)
    }

    fn get_by_number(&self, number: i64) -> Result<Option<Story>, StoryError> {
        decode_optional_story(self.call(
            CallKind::Query,
            "stories:getByNumber",
            json!({ "number": number }),
        )?)
    }

    fn set_read_flag(&mut self, id: &str, value: bool) -> Result<(), StoryError> {
        let path = if value {
            "stories:markAsRead"
        } else {
            "stories:markAsUnread"
        };
        match self.call(CallKind::Mutation, path, json!({ "id": id })) {
            Ok(_) => Ok(()),
            Err(StoryError::RemoteError(message)) if message.contains(NOT_FOUND_MESSAGE) => {
                Err(StoryError::NotFound(id.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    fn backend_name(&self) -> &'static str {
        "remote"
    }
}
