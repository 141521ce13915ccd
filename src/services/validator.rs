use axum::http::{header::AUTHORIZATION, HeaderMap};
use serde_json::Value;

use crate::models::vote_record_models::{VoteDraft, VotePayload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Unauthorized,
    InvalidRequest(String),
}

/// Checks the shared secret and the shape of an incoming vote.
#[derive(Debug, Clone, Default)]
pub struct VoteValidator {
    auth: Option<String>,
}

impl VoteValidator {
    pub fn new(auth: Option<String>) -> Self {
        Self { auth }
    }

    pub fn validate(&self, headers: &HeaderMap, body: &[u8]) -> Result<VoteDraft, Rejection> {
        self.authorize(headers)?;

        let body: Value = serde_json::from_slice(body)
            .map_err(|e| Rejection::InvalidRequest(format!("malformed body: {e}")))?;
        if !body.is_object() {
            return Err(invalid("body must be a JSON object"));
        }
        let payload: VotePayload = serde_json::from_value(body)
            .map_err(|e| Rejection::InvalidRequest(format!("malformed body: {e}")))?;

        Ok(VoteDraft {
            bot: required_string(payload.bot, "bot")?,
            user: required_string(payload.user, "user")?,
            kind: required_string(payload.kind, "type")?,
            is_weekend: match payload.is_weekend {
                Some(Value::Bool(flag)) => flag,
                Some(_) => return Err(invalid("isWeekend must be a boolean")),
                None => return Err(invalid("missing isWeekend")),
            },
            query: match payload.query {
                Some(Value::String(query)) if !query.is_empty() => Some(query),
                _ => None,
            },
        })
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Rejection> {
        let Some(secret) = &self.auth else {
            return Ok(());
        };

        match headers.get(AUTHORIZATION) {
            Some(value) if value.as_bytes() == secret.as_bytes() => Ok(()),
            _ => Err(Rejection::Unauthorized),
        }
    }
}

fn required_string(value: Option<Value>, field: &str) -> Result<String, Rejection> {
    match value {
        Some(Value::String(value)) if !value.is_empty() => Ok(value),
        Some(Value::String(_)) => Err(invalid(&format!("empty {field}"))),
        Some(_) => Err(invalid(&format!("{field} must be a string"))),
        None => Err(invalid(&format!("missing {field}"))),
    }
}

fn invalid(reason: &str) -> Rejection {
    Rejection::InvalidRequest(reason.to_string())
}
