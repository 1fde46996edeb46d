//! Shared types for PGR complaint tracking.
//!
//! Request-side types describe what is sent to the PGR search endpoint.
//! Message-side types describe the directive sequence handed to the
//! renderer; their JSON shape is the wire contract with it.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::TrackError;

// =============================================================================
// TrackRequest
// =============================================================================

/// Per-turn input identifying who is asking and for which tenant.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRequest {
    pub tenant_id: String,
    pub auth_token: String,
    /// Opaque user-info blob, passed through to PGR untouched.
    pub user_info: Value,
}

impl TrackRequest {
    /// Build a request, rejecting empty fields.
    ///
    /// A `user_info` that is a JSON string is parsed into the structured
    /// value it encodes, since chat params carry it serialized.
    pub fn new(
        tenant_id: impl Into<String>,
        auth_token: impl Into<String>,
        user_info: Value,
    ) -> Result<Self, TrackError> {
        let tenant_id = tenant_id.into();
        let auth_token = auth_token.into();

        if tenant_id.trim().is_empty() {
            return Err(TrackError::InvalidRequest(
                "tenantId must not be empty".to_string(),
            ));
        }
        if auth_token.trim().is_empty() {
            return Err(TrackError::InvalidRequest(
                "authToken must not be empty".to_string(),
            ));
        }

        let user_info = match user_info {
            Value::String(raw) => {
                if raw.trim().is_empty() {
                    return Err(TrackError::InvalidRequest(
                        "userInfo must not be empty".to_string(),
                    ));
                }
                serde_json::from_str(&raw).map_err(|e| {
                    TrackError::InvalidRequest(format!("userInfo is not valid JSON: {}", e))
                })?
            }
            other => other,
        };

        let is_empty = match &user_info {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if is_empty {
            return Err(TrackError::InvalidRequest(
                "userInfo must not be empty".to_string(),
            ));
        }

        Ok(Self {
            tenant_id,
            auth_token,
            user_info,
        })
    }

    /// Build a request from a chat-params object with the keys `tenantId`,
    /// `authToken` and `userInfo`.
    pub fn from_params(params: &Value) -> Result<Self, TrackError> {
        let text_param = |key: &str| -> Result<String, TrackError> {
            params
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| TrackError::InvalidRequest(format!("missing param: {}", key)))
        };

        let user_info = params
            .get("userInfo")
            .cloned()
            .ok_or_else(|| TrackError::InvalidRequest("missing param: userInfo".to_string()))?;

        Self::new(text_param("tenantId")?, text_param("authToken")?, user_info)
    }
}

// =============================================================================
// SearchQuery
// =============================================================================

/// Auth context forwarded to PGR as the `RequestInfo` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestInfo {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    #[serde(rename = "userInfo")]
    pub user_info: Value,
}

/// A fully built PGR search. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    tenant_id: String,
    request_info: RequestInfo,
    max_records: u32,
}

impl SearchQuery {
    /// Build the search for a validated request, capped at `max_records`.
    pub fn new(request: &TrackRequest, max_records: u32) -> Self {
        Self {
            tenant_id: request.tenant_id.clone(),
            request_info: RequestInfo {
                auth_token: request.auth_token.clone(),
                user_info: request.user_info.clone(),
            },
            max_records,
        }
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn request_info(&self) -> &RequestInfo {
        &self.request_info
    }

    pub fn max_records(&self) -> u32 {
        self.max_records
    }

    /// Query-string parameters appended to the search URL.
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("tenantId", self.tenant_id.clone()),
            ("noOfRecords", self.max_records.to_string()),
        ]
    }

    /// JSON body of the search call: `{"RequestInfo": {...}}`.
    pub fn body(&self) -> Value {
        serde_json::json!({ "RequestInfo": &self.request_info })
    }
}

/// Raw outcome of a search call: HTTP status plus the unparsed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub status: u16,
    pub body: String,
}

impl SearchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// ComplaintRecord
// =============================================================================

/// One complaint from the PGR search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintRecord {
    pub request_id: String,
    pub category_code: String,
    pub created_at_epoch_millis: i64,
    pub status: String,
}

// =============================================================================
// MessageDirective
// =============================================================================

/// One unit of the output sequence handed to the renderer.
///
/// Serialized untagged so the wire shapes are `{"value": ..}`,
/// `{"code": ..}` and `{"templateId": .., "params": {..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessageDirective {
    /// Named template with named slots.
    Template {
        #[serde(rename = "templateId")]
        template_id: String,
        params: BTreeMap<String, SlotValue>,
    },
    /// Localization catalog key, resolved by the renderer.
    CodeRef { code: String },
    /// Fixed text fragment.
    Literal { value: String },
}

impl MessageDirective {
    pub fn literal(value: impl Into<String>) -> Self {
        MessageDirective::Literal {
            value: value.into(),
        }
    }

    pub fn code(code: impl Into<String>) -> Self {
        MessageDirective::CodeRef { code: code.into() }
    }

    pub fn template(template_id: impl Into<String>, params: BTreeMap<String, SlotValue>) -> Self {
        MessageDirective::Template {
            template_id: template_id.into(),
            params,
        }
    }
}

/// Value bound to a template slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SlotValue {
    /// Output of the numeral localizer for a digit-bearing string.
    Numeral(Vec<MessageDirective>),
    /// A single literal or code reference.
    Directive(MessageDirective),
}

// =============================================================================
// TrackMessage
// =============================================================================

/// Message kind understood by the renderer. Tracking only produces text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
}

/// Content of a tracking message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessageBody {
    /// Plain text, used when there is nothing to list.
    Text { text: String },
    /// Ordered directives for the renderer.
    Localized {
        #[serde(rename = "localizationCodes")]
        localization_codes: Vec<MessageDirective>,
    },
}

/// The message produced by one tracking turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(flatten)]
    pub body: MessageBody,
}

impl TrackMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Text,
            body: MessageBody::Text { text: text.into() },
        }
    }

    pub fn localized(localization_codes: Vec<MessageDirective>) -> Self {
        Self {
            message_type: MessageType::Text,
            body: MessageBody::Localized { localization_codes },
        }
    }

    /// Directive sequence, if this is a localized message.
    pub fn directives(&self) -> Option<&[MessageDirective]> {
        match &self.body {
            MessageBody::Localized { localization_codes } => Some(localization_codes),
            MessageBody::Text { .. } => None,
        }
    }

    /// Plain text, if this is a text-only message.
    pub fn plain_text(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Text { text } => Some(text),
            MessageBody::Localized { .. } => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
