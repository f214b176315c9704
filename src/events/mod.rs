//! Skill request and response envelopes
//!
//! Wire shapes exchanged with the voice platform. Inbound envelopes are
//! decoded into an [`InboundEvent`]; outbound envelopes wrap a finalized
//! [`Response`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{SkillError, SkillResult};
use crate::value_objects::{DeviceCapabilities, InboundEvent, RequestKind, Response};

/// Response format version sent back to the platform
pub const RESPONSE_VERSION: &str = "1.0";

/// Inbound request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Context,
    pub request: Request,
}

/// Session block of the request; only the id is read, for log correlation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Device and visual state at request time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    #[serde(rename = "System", default)]
    pub system: SystemState,
    #[serde(
        rename = "Alexa.Presentation.APL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub apl: Option<AplVisualContext>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemState {
    #[serde(default)]
    pub device: Device,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Keys are interface names; values carry per-interface details
    #[serde(default)]
    pub supported_interfaces: Map<String, Value>,
}

/// Visual context reported by an APL device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AplVisualContext {
    #[serde(default)]
    pub token: Option<String>,
}

/// The request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: Option<String>,
    /// Kept raw; see [`Request::issued_at`]
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
    /// Source of a UserEvent; a free-form object with an `id` key
    #[serde(default)]
    pub source: Option<Map<String, Value>>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
}

impl Request {
    /// Issue time, when the timestamp is valid RFC 3339
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|t| t.with_timezone(&Utc))
    }
}

impl RequestEnvelope {
    /// Decode an envelope from a raw JSON payload
    pub fn from_value(payload: Value) -> SkillResult<Self> {
        serde_json::from_value(payload).map_err(|e| SkillError::InvalidEnvelope(e.to_string()))
    }

    /// Routing subject used in logs, e.g. `skill.intent.HelloWorldIntent`
    pub fn subject(&self) -> String {
        match &self.request.intent {
            Some(intent) => format!("skill.intent.{}", intent.name),
            None => format!("skill.request.{}", self.request.request_type),
        }
    }

    /// Session id, if the platform sent one
    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.session_id.as_deref())
    }

    /// Decode into the domain event handlers work with.
    ///
    /// An intent request without an intent still decodes; handlers needing
    /// the name fail inside dispatch and the exception chain answers.
    pub fn into_inbound_event(self) -> InboundEvent {
        let kind = RequestKind::from_type(&self.request.request_type);
        let timestamp = self.request.issued_at();
        let intent_name = self.request.intent.map(|intent| intent.name);

        let event_source_id = self
            .request
            .source
            .as_ref()
            .and_then(|source| source.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let capabilities = self
            .context
            .system
            .device
            .supported_interfaces
            .keys()
            .fold(DeviceCapabilities::none(), |caps, name| {
                caps.with_interface(name.clone())
            });

        InboundEvent {
            request_id: self.request.request_id,
            timestamp,
            locale: self.request.locale,
            kind,
            intent_name,
            event_source_id,
            capabilities,
            active_visual_context: self.context.apl.and_then(|apl| apl.token),
            session_end_reason: self.request.reason,
        }
    }
}

/// Outbound response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default)]
    pub session_attributes: Map<String, Value>,
    pub response: Response,
}

impl ResponseEnvelope {
    pub fn new(response: Response) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            session_attributes: Map::new(),
            response,
        }
    }

    pub fn to_value(&self) -> SkillResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_intent_request_on_screen_device() {
        let envelope = RequestEnvelope::from_value(json!({
            "version": "1.0",
            "session": { "new": false, "sessionId": "amzn1.echo-api.session.1" },
            "context": {
                "System": {
                    "device": {
                        "deviceId": "device-1",
                        "supportedInterfaces": {
                            "Alexa.Presentation.APL": { "runtime": { "maxVersion": "1.1" } }
                        }
                    }
                },
                "Alexa.Presentation.APL": { "token": "helloworldWithButtonToken" }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.1",
                "timestamp": "2019-03-01T18:05:20Z",
                "locale": "en-US",
                "intent": { "name": "AMAZON.StartOverIntent", "confirmationStatus": "NONE" }
            }
        }))
        .unwrap();

        assert_eq!(envelope.session_id(), Some("amzn1.echo-api.session.1"));
        assert_eq!(envelope.subject(), "skill.intent.AMAZON.StartOverIntent");

        let event = envelope.into_inbound_event();
        assert_eq!(event.kind, RequestKind::IntentRequest);
        assert_eq!(event.intent_name.as_deref(), Some("AMAZON.StartOverIntent"));
        assert!(event.capabilities.has_screen());
        assert_eq!(
            event.active_visual_context.as_deref(),
            Some("helloworldWithButtonToken")
        );
        assert_eq!(event.locale.as_deref(), Some("en-US"));
        assert!(event.timestamp.is_some());
    }

    #[test]
    fn test_decode_user_event_source() {
        let event = RequestEnvelope::from_value(json!({
            "request": {
                "type": "Alexa.Presentation.APL.UserEvent",
                "source": {
                    "type": "TouchWrapper",
                    "handler": "Press",
                    "id": "fadeHelloTextButton"
                },
                "arguments": []
            }
        }))
        .unwrap()
        .into_inbound_event();

        assert_eq!(event.kind, RequestKind::UserInteractionEvent);
        assert_eq!(event.event_source_id.as_deref(), Some("fadeHelloTextButton"));
        assert!(!event.capabilities.has_screen());
    }

    #[test]
    fn test_intent_request_without_intent_decodes() {
        let event = RequestEnvelope::from_value(json!({
            "request": { "type": "IntentRequest" }
        }))
        .unwrap()
        .into_inbound_event();

        assert_eq!(event.kind, RequestKind::IntentRequest);
        assert_eq!(event.intent_name, None);
    }

    #[test]
    fn test_null_session_attributes_are_ignored() {
        let envelope = RequestEnvelope::from_value(json!({
            "session": { "new": true, "sessionId": "s1", "attributes": null },
            "request": { "type": "IntentRequest", "intent": { "name": "AMAZON.StopIntent" } }
        }))
        .unwrap();

        assert_eq!(envelope.session_id(), Some("s1"));
        let event = envelope.into_inbound_event();
        assert_eq!(event.intent_name.as_deref(), Some("AMAZON.StopIntent"));
    }

    #[test]
    fn test_non_rfc3339_timestamp_is_dropped() {
        let event = RequestEnvelope::from_value(json!({
            "request": {
                "type": "LaunchRequest",
                "timestamp": "2019-03-01 18:05:20"
            }
        }))
        .unwrap()
        .into_inbound_event();

        assert_eq!(event.kind, RequestKind::LaunchRequest);
        assert_eq!(event.timestamp, None);
    }

    #[test]
    fn test_missing_request_is_invalid_envelope() {
        let result = RequestEnvelope::from_value(json!({ "version": "1.0" }));
        assert!(matches!(result, Err(SkillError::InvalidEnvelope(_))));
    }

    #[test]
    fn test_response_envelope_shape() {
        let envelope = ResponseEnvelope::new(Response::default());
        assert_eq!(
            envelope.to_value().unwrap(),
            json!({ "version": "1.0", "sessionAttributes": {}, "response": {} })
        );
    }
}
