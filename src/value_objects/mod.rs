//! Value objects for the Skill domain
//!
//! The inbound side is the decoded request a handler sees; the outbound side
//! is the response a handler produces. Outbound types serialize directly into
//! the voice platform's response JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Interface name a device advertises when it can render APL documents
pub const APL_INTERFACE: &str = "Alexa.Presentation.APL";

/// Kind of inbound request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    /// The user opened the skill without an intent
    LaunchRequest,
    /// The user said something mapped to a named intent
    IntentRequest,
    /// A UI element on the device raised an event
    UserInteractionEvent,
    /// The platform closed the session
    SessionEndedRequest,
    /// Any request type the skill does not model
    Other(String),
}

impl RequestKind {
    /// Map a wire `request.type` onto a request kind
    pub fn from_type(request_type: &str) -> Self {
        match request_type {
            "LaunchRequest" => RequestKind::LaunchRequest,
            "IntentRequest" => RequestKind::IntentRequest,
            "Alexa.Presentation.APL.UserEvent" => RequestKind::UserInteractionEvent,
            "SessionEndedRequest" => RequestKind::SessionEndedRequest,
            other => RequestKind::Other(other.to_string()),
        }
    }

    /// The wire `request.type` for this kind
    pub fn as_type(&self) -> &str {
        match self {
            RequestKind::LaunchRequest => "LaunchRequest",
            RequestKind::IntentRequest => "IntentRequest",
            RequestKind::UserInteractionEvent => "Alexa.Presentation.APL.UserEvent",
            RequestKind::SessionEndedRequest => "SessionEndedRequest",
            RequestKind::Other(other) => other,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_type())
    }
}

/// Interfaces supported by the requesting device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    interfaces: BTreeSet<String>,
}

impl DeviceCapabilities {
    /// A voice-only device
    pub fn none() -> Self {
        Self::default()
    }

    /// A device able to render APL documents
    pub fn with_screen() -> Self {
        Self::default().with_interface(APL_INTERFACE)
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.insert(interface.into());
        self
    }

    pub fn supports(&self, interface: &str) -> bool {
        self.interfaces.contains(interface)
    }

    pub fn has_screen(&self) -> bool {
        self.supports(APL_INTERFACE)
    }
}

/// A decoded inbound request, immutable for the lifetime of one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Platform-assigned request identifier
    pub request_id: Option<String>,
    /// When the platform issued the request
    pub timestamp: Option<DateTime<Utc>>,
    /// Locale of the user, e.g. `en-US`
    pub locale: Option<String>,
    /// Kind of request
    pub kind: RequestKind,
    /// Intent name, only for intent requests
    pub intent_name: Option<String>,
    /// Id of the UI element that raised a user event
    pub event_source_id: Option<String>,
    /// What the device can present
    pub capabilities: DeviceCapabilities,
    /// Token of the APL document currently on screen
    pub active_visual_context: Option<String>,
    /// Why the session ended, only for session-ended requests
    pub session_end_reason: Option<String>,
}

impl InboundEvent {
    fn of_kind(kind: RequestKind) -> Self {
        Self {
            request_id: None,
            timestamp: None,
            locale: None,
            kind,
            intent_name: None,
            event_source_id: None,
            capabilities: DeviceCapabilities::none(),
            active_visual_context: None,
            session_end_reason: None,
        }
    }

    /// Create a launch request
    pub fn launch() -> Self {
        Self::of_kind(RequestKind::LaunchRequest)
    }

    /// Create an intent request for the given intent
    pub fn intent(name: impl Into<String>) -> Self {
        let mut event = Self::of_kind(RequestKind::IntentRequest);
        event.intent_name = Some(name.into());
        event
    }

    /// Create a user event raised by the UI element `source_id`
    pub fn user_event(source_id: impl Into<String>) -> Self {
        let mut event = Self::of_kind(RequestKind::UserInteractionEvent);
        event.event_source_id = Some(source_id.into());
        event
    }

    /// Create a session-ended request
    pub fn session_ended() -> Self {
        Self::of_kind(RequestKind::SessionEndedRequest)
    }

    /// Create a request of a type the skill does not model
    pub fn other(request_type: impl Into<String>) -> Self {
        Self::of_kind(RequestKind::Other(request_type.into()))
    }

    /// Mark the requesting device as screen capable
    pub fn with_screen(mut self) -> Self {
        self.capabilities = DeviceCapabilities::with_screen();
        self
    }

    /// Record which APL document the device currently shows
    pub fn with_visual_context(mut self, token: impl Into<String>) -> Self {
        self.active_visual_context = Some(token.into());
        self
    }
}

/// Speech the device says out loud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
}

impl OutputSpeech {
    pub fn plain(text: impl Into<String>) -> Self {
        OutputSpeech::PlainText { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::PlainText { text } => text,
        }
    }
}

/// Speech used when the user does not answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Card shown in the companion app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    Simple { title: String, content: String },
}

impl Card {
    pub fn simple(title: impl Into<String>, content: impl Into<String>) -> Self {
        Card::Simple {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Instruction telling the device to render or manipulate screen content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    /// Render an APL document, addressable later through `token`
    #[serde(rename = "Alexa.Presentation.APL.RenderDocument")]
    RenderDocument {
        token: String,
        document: serde_json::Value,
    },
    /// Run commands against a previously rendered document
    #[serde(rename = "Alexa.Presentation.APL.ExecuteCommands")]
    ExecuteCommands {
        token: String,
        commands: Vec<AplCommand>,
    },
}

impl Directive {
    /// Token of the document this directive targets
    pub fn token(&self) -> &str {
        match self {
            Directive::RenderDocument { token, .. } => token,
            Directive::ExecuteCommands { token, .. } => token,
        }
    }
}

/// APL command carried by an ExecuteCommands directive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AplCommand {
    /// Animate properties of a component
    AnimateItem {
        #[serde(rename = "componentId")]
        component_id: String,
        /// Duration in milliseconds
        duration: u32,
        value: Vec<AnimatedProperty>,
    },
}

/// Animated property kinds supported by AnimateItem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimatedPropertyKind {
    Opacity,
}

/// One property animation; `from` defaults to the current value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatedProperty {
    pub property: AnimatedPropertyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    pub to: f64,
}

impl AnimatedProperty {
    /// Animate opacity from its current value to `to`
    pub fn opacity_to(to: f64) -> Self {
        Self {
            property: AnimatedPropertyKind::Opacity,
            from: None,
            to,
        }
    }
}

/// A finalized response, see [`crate::response::ResponseBuilder`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

impl Response {
    pub fn speech(&self) -> Option<&str> {
        self.output_speech.as_ref().map(OutputSpeech::text)
    }

    pub fn reprompt_text(&self) -> Option<&str> {
        self.reprompt.as_ref().map(|r| r.output_speech.text())
    }

    /// Whether the session closes after this response
    pub fn ends_session(&self) -> bool {
        self.should_end_session.unwrap_or(self.reprompt.is_none())
    }

    /// True for the response with no speech, card or directives
    pub fn is_empty(&self) -> bool {
        self.output_speech.is_none()
            && self.reprompt.is_none()
            && self.card.is_none()
            && self.directives.is_empty()
    }
}
