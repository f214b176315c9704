//! Request and exception handlers
//!
//! A request handler pairs a predicate (`can_handle`) with an action
//! (`handle`). Exception handlers answer when an action fails or nothing
//! matched. Both are stateless and registered once on a
//! [`crate::skill::SkillBuilder`].

pub mod exception_handler;
pub mod intent_handlers;

pub use exception_handler::{CatchAllExceptionHandler, APOLOGY_SPEECH};
pub use intent_handlers::{
    CancelOrStopIntentHandler, CardIntentHandler, HelloWorldButtonEventHandler,
    HelloWorldIntentHandler, HelloWorldWithButtonIntentHandler, HelpIntentHandler,
    IntentReflectorHandler, LaunchRequestHandler, OkIntentHandler,
    SessionEndedRequestHandler, StartOverIntentHandler,
};

use crate::assets::DocumentStore;
use crate::errors::{SkillError, SkillResult};
use crate::response::ResponseBuilder;
use crate::value_objects::{InboundEvent, RequestKind, Response};

/// Everything a handler may look at while answering one request
#[derive(Debug, Clone, Copy)]
pub struct HandlerInput<'a> {
    pub event: &'a InboundEvent,
    pub documents: &'a DocumentStore,
}

impl<'a> HandlerInput<'a> {
    pub fn new(event: &'a InboundEvent, documents: &'a DocumentStore) -> Self {
        Self { event, documents }
    }

    pub fn is_request_type(&self, kind: &RequestKind) -> bool {
        &self.event.kind == kind
    }

    /// True for an intent request naming `name`
    pub fn is_intent_name(&self, name: &str) -> bool {
        self.event.kind == RequestKind::IntentRequest
            && self.event.intent_name.as_deref() == Some(name)
    }

    pub fn intent_name(&self) -> SkillResult<&'a str> {
        self.event.intent_name.as_deref().ok_or(SkillError::MissingIntent)
    }

    /// Whether the device can render APL documents
    pub fn supports_apl(&self) -> bool {
        self.event.capabilities.has_screen()
    }

    /// Token of the APL document currently on screen
    pub fn visual_token(&self) -> Option<&'a str> {
        self.event.active_visual_context.as_deref()
    }

    /// Fresh builder for this request's response
    pub fn response_builder(&self) -> ResponseBuilder {
        ResponseBuilder::new()
    }
}

/// Handler for one kind of inbound request
pub trait RequestHandler: Send + Sync {
    /// Whether this handler answers the request
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool;

    /// Produce the response
    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Handler answering a failed or unroutable request
pub trait ExceptionHandler: Send + Sync {
    fn can_handle(&self, input: &HandlerInput<'_>, error: &SkillError) -> bool;

    fn handle(&self, input: &HandlerInput<'_>, error: &SkillError) -> SkillResult<Response>;

    fn name(&self) -> &str;
}
