//! Skill assembly and the process entry point
//!
//! A [`Skill`] owns the layout document store and the request dispatcher. It
//! is built once at process start with [`SkillBuilder`] and then only read,
//! one request per invocation.

use serde_json::Value;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::assets::DocumentStore;
use crate::config::SkillConfig;
use crate::errors::SkillResult;
use crate::events::{RequestEnvelope, ResponseEnvelope};
use crate::handlers::{
    CancelOrStopIntentHandler, CardIntentHandler, CatchAllExceptionHandler, ExceptionHandler,
    HandlerInput, HelloWorldButtonEventHandler, HelloWorldIntentHandler,
    HelloWorldWithButtonIntentHandler, HelpIntentHandler, IntentReflectorHandler,
    LaunchRequestHandler, OkIntentHandler, RequestHandler, SessionEndedRequestHandler,
    StartOverIntentHandler,
};
use crate::routing::RequestDispatcher;
use crate::value_objects::{InboundEvent, Response};

/// Per-invocation information supplied by the hosting runtime
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationContext {
    pub invocation_id: Uuid,
    pub function_name: String,
}

impl InvocationContext {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            function_name: function_name.into(),
        }
    }
}

/// Registers handlers in order, then freezes them into a [`Skill`]
#[derive(Default)]
pub struct SkillBuilder {
    request_handlers: Vec<Box<dyn RequestHandler>>,
    exception_handlers: Vec<Box<dyn ExceptionHandler>>,
}

impl SkillBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request handler; handlers are tried in the order added
    pub fn add_request_handler(mut self, handler: impl RequestHandler + 'static) -> Self {
        self.request_handlers.push(Box::new(handler));
        self
    }

    pub fn add_exception_handler(mut self, handler: impl ExceptionHandler + 'static) -> Self {
        self.exception_handlers.push(Box::new(handler));
        self
    }

    pub fn build(self, config: SkillConfig) -> Skill {
        Skill {
            documents: DocumentStore::from_config(&config),
            dispatcher: RequestDispatcher::new(self.request_handlers, self.exception_handlers),
        }
    }
}

/// An assembled, immutable skill
#[derive(Debug)]
pub struct Skill {
    documents: DocumentStore,
    dispatcher: RequestDispatcher,
}

impl Skill {
    /// The hello-world skill with its full handler chain
    pub fn standard(config: SkillConfig) -> Self {
        SkillBuilder::new()
            .add_request_handler(LaunchRequestHandler)
            .add_request_handler(HelloWorldIntentHandler)
            .add_request_handler(HelloWorldWithButtonIntentHandler)
            .add_request_handler(HelloWorldButtonEventHandler)
            .add_request_handler(StartOverIntentHandler)
            .add_request_handler(OkIntentHandler)
            .add_request_handler(CardIntentHandler)
            .add_request_handler(HelpIntentHandler)
            .add_request_handler(CancelOrStopIntentHandler)
            .add_request_handler(SessionEndedRequestHandler)
            // Matches every intent request, so it must stay last.
            .add_request_handler(IntentReflectorHandler)
            .add_exception_handler(CatchAllExceptionHandler)
            .build(config)
    }

    pub fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    /// Answer one decoded request, falling back to the exception handlers
    pub fn handle_event(&self, event: &InboundEvent) -> SkillResult<Response> {
        let input = HandlerInput::new(event, &self.documents);
        self.dispatcher.dispatch(&input)
    }

    /// Answer one request envelope
    pub fn invoke(
        &self,
        envelope: RequestEnvelope,
        context: &InvocationContext,
    ) -> SkillResult<ResponseEnvelope> {
        let span = info_span!(
            "skill_invocation",
            invocation_id = %context.invocation_id,
            function = %context.function_name,
            subject = %envelope.subject(),
            request_id = envelope.request.request_id.as_deref().unwrap_or("-"),
            session_id = envelope.session_id().unwrap_or("-"),
            locale = envelope.request.locale.as_deref().unwrap_or("-"),
        );
        let _enter = span.enter();

        let event = envelope.into_inbound_event();
        let response = self.handle_event(&event)?;

        info!(
            ends_session = response.ends_session(),
            directives = response.directives.len(),
            "request answered"
        );

        Ok(ResponseEnvelope::new(response))
    }

    /// Entry point for the hosting runtime: raw JSON in, raw JSON out.
    ///
    /// Payloads that are not request envelopes are returned as errors rather
    /// than answered with an apology.
    pub fn lambda_handler(
        &self,
        payload: Value,
        context: &InvocationContext,
    ) -> SkillResult<Value> {
        let envelope = RequestEnvelope::from_value(payload)?;
        self.invoke(envelope, context)?.to_value()
    }
}
