//! Catch-all exception handler

use tracing::error;

use crate::errors::{SkillError, SkillResult};
use crate::handlers::{ExceptionHandler, HandlerInput};
use crate::value_objects::Response;

/// Speech returned whenever a request could not be answered
pub const APOLOGY_SPEECH: &str = "Sorry, I had trouble doing what you asked. Please try again.";

/// Answers every failure with an apology and keeps the session open so the
/// user can retry.
pub struct CatchAllExceptionHandler;

impl ExceptionHandler for CatchAllExceptionHandler {
    fn can_handle(&self, _input: &HandlerInput<'_>, _error: &SkillError) -> bool {
        true
    }

    fn handle(&self, input: &HandlerInput<'_>, error: &SkillError) -> SkillResult<Response> {
        error!(
            error = %error,
            request_type = %input.event.kind,
            intent = ?input.event.intent_name,
            "request failed"
        );

        Ok(input
            .response_builder()
            .speak(APOLOGY_SPEECH)
            .ask(APOLOGY_SPEECH)
            .response())
    }

    fn name(&self) -> &str {
        "CatchAllExceptionHandler"
    }
}
