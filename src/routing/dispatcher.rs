//! Request dispatcher: ordered handler selection with exception fallback

use tracing::{debug, error, warn};

use crate::errors::{SkillError, SkillResult};
use crate::handlers::{ExceptionHandler, HandlerInput, RequestHandler};
use crate::value_objects::Response;

/// Ordered request handler chain plus exception handlers.
///
/// Built once and only read afterwards. The first request handler whose
/// predicate accepts the request wins, so specific handlers must be
/// registered before generic ones.
pub struct RequestDispatcher {
    request_handlers: Vec<Box<dyn RequestHandler>>,
    exception_handlers: Vec<Box<dyn ExceptionHandler>>,
}

impl RequestDispatcher {
    pub fn new(
        request_handlers: Vec<Box<dyn RequestHandler>>,
        exception_handlers: Vec<Box<dyn ExceptionHandler>>,
    ) -> Self {
        Self {
            request_handlers,
            exception_handlers,
        }
    }

    /// Names of the request handlers in registration order
    pub fn handler_names(&self) -> Vec<&str> {
        self.request_handlers.iter().map(|h| h.name()).collect()
    }

    /// First request handler accepting the input
    pub fn select(&self, input: &HandlerInput<'_>) -> Option<&dyn RequestHandler> {
        self.request_handlers
            .iter()
            .find(|handler| handler.can_handle(input))
            .map(|handler| handler.as_ref())
    }

    /// Run the selected handler without exception fallback
    pub fn try_dispatch(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        let handler = self.select(input).ok_or_else(|| {
            warn!(request_type = %input.event.kind, "no request handler matched");
            SkillError::NoHandlerFound {
                request_type: input.event.kind.to_string(),
            }
        })?;

        debug!(handler = handler.name(), "dispatching request");
        handler.handle(input)
    }

    /// Run the selected handler; failures go to the first exception handler
    /// that accepts them.
    pub fn dispatch(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        match self.try_dispatch(input) {
            Ok(response) => Ok(response),
            Err(err) if err.is_recoverable() => self.handle_exception(input, err),
            Err(err) => Err(err),
        }
    }

    fn handle_exception(&self, input: &HandlerInput<'_>, err: SkillError) -> SkillResult<Response> {
        match self
            .exception_handlers
            .iter()
            .find(|handler| handler.can_handle(input, &err))
        {
            Some(handler) => {
                debug!(handler = handler.name(), error = %err, "handling exception");
                handler.handle(input, &err)
            }
            None => {
                error!(error = %err, "no exception handler accepted the failure");
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("request_handlers", &self.handler_names())
            .field(
                "exception_handlers",
                &self.exception_handlers.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DocumentStore;
    use crate::config::SkillConfig;
    use crate::handlers::{
        CardIntentHandler, CatchAllExceptionHandler, IntentReflectorHandler, APOLOGY_SPEECH,
    };
    use crate::value_objects::InboundEvent;

    struct FailingHandler;

    impl RequestHandler for FailingHandler {
        fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
            input.is_intent_name("FailIntent")
        }

        fn handle(&self, _input: &HandlerInput<'_>) -> SkillResult<Response> {
            Err(SkillError::Handler("deliberate failure".to_string()))
        }

        fn name(&self) -> &str {
            "FailingHandler"
        }
    }

    fn dispatcher(exceptions: bool) -> RequestDispatcher {
        let exception_handlers: Vec<Box<dyn ExceptionHandler>> = if exceptions {
            vec![Box::new(CatchAllExceptionHandler)]
        } else {
            Vec::new()
        };

        let request_handlers: Vec<Box<dyn RequestHandler>> = vec![
            Box::new(FailingHandler),
            Box::new(CardIntentHandler),
            Box::new(IntentReflectorHandler),
        ];

        RequestDispatcher::new(request_handlers, exception_handlers)
    }

    #[test]
    fn test_first_matching_handler_wins() {
        let documents = DocumentStore::from_config(&SkillConfig::default());
        let event = InboundEvent::intent("CardIntent");
        let input = HandlerInput::new(&event, &documents);

        let selected = dispatcher(true).select(&input).map(|h| h.name().to_string());
        assert_eq!(selected.as_deref(), Some("CardIntentHandler"));
    }

    #[test]
    fn test_failure_goes_to_exception_handler() {
        let documents = DocumentStore::from_config(&SkillConfig::default());
        let event = InboundEvent::intent("FailIntent");
        let input = HandlerInput::new(&event, &documents);

        let response = dispatcher(true).dispatch(&input).unwrap();
        assert_eq!(response.speech(), Some(APOLOGY_SPEECH));
        assert!(response.reprompt.is_some());
    }

    #[test]
    fn test_try_dispatch_surfaces_failure() {
        let documents = DocumentStore::from_config(&SkillConfig::default());
        let event = InboundEvent::intent("FailIntent");
        let input = HandlerInput::new(&event, &documents);

        assert_eq!(
            dispatcher(true).try_dispatch(&input),
            Err(SkillError::Handler("deliberate failure".to_string()))
        );
    }

    #[test]
    fn test_unroutable_request() {
        let documents = DocumentStore::from_config(&SkillConfig::default());
        let event = InboundEvent::launch();
        let input = HandlerInput::new(&event, &documents);

        assert_eq!(
            dispatcher(true).try_dispatch(&input),
            Err(SkillError::NoHandlerFound {
                request_type: "LaunchRequest".to_string()
            })
        );

        let response = dispatcher(true).dispatch(&input).unwrap();
        assert_eq!(response.speech(), Some(APOLOGY_SPEECH));
    }

    #[test]
    fn test_without_exception_handlers_error_propagates() {
        let documents = DocumentStore::from_config(&SkillConfig::default());
        let event = InboundEvent::intent("FailIntent");
        let input = HandlerInput::new(&event, &documents);

        assert!(matches!(
            dispatcher(false).dispatch(&input),
            Err(SkillError::Handler(_))
        ));
    }

    #[test]
    fn test_handler_names_in_order() {
        assert_eq!(
            dispatcher(true).handler_names(),
            vec!["FailingHandler", "CardIntentHandler", "IntentReflectorHandler"]
        );
    }
}
