//! Request handlers for the hello-world skill
//!
//! Registration order matters: [`IntentReflectorHandler`] matches every intent
//! request and must stay last in the chain.

use tracing::debug;

use crate::assets::LayoutDocument;
use crate::errors::SkillResult;
use crate::handlers::{HandlerInput, RequestHandler};
use crate::value_objects::{AnimatedProperty, AplCommand, Card, Directive, RequestKind, Response};

/// Id of the button in the button layout that fades the greeting text
pub const FADE_BUTTON_ID: &str = "fadeHelloTextButton";

/// Id of the greeting text component in the button layout
pub const HELLO_TEXT_COMPONENT_ID: &str = "helloTextComponent";

/// How long the start-over fade-in takes, in milliseconds
pub const FADE_IN_DURATION_MS: u32 = 3000;

const HELLO_WORLD: &str = "Hello World!";
const NO_SCREEN_CLAUSE: &str = " This example would be more interesting on a device with a \
                                screen, such as an Echo Show or Fire TV.";

/// Greets the user when the skill is opened
pub struct LaunchRequestHandler;

impl RequestHandler for LaunchRequestHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_request_type(&RequestKind::LaunchRequest)
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        let speak_output = "Welcome Aman, you can say Hello or Help. Which would you like to try?";

        Ok(input
            .response_builder()
            .speak(speak_output)
            .ask(speak_output)
            .response())
    }

    fn name(&self) -> &str {
        "LaunchRequestHandler"
    }
}

/// Speaks and renders a greeting document; falls back to voice-only speech
/// on devices without a screen.
fn greet(
    input: &HandlerInput<'_>,
    document: LayoutDocument,
    screen_clause: &str,
) -> SkillResult<Response> {
    let mut speak_output = HELLO_WORLD.to_string();
    let mut builder = input.response_builder();

    if input.supports_apl() {
        builder = builder.add_directive(Directive::RenderDocument {
            token: document.token().to_string(),
            document: input.documents.load(document)?,
        });
        speak_output.push_str(screen_clause);
    } else {
        speak_output.push_str(NO_SCREEN_CLAUSE);
    }

    Ok(builder.speak(speak_output).response())
}

/// Handler for `HelloWorldIntent`
pub struct HelloWorldIntentHandler;

impl RequestHandler for HelloWorldIntentHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_intent_name("HelloWorldIntent")
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        greet(
            input,
            LayoutDocument::HelloWorld,
            " You should now also see my greeting on the screen.",
        )
    }

    fn name(&self) -> &str {
        "HelloWorldIntentHandler"
    }
}

/// Handler for `HelloWorldWithButtonIntent`
pub struct HelloWorldWithButtonIntentHandler;

impl RequestHandler for HelloWorldWithButtonIntentHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_intent_name("HelloWorldWithButtonIntent")
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        greet(
            input,
            LayoutDocument::HelloWorldWithButton,
            " Welcome to Alexa Presentation Language. Click the button to see what happens!",
        )
    }

    fn name(&self) -> &str {
        "HelloWorldWithButtonIntentHandler"
    }
}

/// Handles the UserEvent sent when the fade button is pressed.
///
/// A layout may carry several buttons raising UserEvents, so the event source
/// id decides which one this was.
pub struct HelloWorldButtonEventHandler;

impl RequestHandler for HelloWorldButtonEventHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_request_type(&RequestKind::UserInteractionEvent)
            && input.event.event_source_id.as_deref() == Some(FADE_BUTTON_ID)
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        Ok(input
            .response_builder()
            .speak(
                "Thank you for clicking the button! I imagine you already noticed that the text \
                 faded away. Tell me to start over to bring it back!",
            )
            .ask(
                "Tell me to start over if you want me to bring the text back into view. Or, you \
                 can just say hello again.",
            )
            .response())
    }

    fn name(&self) -> &str {
        "HelloWorldButtonEventHandler"
    }
}

/// Handler for `AMAZON.StartOverIntent`: fades the greeting text back in
pub struct StartOverIntentHandler;

impl RequestHandler for StartOverIntentHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_intent_name("AMAZON.StartOverIntent")
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        let mut speak_output = String::new();
        let mut builder = input.response_builder();
        let button_token = LayoutDocument::HelloWorldWithButton.token();

        if input.supports_apl() {
            // Only the button layout has anything to bring back.
            if input.visual_token() == Some(button_token) {
                speak_output.push_str("OK, I'm going to try to bring that text back into view.");
                builder = builder.add_directive(Directive::ExecuteCommands {
                    token: button_token.to_string(),
                    commands: vec![AplCommand::AnimateItem {
                        component_id: HELLO_TEXT_COMPONENT_ID.to_string(),
                        duration: FADE_IN_DURATION_MS,
                        value: vec![AnimatedProperty::opacity_to(1.0)],
                    }],
                });
            } else {
                debug!(
                    token = ?input.visual_token(),
                    "start over without the button layout on screen"
                );
                speak_output.push_str(
                    "Hmm, there isn't anything for me to reset. Try invoking the 'hello world \
                     with button intent', then click the button and see what happens!",
                );
            }
        } else {
            speak_output.push_str(
                "Hello, this example would be more interesting on a device with a screen. Try it \
                 on an Echo Show, Echo Spot or a Fire TV device.",
            );
        }

        Ok(builder.speak(speak_output).response())
    }

    fn name(&self) -> &str {
        "StartOverIntentHandler"
    }
}

/// Handler for `okIntent`
pub struct OkIntentHandler;

impl RequestHandler for OkIntentHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_intent_name("okIntent")
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        Ok(input.response_builder().speak("Hello Aman ok!").response())
    }

    fn name(&self) -> &str {
        "OkIntentHandler"
    }
}

/// Handler for `CardIntent`: speaks and sends a simple card to the app
pub struct CardIntentHandler;

impl RequestHandler for CardIntentHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_intent_name("CardIntent")
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        let card = Card::simple(
            "This is the Title of the Card",
            "This is the card content. This card just has plain text content.\r\n\
             The content is formated with line breaks to improve readability.",
        );

        Ok(input
            .response_builder()
            .speak("This is the text Alexa speaks. Go to the Alexa app to see the card!")
            .set_card(card)
            .response())
    }

    fn name(&self) -> &str {
        "CardIntentHandler"
    }
}

/// Handler for `AMAZON.HelpIntent`
pub struct HelpIntentHandler;

impl RequestHandler for HelpIntentHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_intent_name("AMAZON.HelpIntent")
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        let speak_output = "You can say hello to me! How can I help?";

        Ok(input
            .response_builder()
            .speak(speak_output)
            .ask(speak_output)
            .response())
    }

    fn name(&self) -> &str {
        "HelpIntentHandler"
    }
}

/// Single handler for `AMAZON.CancelIntent` and `AMAZON.StopIntent`
pub struct CancelOrStopIntentHandler;

impl RequestHandler for CancelOrStopIntentHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_intent_name("AMAZON.CancelIntent") || input.is_intent_name("AMAZON.StopIntent")
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        Ok(input.response_builder().speak("Goodbye!").response())
    }

    fn name(&self) -> &str {
        "CancelOrStopIntentHandler"
    }
}

/// The platform closed the session; nothing may be said any more
pub struct SessionEndedRequestHandler;

impl RequestHandler for SessionEndedRequestHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_request_type(&RequestKind::SessionEndedRequest)
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        debug!(reason = ?input.event.session_end_reason, "session ended");
        Ok(input.response_builder().response())
    }

    fn name(&self) -> &str {
        "SessionEndedRequestHandler"
    }
}

/// Repeats the name of any intent back to the user.
///
/// Useful while building the interaction model: intents without a dedicated
/// handler land here. Register it last.
pub struct IntentReflectorHandler;

impl RequestHandler for IntentReflectorHandler {
    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.is_request_type(&RequestKind::IntentRequest)
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        let intent_name = input.intent_name()?;

        Ok(input
            .response_builder()
            .speak(format!("You just triggered {intent_name}."))
            .response())
    }

    fn name(&self) -> &str {
        "IntentReflectorHandler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DocumentStore;
    use crate::config::SkillConfig;
    use crate::errors::SkillError;
    use crate::value_objects::InboundEvent;
    use std::path::Path;

    fn documents() -> DocumentStore {
        let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        DocumentStore::from_config(&SkillConfig::default().with_assets_dir(assets))
    }

    fn run(handler: &dyn RequestHandler, event: &InboundEvent) -> SkillResult<Response> {
        let documents = documents();
        let input = HandlerInput::new(event, &documents);
        assert!(handler.can_handle(&input), "{} should accept {:?}", handler.name(), event.kind);
        handler.handle(&input)
    }

    #[test]
    fn test_greeting_without_screen() {
        let event = InboundEvent::intent("HelloWorldIntent");
        let response = run(&HelloWorldIntentHandler, &event).unwrap();

        assert!(response.directives.is_empty());
        assert_eq!(
            response.speech(),
            Some(
                "Hello World! This example would be more interesting on a device with a screen, \
                 such as an Echo Show or Fire TV."
            )
        );
        assert!(response.ends_session());
    }

    #[test]
    fn test_button_greeting_renders_button_layout() {
        let event = InboundEvent::intent("HelloWorldWithButtonIntent").with_screen();
        let response = run(&HelloWorldWithButtonIntentHandler, &event).unwrap();

        assert_eq!(response.directives.len(), 1);
        match &response.directives[0] {
            Directive::RenderDocument { token, document } => {
                assert_eq!(token, "helloworldWithButtonToken");
                assert_eq!(document["type"], "APL");
            }
            other => panic!("unexpected directive {other:?}"),
        }
        assert!(response.speech().unwrap().ends_with("Click the button to see what happens!"));
    }

    #[test]
    fn test_start_over_without_button_layout() {
        let event = InboundEvent::intent("AMAZON.StartOverIntent")
            .with_screen()
            .with_visual_context("helloworldToken");
        let response = run(&StartOverIntentHandler, &event).unwrap();

        assert!(response.directives.is_empty());
        let speech = response.speech().unwrap();
        assert!(speech.starts_with("Hmm, there isn't anything for me to reset."));
    }

    #[test]
    fn test_start_over_without_screen_speaks_only_the_suggestion() {
        let event = InboundEvent::intent("AMAZON.StartOverIntent");
        let response = run(&StartOverIntentHandler, &event).unwrap();

        assert!(response.directives.is_empty());
        assert_eq!(
            response.speech(),
            Some(
                "Hello, this example would be more interesting on a device with a screen. Try it \
                 on an Echo Show, Echo Spot or a Fire TV device."
            )
        );
    }

    #[test]
    fn test_button_event_ignores_other_sources() {
        let documents = documents();
        let event = InboundEvent::user_event("someOtherButton");
        let input = HandlerInput::new(&event, &documents);

        assert!(!HelloWorldButtonEventHandler.can_handle(&input));
    }

    #[test]
    fn test_cancel_and_stop_share_a_handler() {
        for intent in ["AMAZON.CancelIntent", "AMAZON.StopIntent"] {
            let response = run(&CancelOrStopIntentHandler, &InboundEvent::intent(intent)).unwrap();
            assert_eq!(response.speech(), Some("Goodbye!"));
        }
    }

    #[test]
    fn test_card_content() {
        let response = run(&CardIntentHandler, &InboundEvent::intent("CardIntent")).unwrap();

        match response.card {
            Some(Card::Simple { title, content }) => {
                assert_eq!(title, "This is the Title of the Card");
                assert!(content.contains("\r\n"));
            }
            None => panic!("card missing"),
        }
    }

    #[test]
    fn test_session_ended_is_empty() {
        let response = run(&SessionEndedRequestHandler, &InboundEvent::session_ended()).unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn test_reflector_echoes_intent() {
        let event = InboundEvent::intent("WeatherIntent");
        let response = run(&IntentReflectorHandler, &event).unwrap();
        assert_eq!(response.speech(), Some("You just triggered WeatherIntent."));
    }

    #[test]
    fn test_reflector_without_intent_fails() {
        let documents = documents();
        let mut event = InboundEvent::intent("x");
        event.intent_name = None;
        let input = HandlerInput::new(&event, &documents);

        assert_eq!(IntentReflectorHandler.handle(&input), Err(SkillError::MissingIntent));
    }
}
