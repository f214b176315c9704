//! Response builder
//!
//! Handlers accumulate speech, reprompt, card and directives here and finalize
//! them with [`ResponseBuilder::response`]. A reprompt keeps the session open;
//! a spoken response without one closes it. An untouched builder produces the
//! empty response used when the platform has already closed the session.

use crate::value_objects::{Card, Directive, OutputSpeech, Reprompt, Response};

/// Incremental builder for a [`Response`]
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    speech: Option<OutputSpeech>,
    reprompt: Option<Reprompt>,
    card: Option<Card>,
    directives: Vec<Directive>,
    should_end_session: Option<bool>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the speech the device says
    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.speech = Some(OutputSpeech::plain(text));
        self
    }

    /// Set the reprompt; the session stays open awaiting the user
    pub fn ask(mut self, text: impl Into<String>) -> Self {
        self.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::plain(text),
        });
        self
    }

    pub fn set_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    pub fn add_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// Override the derived session flag
    pub fn set_should_end_session(mut self, end: bool) -> Self {
        self.should_end_session = Some(end);
        self
    }

    /// Finalize into a response
    pub fn response(self) -> Response {
        let should_end_session = match self.should_end_session {
            Some(end) => Some(end),
            None if self.speech.is_some() || self.reprompt.is_some() => {
                Some(self.reprompt.is_none())
            }
            None => None,
        };

        Response {
            output_speech: self.speech,
            reprompt: self.reprompt,
            card: self.card,
            directives: self.directives,
            should_end_session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_without_reprompt_ends_session() {
        let response = ResponseBuilder::new().speak("Goodbye!").response();

        assert_eq!(response.speech(), Some("Goodbye!"));
        assert_eq!(response.should_end_session, Some(true));
        assert!(response.ends_session());
    }

    #[test]
    fn test_reprompt_keeps_session_open() {
        let response = ResponseBuilder::new()
            .speak("How can I help?")
            .ask("Say hello.")
            .response();

        assert_eq!(response.reprompt_text(), Some("Say hello."));
        assert_eq!(response.should_end_session, Some(false));
        assert!(!response.ends_session());
    }

    #[test]
    fn test_untouched_builder_is_empty() {
        let response = ResponseBuilder::new().response();

        assert!(response.is_empty());
        assert_eq!(response.should_end_session, None);
    }

    #[test]
    fn test_explicit_session_flag_wins() {
        let response = ResponseBuilder::new()
            .speak("Still here")
            .set_should_end_session(false)
            .response();

        assert_eq!(response.should_end_session, Some(false));
    }

    #[test]
    fn test_card_and_directives_accumulate() {
        let response = ResponseBuilder::new()
            .speak("Look at the app")
            .set_card(Card::simple("Title", "Body"))
            .add_directive(Directive::RenderDocument {
                token: "a".to_string(),
                document: serde_json::json!({}),
            })
            .add_directive(Directive::RenderDocument {
                token: "b".to_string(),
                document: serde_json::json!({}),
            })
            .response();

        assert_eq!(response.card, Some(Card::simple("Title", "Body")));
        let tokens: Vec<&str> = response.directives.iter().map(Directive::token).collect();
        assert_eq!(tokens, vec!["a", "b"]);
    }
}
