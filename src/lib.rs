//! Skill domain module
//!
//! A voice-assistant skill answering one platform request per invocation.
//! It provides:
//! - Decoding of request envelopes into immutable inbound events
//! - An ordered chain of request handlers, first match wins
//! - A catch-all exception handler that apologises and keeps the session open
//! - A response builder producing speech, reprompts, cards and APL directives
//!
//! The skill holds no state between requests: the handler chain is built once
//! by [`SkillBuilder`] and only read afterwards.

pub mod assets;
pub mod config;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod response;
pub mod routing;
pub mod skill;
pub mod value_objects;

// Re-export main types
pub use assets::{DocumentStore, LayoutDocument, HELLO_WORLD_TOKEN, HELLO_WORLD_WITH_BUTTON_TOKEN};
pub use config::SkillConfig;
pub use errors::{SkillError, SkillResult};
pub use events::{RequestEnvelope, ResponseEnvelope};
pub use handlers::{ExceptionHandler, HandlerInput, RequestHandler, APOLOGY_SPEECH};
pub use response::ResponseBuilder;
pub use routing::RequestDispatcher;
pub use skill::{InvocationContext, Skill, SkillBuilder};

pub use value_objects::{
    AnimatedProperty, AnimatedPropertyKind, AplCommand, Card, DeviceCapabilities, Directive,
    InboundEvent, OutputSpeech, Reprompt, RequestKind, Response,
};
