//! Request routing for the skill

pub mod dispatcher;

pub use dispatcher::RequestDispatcher;
