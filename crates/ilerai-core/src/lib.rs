//! Domain layer for the IlerAI PHC USSD service.
//!
//! Holds the menu state machine, the session and facility models, and the
//! repository traits the application layer is written against.

pub mod config;
pub mod error;
pub mod phc;
pub mod ussd;

pub use error::IleraiError;
