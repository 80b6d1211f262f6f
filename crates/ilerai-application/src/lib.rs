//! Application layer for IlerAI PHC.
//!
//! Wires the pure menu transitions in `ilerai-core` to the injected session
//! store and PHC directory.

pub mod turn;
pub mod ussd_engine;

pub use turn::{ServiceInfo, TurnRequest, TurnResponse};
pub use ussd_engine::UssdEngine;
