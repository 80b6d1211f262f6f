//! USSD domain module.
//!
//! # Module Structure
//!
//! - `state`: persisted menu state (`MenuState`)
//! - `screen`: one rendered screen and its `CON`/`END` framing
//! - `menu`: static menu tables (`MenuCatalog`)
//! - `transition`: keystroke dispatch, free of I/O
//! - `model`: session record (`UssdSession`)
//! - `repository`: session store trait

mod menu;
mod model;
mod repository;
mod screen;
mod state;
mod transition;

pub use menu::{MenuAction, MenuCatalog, MenuDefinition};
pub use model::{UserData, UssdSession};
pub use repository::UssdSessionRepository;
pub use screen::{Screen, UNAVAILABLE_TEXT};
pub use state::MenuState;
pub use transition::{Step, first_screen, latest_input, transition};
