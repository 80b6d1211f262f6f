//! Pure menu transitions.
//!
//! Given the parked state and the latest keystroke, decide the next screen
//! and state. The only step that needs I/O (the PHC directory) is returned as
//! [`Step::NearbyPhcs`] for the caller to resolve.

use super::menu::{MenuAction, MenuCatalog, MenuDefinition};
use super::screen::Screen;
use super::state::MenuState;

/// Outcome of one keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Show { screen: Screen, next: MenuState },
    /// Render the directory leaf; the session then returns to `Main`.
    NearbyPhcs,
}

impl Step {
    fn show(screen: Screen, next: MenuState) -> Self {
        Step::Show { screen, next }
    }
}

/// Returns the last `*`-separated token of the gateway's accumulated input.
pub fn latest_input(text: &str) -> &str {
    text.rsplit('*').next().unwrap_or("")
}

/// The screen for a fresh dial-in.
pub fn first_screen(catalog: &MenuCatalog) -> Step {
    Step::show(catalog.main.screen(), MenuState::Main)
}

pub fn transition(catalog: &MenuCatalog, current: &MenuState, input: &str) -> Step {
    match current {
        MenuState::Main => select(catalog, &catalog.main, MenuState::Main, input),
        MenuState::Services => select(catalog, &catalog.services, MenuState::Services, input),
        MenuState::Drugs => select(catalog, &catalog.drugs, MenuState::Drugs, input),
        MenuState::ServiceDetail => leave_detail(catalog, MenuState::Services, input),
        MenuState::DrugDetail => leave_detail(catalog, MenuState::Drugs, input),
        MenuState::Unknown(_) => Step::show(catalog.main.screen(), MenuState::Main),
    }
}

fn select(catalog: &MenuCatalog, menu: &MenuDefinition, current: MenuState, input: &str) -> Step {
    match menu.action(input) {
        Some(MenuAction::Open(target)) => open(catalog, target.clone()),
        Some(MenuAction::Detail { state, text }) => {
            Step::show(Screen::prompt(text.clone()), state.clone())
        }
        Some(MenuAction::NearbyPhcs) => Step::NearbyPhcs,
        Some(MenuAction::Emergency) => Step::show(catalog.emergency_screen(), MenuState::Main),
        None => Step::show(menu.invalid_screen(), current),
    }
}

fn open(catalog: &MenuCatalog, target: MenuState) -> Step {
    match catalog.menu(&target) {
        Some(menu) => Step::show(menu.screen(), target),
        None => Step::show(catalog.main.screen(), MenuState::Main),
    }
}

/// `0` on an information page goes back to its list; anything else starts
/// over at the main menu.
fn leave_detail(catalog: &MenuCatalog, parent: MenuState, input: &str) -> Step {
    if input == "0" {
        open(catalog, parent)
    } else {
        Step::show(catalog.main.screen(), MenuState::Main)
    }
}
