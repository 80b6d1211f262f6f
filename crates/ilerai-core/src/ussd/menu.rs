//! Static menu tables.
//!
//! The catalog is built once per process and shared read-only by every turn.

use once_cell::sync::Lazy;

use super::screen::Screen;
use super::state::MenuState;
use crate::phc::PhcEntry;

const THANK_YOU: &str = "Thank you for using IlerAI PHC.";

const MAIN_TEXT: &str = "Welcome to IlerAI PHC\n1. Find Nearby PHCs\n2. Check Services\n3. Drug Availability\n4. Emergency Contact";

const SERVICES_TEXT: &str = "Available Services:\n1. Antenatal Care\n2. Immunization\n3. Family Planning\n4. General Consultation\n0. Back to Main";

const DRUGS_TEXT: &str = "Drug Stock Check:\n1. Paracetamol\n2. Amoxicillin\n3. ORS\n4. Malaria Drugs\n0. Back to Main";

const EMERGENCY_TEXT: &str = "Emergency Contacts:\nAmbulance: 199\nFire: 199\nPolice: 199\nNational Emergency: 112";

const SERVICE_DETAILS: [(&str, &str); 4] = [
    (
        "1",
        "Antenatal Care:\nAvailable Mon-Fri 8AM-4PM\nServices: Checkups, Ultrasound, Health Education\nCost: Free\n\n0. Back to Services",
    ),
    (
        "2",
        "Immunization:\nAvailable Daily 8AM-2PM\nVaccines: BCG, DPT, Polio, Measles\nCost: Free\n\n0. Back to Services",
    ),
    (
        "3",
        "Family Planning:\nAvailable Mon-Fri 9AM-3PM\nServices: Counseling, Contraceptives\nCost: Free\n\n0. Back to Services",
    ),
    (
        "4",
        "General Consultation:\nAvailable Daily 8AM-5PM\nServices: Diagnosis, Treatment, Referrals\nCost: N500\n\n0. Back to Services",
    ),
];

const DRUG_DETAILS: [(&str, &str); 4] = [
    (
        "1",
        "Paracetamol: In Stock\nTablets 500mg available\nPrice: N50 per pack\n\n0. Back to Drugs",
    ),
    (
        "2",
        "Amoxicillin: In Stock\nCapsules 250mg available\nPrice: N200 per pack\n\n0. Back to Drugs",
    ),
    (
        "3",
        "ORS: In Stock\nOral Rehydration Salts\nPrice: N100 per sachet\n\n0. Back to Drugs",
    ),
    (
        "4",
        "Malaria Drugs: In Stock\nArtemether-Lumefantrine\nPrice: N800 per pack\n\n0. Back to Drugs",
    ),
];

static STANDARD_CATALOG: Lazy<MenuCatalog> = Lazy::new(MenuCatalog::build_standard);

/// What a keystroke on a list menu leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Move to another list menu.
    Open(MenuState),
    /// Show an information page and park the session in `state`.
    Detail { state: MenuState, text: String },
    /// List facilities from the PHC directory and end the dialog.
    NearbyPhcs,
    /// Show emergency numbers and end the dialog.
    Emergency,
}

/// Display text plus the keystroke table of one list menu.
#[derive(Debug, Clone)]
pub struct MenuDefinition {
    pub text: String,
    /// Shown above `text` when the keystroke is not in `options`.
    pub invalid_prefix: String,
    pub options: Vec<(String, MenuAction)>,
}

impl MenuDefinition {
    pub fn action(&self, input: &str) -> Option<&MenuAction> {
        self.options
            .iter()
            .find(|(key, _)| key == input)
            .map(|(_, action)| action)
    }

    pub fn screen(&self) -> Screen {
        Screen::prompt(self.text.clone())
    }

    pub fn invalid_screen(&self) -> Screen {
        Screen::prompt(format!("{}\n\n{}", self.invalid_prefix, self.text))
    }
}

/// Every menu the engine can show.
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    pub main: MenuDefinition,
    pub services: MenuDefinition,
    pub drugs: MenuDefinition,
    pub emergency_text: String,
    pub closing_line: String,
}

impl MenuCatalog {
    /// The built-in IlerAI PHC menus.
    pub fn standard() -> &'static MenuCatalog {
        &STANDARD_CATALOG
    }

    fn build_standard() -> Self {
        let mut services_options = detail_options(MenuState::ServiceDetail, &SERVICE_DETAILS);
        services_options.push(("0".to_string(), MenuAction::Open(MenuState::Main)));

        let mut drugs_options = detail_options(MenuState::DrugDetail, &DRUG_DETAILS);
        drugs_options.push(("0".to_string(), MenuAction::Open(MenuState::Main)));

        Self {
            main: MenuDefinition {
                text: MAIN_TEXT.to_string(),
                invalid_prefix: "Invalid option. Please try again.".to_string(),
                options: vec![
                    ("1".to_string(), MenuAction::NearbyPhcs),
                    ("2".to_string(), MenuAction::Open(MenuState::Services)),
                    ("3".to_string(), MenuAction::Open(MenuState::Drugs)),
                    ("4".to_string(), MenuAction::Emergency),
                ],
            },
            services: MenuDefinition {
                text: SERVICES_TEXT.to_string(),
                invalid_prefix: "Invalid option.".to_string(),
                options: services_options,
            },
            drugs: MenuDefinition {
                text: DRUGS_TEXT.to_string(),
                invalid_prefix: "Invalid option.".to_string(),
                options: drugs_options,
            },
            emergency_text: EMERGENCY_TEXT.to_string(),
            closing_line: THANK_YOU.to_string(),
        }
    }

    /// The list menu shown for `state`, if it is one.
    pub fn menu(&self, state: &MenuState) -> Option<&MenuDefinition> {
        match state {
            MenuState::Main => Some(&self.main),
            MenuState::Services => Some(&self.services),
            MenuState::Drugs => Some(&self.drugs),
            MenuState::ServiceDetail | MenuState::DrugDetail | MenuState::Unknown(_) => None,
        }
    }

    pub fn emergency_screen(&self) -> Screen {
        Screen::end(format!("{}\n\n{}", self.emergency_text, self.closing_line))
    }

    /// Renders the nearby-PHC leaf. An empty list renders the not-found line.
    pub fn nearby_screen(&self, entries: &[PhcEntry]) -> Screen {
        if entries.is_empty() {
            return self.no_phcs_screen();
        }

        let mut text = String::from("Nearby PHCs:\n\n");
        for (index, phc) in entries.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", index + 1, phc.name));
            text.push_str(&format!("Location: {}\n", phc.location));
            text.push_str(&format!("Phone: {}\n", phc.phone));
            text.push_str(&format!("Status: {}\n\n", phc.status));
        }
        text.push_str(&self.closing_line);
        Screen::end(text)
    }

    pub fn no_phcs_screen(&self) -> Screen {
        Screen::end(format!("No PHCs found in your area.\n\n{}", self.closing_line))
    }
}

fn detail_options(state: MenuState, pages: &[(&str, &str)]) -> Vec<(String, MenuAction)> {
    pages
        .iter()
        .map(|(key, text)| {
            (
                key.to_string(),
                MenuAction::Detail {
                    state: state.clone(),
                    text: text.to_string(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phc(name: &str) -> PhcEntry {
        PhcEntry {
            name: name.to_string(),
            location: "Ilorin West".to_string(),
            phone: "+2348000000001".to_string(),
            status: "open".to_string(),
        }
    }

    #[test]
    fn test_main_options() {
        let catalog = MenuCatalog::standard();
        assert_eq!(catalog.main.action("1"), Some(&MenuAction::NearbyPhcs));
        assert_eq!(
            catalog.main.action("3"),
            Some(&MenuAction::Open(MenuState::Drugs))
        );
        assert_eq!(catalog.main.action("0"), None);
        assert_eq!(catalog.main.action(""), None);
    }

    #[test]
    fn test_invalid_screen_layout() {
        let screen = MenuCatalog::standard().services.invalid_screen();
        assert!(!screen.terminal);
        assert!(screen.text.starts_with("Invalid option.\n\nAvailable Services:"));
    }

    #[test]
    fn test_emergency_screen_is_terminal() {
        let screen = MenuCatalog::standard().emergency_screen();
        assert!(screen.terminal);
        assert!(screen.text.contains("199"));
        assert!(screen.text.contains("112"));
        assert!(screen.text.ends_with("Thank you for using IlerAI PHC."));
    }

    #[test]
    fn test_nearby_screen_formats_entries() {
        let screen = MenuCatalog::standard().nearby_screen(&[phc("Adewole PHC"), phc("Oke-Oyi PHC")]);
        assert!(screen.terminal);
        assert_eq!(
            screen.text,
            "Nearby PHCs:\n\n\
             1. Adewole PHC\nLocation: Ilorin West\nPhone: +2348000000001\nStatus: open\n\n\
             2. Oke-Oyi PHC\nLocation: Ilorin West\nPhone: +2348000000001\nStatus: open\n\n\
             Thank you for using IlerAI PHC."
        );
    }

    #[test]
    fn test_nearby_screen_empty() {
        let screen = MenuCatalog::standard().nearby_screen(&[]);
        assert!(screen.terminal);
        assert_eq!(
            screen.text,
            "No PHCs found in your area.\n\nThank you for using IlerAI PHC."
        );
    }

    #[test]
    fn test_detail_menus_have_no_list() {
        let catalog = MenuCatalog::standard();
        assert!(catalog.menu(&MenuState::ServiceDetail).is_none());
        assert!(catalog.menu(&MenuState::Services).is_some());
    }
}
