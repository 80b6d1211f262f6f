//! Request and response types for one gateway turn.

use serde::{Deserialize, Serialize};

use ilerai_core::ussd::Screen;

/// One callback from the USSD gateway.
///
/// Field names follow the gateway's camelCase wire names. `text` and
/// `serviceCode` are optional on the wire and default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub session_id: String,
    #[serde(default)]
    pub service_code: String,
    pub phone_number: String,
    /// Every keystroke of the dialog so far, `*`-separated.
    #[serde(default)]
    pub text: String,
}

impl TurnRequest {
    pub fn new(
        session_id: impl Into<String>,
        service_code: impl Into<String>,
        phone_number: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            service_code: service_code.into(),
            phone_number: phone_number.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub continue_session: bool,
    pub display_text: String,
}

impl TurnResponse {
    /// Wire form: `CON <text>` or `END <text>`.
    pub fn render(&self) -> String {
        let prefix = if self.continue_session { "CON" } else { "END" };
        format!("{} {}", prefix, self.display_text)
    }
}

impl From<Screen> for TurnResponse {
    fn from(screen: Screen) -> Self {
        Self {
            continue_session: !screen.terminal,
            display_text: screen.text,
        }
    }
}

/// Body of the service metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub success: bool,
    pub message: String,
    pub code: String,
    pub features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_missing_fields() {
        let request: TurnRequest =
            serde_json::from_str(r#"{"sessionId":"s1","phoneNumber":"+2348012345678"}"#).unwrap();
        assert_eq!(request.text, "");
        assert_eq!(request.service_code, "");
    }

    #[test]
    fn test_response_matches_screen_render() {
        for screen in [Screen::prompt("Menu"), Screen::end("Bye")] {
            let rendered = screen.render();
            assert_eq!(TurnResponse::from(screen).render(), rendered);
        }
    }
}
