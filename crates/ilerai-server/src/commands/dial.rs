//! Plays a dialog against the engine the way a gateway would, sending the
//! accumulated `*`-joined input on every turn.

use anyhow::Result;

use ilerai_application::TurnRequest;
use ilerai_server::Runtime;

pub async fn run(
    runtime: &Runtime,
    phone_number: &str,
    session_id: Option<String>,
    keys: &[String],
) -> Result<()> {
    let session_id =
        session_id.unwrap_or_else(|| format!("sim-{}", chrono::Utc::now().timestamp_millis()));
    let service_code = runtime.config.ussd.service_code.clone();

    let mut texts = vec![String::new()];
    for i in 1..=keys.len() {
        texts.push(keys[..i].join("*"));
    }

    for text in texts {
        let request = TurnRequest::new(&session_id, &service_code, phone_number, &text);
        let response = runtime.engine.handle_turn(&request).await;

        println!("> text=\"{}\"", text);
        println!("{}\n", response.render());

        if !response.continue_session {
            break;
        }
    }

    Ok(())
}
