//! USSD session engine.
//!
//! `UssdEngine` turns one gateway callback into one screen. It loads or
//! creates the session, applies the menu transition for the latest
//! keystroke, persists the new state and renders the reply.
//!
//! # Failure handling
//!
//! The gateway must always receive a well-formed reply:
//!
//! - session lookup or creation fails or times out: `END` unavailable line
//! - session save fails or times out: logged, computed screen still returned
//! - PHC directory fails or times out: "No PHCs found" leaf

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use ilerai_core::config::UssdConfig;
use ilerai_core::error::{IleraiError, Result};
use ilerai_core::phc::PhcDirectory;
use ilerai_core::ussd::{
    MenuCatalog, MenuState, Screen, Step, UssdSession, UssdSessionRepository, first_screen,
    latest_input, transition,
};

use crate::turn::{ServiceInfo, TurnRequest, TurnResponse};

/// Stateless between turns; every turn reads and writes through the
/// injected collaborators.
pub struct UssdEngine {
    sessions: Arc<dyn UssdSessionRepository>,
    directory: Arc<dyn PhcDirectory>,
    catalog: &'static MenuCatalog,
    config: UssdConfig,
}

impl UssdEngine {
    pub fn new(
        sessions: Arc<dyn UssdSessionRepository>,
        directory: Arc<dyn PhcDirectory>,
        config: UssdConfig,
    ) -> Self {
        Self {
            sessions,
            directory,
            catalog: MenuCatalog::standard(),
            config,
        }
    }

    pub fn config(&self) -> &UssdConfig {
        &self.config
    }

    /// Serves one gateway turn. Never fails; see the module docs for how
    /// collaborator errors are absorbed.
    pub async fn handle_turn(&self, request: &TurnRequest) -> TurnResponse {
        let session = match self.load_or_create(request).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(
                    session_id = %request.session_id,
                    "Session unavailable, ending dialog: {}",
                    e
                );
                return Screen::unavailable().into();
            }
        };

        let step = if request.text.is_empty() {
            first_screen(self.catalog)
        } else {
            transition(
                self.catalog,
                &session.current_menu,
                latest_input(&request.text),
            )
        };

        let (screen, next) = match step {
            Step::Show { screen, next } => (screen, next),
            Step::NearbyPhcs => (self.nearby_screen().await, MenuState::Main),
        };

        tracing::debug!(
            session_id = %session.session_id,
            from = %session.current_menu,
            to = %next,
            terminal = screen.terminal,
            "USSD turn"
        );

        if let Err(e) = self.persist(&session, &next).await {
            tracing::warn!(
                session_id = %session.session_id,
                "Failed to persist session state: {}",
                e
            );
        }

        screen.into()
    }

    /// Metadata reported by the service test endpoint.
    pub fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            success: true,
            message: "USSD Service Active".to_string(),
            code: self.config.service_code.clone(),
            features: self.config.features.clone(),
        }
    }

    /// Stored sessions, most recently active first.
    pub async fn list_sessions(&self) -> Result<Vec<UssdSession>> {
        self.sessions.list_all().await
    }

    /// Deletes every session idle for longer than `older_than`. Returns the
    /// number deleted. Sessions with an unreadable timestamp are kept.
    pub async fn prune_sessions(&self, older_than: chrono::Duration) -> Result<usize> {
        let cutoff = chrono::Utc::now() - older_than;
        let mut removed = 0;

        for session in self.sessions.list_all().await? {
            match session.last_activity() {
                Some(last_activity) if last_activity < cutoff => {
                    self.sessions.delete(&session.session_id).await?;
                    removed += 1;
                }
                Some(_) => {}
                None => {
                    tracing::warn!(
                        session_id = %session.session_id,
                        "Keeping session with unreadable updated_at '{}'",
                        session.updated_at
                    );
                }
            }
        }

        tracing::info!("Pruned {} idle USSD sessions", removed);
        Ok(removed)
    }

    async fn load_or_create(&self, request: &TurnRequest) -> Result<UssdSession> {
        let limit = self.config.store_timeout();

        if let Some(session) = within(
            limit,
            "session lookup",
            self.sessions.find_by_id(&request.session_id),
        )
        .await?
        {
            return Ok(session);
        }

        let session = UssdSession::new(&request.session_id, &request.phone_number);
        within(limit, "session create", self.sessions.create(&session)).await?;
        tracing::info!(
            session_id = %session.session_id,
            service_code = %request.service_code,
            "New USSD session"
        );
        Ok(session)
    }

    async fn persist(&self, session: &UssdSession, next: &MenuState) -> Result<()> {
        within(
            self.config.store_timeout(),
            "session update",
            self.sessions
                .update(&session.session_id, next, &session.user_data),
        )
        .await
    }

    async fn nearby_screen(&self) -> Screen {
        let lookup = within(
            self.config.directory_timeout(),
            "PHC directory lookup",
            self.directory.list_top(self.config.nearby_limit),
        )
        .await;

        match lookup {
            Ok(entries) => self.catalog.nearby_screen(&entries),
            Err(e) => {
                tracing::warn!("PHC directory unavailable: {}", e);
                self.catalog.no_phcs_screen()
            }
        }
    }
}

async fn within<T>(
    limit: Duration,
    operation: &'static str,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(IleraiError::timeout(
            operation,
            u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        )),
    }
}
