//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter: the HTTP persistence client, the notification queue
//! and the `TriageSession` that command handlers drive.

use std::sync::Arc;
use std::time::Duration;

use photocull_core::{
    NotificationQueue, PersistencePort, RollbackPolicy, Settings, TriageSession,
};
use photocull_http::{HttpClientConfig, HttpPersistence};

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// API root of the photocull server.
    pub server: String,
    /// Request timeout, if any.
    pub timeout: Option<Duration>,
    /// Handling of judgments the server failed to save.
    pub rollback: RollbackPolicy,
}

impl CliConfig {
    fn settings(&self) -> Settings {
        Settings {
            rollback_policy: Some(self.rollback),
            ..Settings::with_defaults()
        }
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// The triage session commands operate on.
    pub session: TriageSession,
    /// Notifications the session emitted, printed after each command.
    pub notifications: NotificationQueue,
}

impl CliContext {
    pub const fn session(&self) -> &TriageSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TriageSession {
        &mut self.session
    }
}

/// Bootstrap the CLI application against the configured server.
///
/// No request is made here; handlers decide when to load the library.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let mut http = HttpClientConfig::new()
        .with_base_url(config.server.clone())
        .with_user_agent(concat!("photocull-cli/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = config.timeout {
        http = http.with_timeout(timeout);
    }

    let persistence = HttpPersistence::new(&http)?;
    tracing::debug!(server = %persistence.base_url(), "Bootstrapped CLI context");
    bootstrap_with(Arc::new(persistence), &config)
}

/// Bootstrap with a custom persistence port (for testing).
pub fn bootstrap_with(
    port: Arc<dyn PersistencePort>,
    config: &CliConfig,
) -> Result<CliContext, CliError> {
    let notifications = NotificationQueue::new();
    let session = TriageSession::with_settings(
        port,
        Arc::new(notifications.clone()),
        config.settings(),
    )?;
    Ok(CliContext {
        session,
        notifications,
    })
}
