//! Notification fan-out.

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::Serialize;
use tipline_core::constants::{NOTIFICATION_TITLE, UPDATE_INTENT};
use tipline_core::{Config, NotificationTarget};
use tipline_storage::RegistrationStore;

use crate::auth::{exchange_token, ServiceAccountKey};
use crate::error::NotifyError;

/// Dispatch lifecycle. A dispatch attempt moves forward through these phases;
/// any phase can fall to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Unauthorized,
    Authorizing,
    Authorized,
    Sending,
    Done,
    Failed,
}

impl std::fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unauthorized => "unauthorized",
            Self::Authorizing => "authorizing",
            Self::Authorized => "authorized",
            Self::Sending => "sending",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Aggregate outcome of one fan-out. Per-target failures are not itemized
/// for callers; they are logged inside the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Number of targets a send was attempted for.
    pub attempted: usize,
    /// Number of sends that completed successfully.
    pub delivered: usize,
}

/// One notification send. Seam for tests; the HTTP implementation lives on
/// [`NotificationDispatcher`].
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, target: &NotificationTarget, token: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserNotification<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomPushMessage<'a> {
    user_notification: UserNotification<'a>,
    target: &'a NotificationTarget,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PushRequest<'a> {
    custom_push_message: CustomPushMessage<'a>,
    is_in_sandbox: bool,
}

/// Sends proactive notifications to every target registered for the update
/// intent.
pub struct NotificationDispatcher {
    client: reqwest::Client,
    push_endpoint: String,
    service_account_path: String,
    sandbox: bool,
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("push_endpoint", &self.push_endpoint)
            .field("service_account_path", &self.service_account_path)
            .field("sandbox", &self.sandbox)
            .finish_non_exhaustive()
    }
}

impl NotificationDispatcher {
    /// Build a dispatcher from service configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// failure).
    pub fn new(config: &Config) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| NotifyError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            push_endpoint: config.push_endpoint.clone(),
            service_account_path: config.service_account_path.clone(),
            sandbox: config.sandbox,
        })
    }

    /// Exchange the service-account credential for a bearer token.
    ///
    /// # Errors
    /// `NotifyError::Auth` if the credential cannot be loaded, signed, or
    /// exchanged. Terminal for the current dispatch attempt.
    pub async fn authorize(&self) -> Result<String, NotifyError> {
        let key = ServiceAccountKey::load(&self.service_account_path).await?;
        exchange_token(&self.client, &key).await
    }

    /// Authorize, look up every target registered for the update intent, and
    /// send one notification per target concurrently.
    ///
    /// Per-target failures are logged and swallowed; the report is the only
    /// surfaced outcome.
    ///
    /// # Errors
    /// `Auth` if the token exchange fails, `Storage` if the target lookup
    /// fails. Individual delivery failures never surface here.
    pub async fn authorize_and_send(
        &self,
        registrations: &dyn RegistrationStore,
    ) -> Result<DispatchReport, NotifyError> {
        let mut phase = DispatchPhase::Unauthorized;
        tracing::debug!(%phase, "dispatch starting");

        phase = DispatchPhase::Authorizing;
        tracing::debug!(%phase, "exchanging service account credential");
        let token = match self.authorize().await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(phase = %DispatchPhase::Failed, error = %e, "authorization failed");
                return Err(e);
            },
        };
        phase = DispatchPhase::Authorized;
        tracing::debug!(%phase, "bearer token acquired");

        let targets = registrations.registered_targets(UPDATE_INTENT).await?;

        phase = DispatchPhase::Sending;
        tracing::info!(%phase, targets = targets.len(), "sending notifications");
        let report = dispatch_all(self, &targets, &token).await;

        tracing::info!(
            phase = %DispatchPhase::Done,
            attempted = report.attempted,
            delivered = report.delivered,
            "dispatch complete"
        );
        Ok(report)
    }
}

#[async_trait]
impl PushSender for NotificationDispatcher {
    async fn send(&self, target: &NotificationTarget, token: &str) -> Result<(), NotifyError> {
        let body = PushRequest {
            custom_push_message: CustomPushMessage {
                user_notification: UserNotification { title: NOTIFICATION_TITLE },
                target,
            },
            is_in_sandbox: self.sandbox,
        };
        let response = self
            .client
            .post(&self.push_endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery {
                user_id: target.user_id.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Delivery {
                user_id: target.user_id.clone(),
                message: format!("push endpoint returned {status}: {message}"),
            });
        }
        Ok(())
    }
}

/// Send to every target concurrently and aggregate the outcomes. Failures are
/// logged here and folded into the report.
pub(crate) async fn dispatch_all<S: PushSender + ?Sized>(
    sender: &S,
    targets: &[NotificationTarget],
    token: &str,
) -> DispatchReport {
    let sends = targets.iter().map(|target| async move {
        match sender.send(target, token).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(user_id = %target.user_id, error = %e, "notification send failed");
                false
            },
        }
    });
    let outcomes = join_all(sends).await;
    DispatchReport {
        attempted: outcomes.len(),
        delivered: outcomes.iter().filter(|ok| **ok).count(),
    }
}
