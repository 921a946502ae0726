//! Install-prompt capture and replay
//!
//! The platform fires an installability offer at most once per page
//! life; the flow captures it, suppresses the default behavior, and
//! replays it exactly once when the user asks. A consumed or replaced
//! capture is never reused.

use crate::error::{DraftpadError, DraftpadResult};
use crate::session::status::StatusSignal;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// A captured one-time-usable install invitation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOffer {
    pub id: Uuid,
    pub captured_at: DateTime<Utc>,
}

impl InstallOffer {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            captured_at: Utc::now(),
        }
    }
}

/// The user's answer to the native install dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallDecision {
    Accepted,
    Dismissed,
}

/// Platform capability that presents the native install dialog
#[async_trait]
pub trait InstallHost: Send + Sync {
    async fn prompt(&self, offer: &InstallOffer) -> DraftpadResult<InstallDecision>;
}

/// Capture/replay state machine:
/// `NoOffer -> OfferCaptured -> (Consumed | Superseded)`
pub struct InstallFlow {
    host: Arc<dyn InstallHost>,
    captured: Option<InstallOffer>,
}

impl InstallFlow {
    pub fn new(host: Arc<dyn InstallHost>) -> Self {
        Self {
            host,
            captured: None,
        }
    }

    /// Capture a platform offer, superseding any outstanding one, and
    /// reveal the install affordance.
    pub fn capture(&mut self) -> StatusSignal {
        let offer = InstallOffer::new();
        if let Some(previous) = self.captured.replace(offer) {
            debug!("Superseded install offer {}", previous.id);
        }
        StatusSignal::InstallOffered
    }

    /// Whether the install affordance should be visible
    pub fn has_offer(&self) -> bool {
        self.captured.is_some()
    }

    /// Replay the captured offer through the platform. The capture is
    /// discarded before the outcome is known, so a second consume (or
    /// a replay failure) can never re-invoke the prompt. Returns
    /// `None` when there was nothing to consume.
    pub async fn consume(&mut self) -> DraftpadResult<Option<StatusSignal>> {
        let Some(offer) = self.captured.take() else {
            return Ok(None);
        };

        match self.host.prompt(&offer).await {
            Ok(InstallDecision::Accepted) => Ok(Some(StatusSignal::Installed)),
            Ok(InstallDecision::Dismissed) => Ok(Some(StatusSignal::InstallDismissed)),
            Err(e) => {
                warn!("Install prompt replay failed: {}", e);
                Err(DraftpadError::InstallFlow(e.to_string()))
            }
        }
    }
}
