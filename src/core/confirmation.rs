//! Staff confirmation of a care request.
//!
//! Opening a confirmation link adds the client's family to the counter. Every call
//! increments, so replaying the same link counts the family again.

use crate::core::counter::CounterStore;
use crate::domain::model::StatsRecord;
use crate::domain::ports::StatsBackend;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CLIENT_NAME: &str = "Client";

/// Query parameters carried by a confirmation link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationOutcome {
    pub name: String,
    pub email: String,
    pub stats: StatsRecord,
    pub stats_updated: bool,
}

impl ConfirmationOutcome {
    pub fn message(&self) -> String {
        let mut message = format!(
            "You have confirmed the request from {} ({}). ",
            self.name, self.email
        );
        if self.stats_updated {
            message.push_str("This client has been added to your \"Families Helped\" statistics.");
        } else {
            message.push_str(
                "Unable to update statistics, but your confirmation has been recorded.",
            );
        }
        message
    }
}

pub async fn confirm_request<B: StatsBackend>(
    counter: &CounterStore<B>,
    request: ConfirmationRequest,
) -> ConfirmationOutcome {
    let name = request
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string());
    let email = request.email.unwrap_or_default();

    tracing::warn!(
        "Confirmation for {} <{}> increments the families count on every visit",
        name,
        email
    );

    let before = counter.get_stats().await;
    let stats = counter.increment_families_count().await;
    let stats_updated = stats.families_count > before.families_count;

    if !stats_updated {
        tracing::error!("Confirmation for {} recorded without a stats update", name);
    }

    ConfirmationOutcome {
        name,
        email,
        stats,
        stats_updated,
    }
}
