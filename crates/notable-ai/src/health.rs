//! Full-service health probe.

use tracing::{info, warn};
use uuid::Uuid;

use notable_core::{HealthChecks, HealthReport, SummaryRepository, TextGenerator};

use crate::gemini::GeminiClient;

const STORAGE_PROBE_MODEL: &str = "health-check";
const STORAGE_PROBE_CONTENT: &str = "health check probe";

/// Probe configuration, generation, and storage in one pass.
///
/// The storage probe writes and deletes a summary row under a synthetic note
/// id; summaries are not foreign-keyed to notes precisely so this round-trip
/// can run without touching user data. Never raises: every failure lands in
/// the report.
pub async fn health_check_full(
    client: &GeminiClient,
    summaries: &dyn SummaryRepository,
) -> HealthReport {
    let config = client.config().validate().is_ok();
    let generation = if config {
        client.health_check().await
    } else {
        false
    };
    let storage = storage_round_trip(summaries).await;

    let checks = HealthChecks {
        config,
        generation,
        storage,
    };
    let success = checks.all_healthy();

    if success {
        info!(
            subsystem = "ai",
            component = "health",
            "Health check passed"
        );
    } else {
        warn!(
            subsystem = "ai",
            component = "health",
            config,
            generation,
            storage,
            "Health check failed"
        );
    }

    HealthReport {
        success,
        error: (!success).then(|| describe_failure(&checks)),
        checks,
    }
}

async fn storage_round_trip(summaries: &dyn SummaryRepository) -> bool {
    let probe_id = Uuid::new_v4();

    let written = match summaries
        .upsert(probe_id, STORAGE_PROBE_MODEL, STORAGE_PROBE_CONTENT)
        .await
    {
        Ok(_) => true,
        Err(error) => {
            warn!(
                subsystem = "ai",
                component = "health",
                error = %error,
                "Storage probe write failed"
            );
            false
        }
    };

    if !written {
        return false;
    }

    match summaries.delete_for_note(probe_id).await {
        Ok(deleted) => deleted,
        Err(error) => {
            warn!(
                subsystem = "ai",
                component = "health",
                error = %error,
                "Storage probe cleanup failed"
            );
            false
        }
    }
}

fn describe_failure(checks: &HealthChecks) -> String {
    let mut failed = Vec::new();
    if !checks.config {
        failed.push("config");
    }
    if !checks.generation {
        failed.push("generation");
    }
    if !checks.storage {
        failed.push("storage");
    }
    format!("Unhealthy subsystems: {}", failed.join(", "))
}
