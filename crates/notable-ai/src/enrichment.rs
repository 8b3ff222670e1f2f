//! Fire-and-forget note enrichment.
//!
//! Runs summary and tag generation for a freshly saved note off the request
//! path. Contract: failures are logged and dropped, never retried here (the
//! generation client owns retry) and never surfaced to the caller. The
//! returned handle exists for tests and shutdown hooks; request handlers must
//! not await it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::summary::SummaryService;
use crate::tags::TagService;

/// Spawn summary and tag generation for a note as one background task.
///
/// The two generations run concurrently inside the task.
pub fn spawn_note_enrichment(
    summaries: Arc<SummaryService>,
    tags: Arc<TagService>,
    note_id: Uuid,
    content: String,
    user_id: Uuid,
) -> JoinHandle<()> {
    debug!(
        subsystem = "ai",
        component = "enrichment",
        note_id = %note_id,
        content_len = content.len(),
        "Scheduling note enrichment"
    );

    tokio::spawn(async move {
        let (summary, tag) = tokio::join!(
            summaries.generate(note_id, &content, user_id),
            tags.generate(note_id, &content, user_id),
        );

        if let Some(error) = summary.error {
            warn!(
                subsystem = "ai",
                component = "enrichment",
                note_id = %note_id,
                error = %error,
                "Background summary generation failed"
            );
        }
        if let Some(error) = tag.error {
            warn!(
                subsystem = "ai",
                component = "enrichment",
                note_id = %note_id,
                error = %error,
                "Background tag generation failed"
            );
        }

        if summary.success && tag.success {
            info!(
                subsystem = "ai",
                component = "enrichment",
                note_id = %note_id,
                "Note enrichment complete"
            );
        }
    })
}
