//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::info;

/// Ensure the upload directory exists, creating it (and parents) when missing.
pub async fn ensure_upload_dir(upload_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(upload_dir).await.is_err() {
        info!(%upload_dir, "upload directory missing; creating");
    }
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {upload_dir}: {e}"))?;
    Ok(())
}
