//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate prepares its
//! directories through the service layer.

/// Ensure the upload root and one sub-directory per upload type exist.
pub async fn ensure_upload_dirs(upload_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_upload_dir(upload_dir).await?;
    for cfg in crate::upload::TYPE_CONFIGS {
        let sub = std::path::Path::new(upload_dir).join(cfg.name);
        tokio::fs::create_dir_all(&sub).await?;
    }
    Ok(())
}
