use crate::error::MirrorError;
use log::info;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// The per-run log file. Truncated when opened, flushed after every line so
/// the file reflects the run up to the point of any abort.
pub struct RunLog {
    file: File,
}

impl RunLog {
    pub async fn create(path: &Path) -> Result<Self, MirrorError> {
        let file = File::create(path).await?;
        Ok(Self { file })
    }

    pub async fn line(&mut self, message: &str) -> Result<(), MirrorError> {
        info!("{}", message);
        self.file.write_all(message.as_bytes()).await?;
        self.file.write_all(b"\n").await?;
        self.file.flush().await?;
        Ok(())
    }

    pub async fn close(mut self) -> Result<(), MirrorError> {
        self.file.flush().await?;
        self.file.sync_all().await?;
        Ok(())
    }
}
