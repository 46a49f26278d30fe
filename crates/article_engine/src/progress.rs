use engine_logging::{engine_error, engine_info, engine_warn};

use crate::RunEvent;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: RunEvent);
}

/// Reports run progress through the logging facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: RunEvent) {
        match event {
            RunEvent::ListingFailed { url, error } => {
                engine_error!("❌ Failed to load listing page {}: {}", url, error);
            }
            RunEvent::LinksDiscovered { count } => engine_info!("✅ Found {} articles", count),
            RunEvent::ArticleStarted { index, total, url } => {
                engine_info!("[{}/{}] Scraping: {}", index, total, url);
            }
            RunEvent::ArticleFailed { url, error } => {
                engine_warn!("❌ Failed to scrape: {} ({})", url, error);
            }
            RunEvent::ArticleSkipped { url } => engine_info!("No content to save for {}", url),
            RunEvent::ArticleSaved { path, .. } => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                engine_info!("📄 Saved: {}", name);
            }
            RunEvent::Finished(summary) => engine_info!(
                "🎉 Saved {} of {} articles in {} ({} failed, {} without content)",
                summary.saved,
                summary.discovered,
                summary.output_dir.display(),
                summary.failed,
                summary.skipped
            ),
        }
    }
}
