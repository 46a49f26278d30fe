use std::collections::BTreeSet;

use engine_logging::engine_debug;

use crate::article::scrape_article;
use crate::config::{LinkRules, RunConfig};
use crate::convert::HtmdConverter;
use crate::extract::{BlogArticleExtractor, Extractor};
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::links::extract_article_links;
use crate::persist::{ensure_output_dir, ArticleWriter, PersistError};
use crate::progress::ProgressSink;
use crate::{FetchError, RunEvent, RunSummary};

/// Runs the listing → articles → files pipeline for one site.
///
/// Articles are fetched one at a time in link order. Fetch failures and
/// empty articles are reported and skipped; only a failure to write output
/// ends the run early.
pub struct Harvester {
    listing_url: String,
    link_rules: LinkRules,
    fetcher: Box<dyn Fetcher>,
    extractor: Box<dyn Extractor>,
    writer: ArticleWriter,
}

impl Harvester {
    /// Harvester backed by reqwest and the htmd-based article extractor.
    pub fn new(config: RunConfig) -> Result<Self, FetchError> {
        let fetcher = ReqwestFetcher::new(config.fetch.clone())?;
        let extractor = BlogArticleExtractor::new(config.content.clone(), HtmdConverter::new());
        Ok(Self::with_parts(config, Box::new(fetcher), Box::new(extractor)))
    }

    pub fn with_parts(
        config: RunConfig,
        fetcher: Box<dyn Fetcher>,
        extractor: Box<dyn Extractor>,
    ) -> Self {
        Self {
            listing_url: config.listing_url(),
            link_rules: config.link_rules(),
            fetcher,
            extractor,
            writer: ArticleWriter::new(config.output_dir, config.collision_policy),
        }
    }

    pub fn listing_url(&self) -> &str {
        &self.listing_url
    }

    pub async fn discover_links(&self) -> Result<BTreeSet<String>, FetchError> {
        let page = self.fetcher.fetch(&self.listing_url).await?;
        Ok(extract_article_links(&page.html, &self.link_rules))
    }

    pub async fn run(&mut self, sink: &dyn ProgressSink) -> Result<RunSummary, PersistError> {
        ensure_output_dir(self.writer.dir())?;
        let mut summary = RunSummary {
            output_dir: self.writer.dir().to_path_buf(),
            ..RunSummary::default()
        };

        let links = match self.discover_links().await {
            Ok(links) => links,
            Err(error) => {
                sink.emit(RunEvent::ListingFailed {
                    url: self.listing_url.clone(),
                    error,
                });
                sink.emit(RunEvent::Finished(summary.clone()));
                return Ok(summary);
            }
        };
        summary.discovered = links.len();
        sink.emit(RunEvent::LinksDiscovered { count: links.len() });

        let total = links.len();
        for (idx, url) in links.into_iter().enumerate() {
            sink.emit(RunEvent::ArticleStarted {
                index: idx + 1,
                total,
                url: url.clone(),
            });

            let record = match scrape_article(self.fetcher.as_ref(), self.extractor.as_ref(), &url).await
            {
                Ok(record) => record,
                Err(error) => {
                    summary.failed += 1;
                    sink.emit(RunEvent::ArticleFailed { url, error });
                    continue;
                }
            };

            if !record.has_content() {
                summary.skipped += 1;
                sink.emit(RunEvent::ArticleSkipped { url });
                continue;
            }

            let path = self.writer.write(&record)?;
            engine_debug!("Wrote {:?} for {}", path, url);
            summary.saved += 1;
            sink.emit(RunEvent::ArticleSaved { url, path });
        }

        sink.emit(RunEvent::Finished(summary.clone()));
        Ok(summary)
    }
}
