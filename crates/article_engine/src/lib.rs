//! Article engine: listing discovery, article extraction and `.mdx` output.
mod article;
mod config;
mod convert;
mod decode;
mod dom;
mod extract;
mod fetch;
mod filename;
mod frontmatter;
mod links;
mod persist;
mod pipeline;
mod progress;
mod types;

pub use article::{assemble_article, scrape_article};
pub use config::{
    CollisionPolicy, ContentRules, LinkRules, RunConfig, DEFAULT_ARTICLE_PREFIX, DEFAULT_BASE_URL,
    DEFAULT_LISTING_PATH, DEFAULT_OUTPUT_DIR, UNTITLED,
};
pub use convert::{Converter, HtmdConverter};
pub use decode::{decode_html, DecodedHtml};
pub use dom::PageTree;
pub use extract::{
    clean_content_html, extract_article_markdown, BlogArticleExtractor, ExtractedContent,
    Extractor,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::{output_filename, slugify, OUTPUT_EXTENSION};
pub use frontmatter::build_mdx_document;
pub use links::extract_article_links;
pub use persist::{ensure_output_dir, write_atomically, ArticleWriter, PersistError};
pub use pipeline::Harvester;
pub use progress::{LogProgressSink, ProgressSink};
pub use types::{
    ArticleRecord, FailureKind, FetchError, FetchMetadata, FetchedPage, RunEvent, RunSummary,
};
