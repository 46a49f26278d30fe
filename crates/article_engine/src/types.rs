use std::fmt;
use std::path::PathBuf;

/// One scraped article, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub title: String,
    /// Published date as shown on the page; empty when the page has none.
    pub date: String,
    /// Converted Markdown body; empty when no content container was found.
    pub content: String,
    pub url: String,
}

impl ArticleRecord {
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub html: String,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub encoding_label: String,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Progress notifications emitted by the harvester while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    ListingFailed {
        url: String,
        error: FetchError,
    },
    LinksDiscovered {
        count: usize,
    },
    ArticleStarted {
        index: usize,
        total: usize,
        url: String,
    },
    ArticleFailed {
        url: String,
        error: FetchError,
    },
    /// Fetched fine but produced no content to save.
    ArticleSkipped {
        url: String,
    },
    ArticleSaved {
        url: String,
        path: PathBuf,
    },
    Finished(RunSummary),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    pub saved: usize,
    pub failed: usize,
    pub skipped: usize,
    pub output_dir: PathBuf,
}
