use std::path::PathBuf;

use crate::fetch::FetchSettings;

pub const DEFAULT_BASE_URL: &str = "https://maximilian-schwarzmueller.com";
pub const DEFAULT_LISTING_PATH: &str = "/articles";
pub const DEFAULT_ARTICLE_PREFIX: &str = "/articles/";
pub const DEFAULT_OUTPUT_DIR: &str = "articles";
pub const UNTITLED: &str = "Untitled";

/// Which elements of an article page carry what.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRules {
    pub container_tag: String,
    pub title_tag: String,
    pub date_tag: String,
    /// Structural elements dropped from the container before conversion.
    pub strip_tags: Vec<String>,
    /// Links whose href contains this marker are advertising and removed with their text.
    pub promo_marker: String,
}

impl Default for ContentRules {
    fn default() -> Self {
        Self {
            container_tag: "article".to_string(),
            title_tag: "h1".to_string(),
            date_tag: "time".to_string(),
            strip_tags: vec!["nav".to_string(), "footer".to_string(), "aside".to_string()],
            promo_marker: "acad.link".to_string(),
        }
    }
}

/// Which links on the listing page count as articles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRules {
    pub base_url: String,
    pub article_prefix: String,
}

impl Default for LinkRules {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            article_prefix: DEFAULT_ARTICLE_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// A later article with the same slug replaces the earlier file.
    #[default]
    Overwrite,
    /// Names already written during the run get a `-2`, `-3`, ... suffix.
    Suffix,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub base_url: String,
    pub listing_path: String,
    pub article_prefix: String,
    pub output_dir: PathBuf,
    pub collision_policy: CollisionPolicy,
    pub content: ContentRules,
    pub fetch: FetchSettings,
}

impl RunConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ..Self::default()
        }
    }

    pub fn listing_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.listing_path
        )
    }

    pub fn link_rules(&self) -> LinkRules {
        LinkRules {
            base_url: self.base_url.clone(),
            article_prefix: self.article_prefix.clone(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            article_prefix: DEFAULT_ARTICLE_PREFIX.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            collision_policy: CollisionPolicy::default(),
            content: ContentRules::default(),
            fetch: FetchSettings::default(),
        }
    }
}
