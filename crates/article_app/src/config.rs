//! Optional `harvest.ron` overrides for the built-in site settings.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use article_engine::{
    CollisionPolicy, ContentRules, FetchSettings, RunConfig, DEFAULT_ARTICLE_PREFIX,
    DEFAULT_BASE_URL, DEFAULT_LISTING_PATH, DEFAULT_OUTPUT_DIR,
};
use engine_logging::{engine_info, engine_warn};
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "harvest.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum CollisionSetting {
    Overwrite,
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub base_url: String,
    pub listing_path: String,
    pub article_prefix: String,
    pub output_dir: PathBuf,
    pub collision: CollisionSetting,
    pub promo_marker: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing_path: DEFAULT_LISTING_PATH.to_string(),
            article_prefix: DEFAULT_ARTICLE_PREFIX.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            collision: CollisionSetting::Overwrite,
            promo_marker: ContentRules::default().promo_marker,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
        }
    }
}

impl AppConfig {
    pub(crate) fn into_run_config(self) -> RunConfig {
        let content = ContentRules {
            promo_marker: self.promo_marker,
            ..ContentRules::default()
        };
        let fetch = FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchSettings::default()
        };
        RunConfig {
            base_url: self.base_url,
            listing_path: self.listing_path,
            article_prefix: self.article_prefix,
            output_dir: self.output_dir,
            collision_policy: match self.collision {
                CollisionSetting::Overwrite => CollisionPolicy::Overwrite,
                CollisionSetting::Suffix => CollisionPolicy::Suffix,
            },
            content,
            fetch,
        }
    }
}

/// Reads the config file, falling back to defaults when it is missing or broken.
pub(crate) fn load_config(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return AppConfig::default();
        }
        Err(err) => {
            engine_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            engine_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            engine_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}
