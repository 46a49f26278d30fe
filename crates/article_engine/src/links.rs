use std::collections::BTreeSet;

use engine_logging::{engine_debug, engine_warn};
use scraper::{Html, Selector};
use url::Url;

use crate::config::LinkRules;

/// Collect the article URLs linked from a listing page.
///
/// Every `href` is resolved against the site base URL. A link is kept when it
/// stays on the base host and its path sits under the article prefix without
/// being the listing page itself. Fragments are dropped so in-page anchors of
/// the same article collapse into one entry.
pub fn extract_article_links(html: &str, rules: &LinkRules) -> BTreeSet<String> {
    let mut links = BTreeSet::new();
    let base = match Url::parse(&rules.base_url) {
        Ok(base) => base,
        Err(err) => {
            engine_warn!("Invalid base url {:?}: {}", rules.base_url, err);
            return links;
        }
    };
    let Ok(anchor_sel) = Selector::parse("a[href]") else {
        return links;
    };

    let document = Html::parse_document(html);
    for anchor in document.select(&anchor_sel) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(mut url) = resolve_url(href, &base) else {
            continue;
        };
        if is_article_url(&url, &base, &rules.article_prefix) {
            url.set_fragment(None);
            links.insert(String::from(url));
        }
    }

    engine_debug!("Listing page yielded {} article links", links.len());
    links
}

fn is_article_url(url: &Url, base: &Url, prefix: &str) -> bool {
    if !matches!(url.scheme(), "http" | "https") || url.host_str() != base.host_str() {
        return false;
    }
    let path = url.path();
    path.starts_with(prefix) && path.trim_end_matches('/') != prefix.trim_end_matches('/')
}

fn resolve_url(reference: &str, base: &Url) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") || lower.starts_with("mailto:") {
        return None;
    }
    base.join(trimmed).ok()
}
