use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::{ArticleRecord, FetchError};

/// Fetch one article page and assemble its record.
///
/// A record with empty `content` is still returned; deciding whether it is
/// worth saving is up to the caller.
pub async fn scrape_article(
    fetcher: &dyn Fetcher,
    extractor: &dyn Extractor,
    url: &str,
) -> Result<ArticleRecord, FetchError> {
    let page = fetcher.fetch(url).await?;
    Ok(assemble_article(extractor, &page.html, url))
}

pub fn assemble_article(extractor: &dyn Extractor, html: &str, url: &str) -> ArticleRecord {
    let extracted = extractor.extract(html);
    ArticleRecord {
        title: extracted.title,
        date: extracted.date,
        content: extracted.markdown,
        url: url.to_string(),
    }
}
