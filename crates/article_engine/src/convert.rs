use engine_logging::engine_warn;
use htmd::options::{HeadingStyle, Options};
use htmd::HtmlToMarkdown;

pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

/// HTML to Markdown via htmd, with `#`-prefixed headings.
pub struct HtmdConverter {
    inner: HtmlToMarkdown,
}

impl HtmdConverter {
    pub fn new() -> Self {
        let inner = HtmlToMarkdown::builder()
            .options(Options {
                heading_style: HeadingStyle::Atx,
                ..Options::default()
            })
            .skip_tags(vec!["script", "style", "noscript", "iframe", "template"])
            .build();
        Self { inner }
    }
}

impl Default for HtmdConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for HtmdConverter {
    fn to_markdown(&self, html: &str) -> String {
        match self.inner.convert(html) {
            Ok(markdown) => markdown,
            Err(err) => {
                engine_warn!("Markdown conversion failed: {}", err);
                String::new()
            }
        }
    }
}
