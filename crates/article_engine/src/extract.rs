use crate::config::{ContentRules, UNTITLED};
use crate::convert::Converter;
use crate::dom::PageTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub title: String,
    pub date: String,
    /// Trimmed Markdown body; empty when the page has no content container.
    pub markdown: String,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedContent;
}

/// Extractor for blog article pages:
/// - title from the first page-level `<h1>`, falling back to "Untitled";
///   the text keeps the page's word breaks with whitespace runs collapsed, so
///   `<h1>Hello <em>World</em></h1>` reads "Hello World" rather than "HelloWorld"
/// - published date from the first `<time>`
/// - body from the `<article>` container, cleaned and converted to Markdown.
pub struct BlogArticleExtractor<C> {
    rules: ContentRules,
    converter: C,
}

impl<C: Converter> BlogArticleExtractor<C> {
    pub fn new(rules: ContentRules, converter: C) -> Self {
        Self { rules, converter }
    }
}

impl<C: Converter> Extractor for BlogArticleExtractor<C> {
    fn extract(&self, html: &str) -> ExtractedContent {
        let mut tree = PageTree::parse(html);
        let root = tree.root();

        let title = tree
            .find_first(root, &self.rules.title_tag)
            .map(|node| tree.text(node))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        let date = tree
            .find_first(root, &self.rules.date_tag)
            .map(|node| tree.text(node))
            .unwrap_or_default();
        let markdown = markdown_from_tree(&mut tree, &self.rules, &self.converter);

        ExtractedContent {
            title,
            date,
            markdown,
        }
    }
}

/// Clean the article container of `html` and convert it to Markdown.
///
/// Returns an empty string when the page has no content container.
pub fn extract_article_markdown(html: &str, rules: &ContentRules, converter: &dyn Converter) -> String {
    let mut tree = PageTree::parse(html);
    markdown_from_tree(&mut tree, rules, converter)
}

/// Outer HTML of the content container after structural, promotional and
/// title removals, or `None` when there is no container.
pub fn clean_content_html(tree: &mut PageTree, rules: &ContentRules) -> Option<String> {
    let container = tree.find_first(tree.root(), &rules.container_tag)?;

    let strip: Vec<&str> = rules.strip_tags.iter().map(String::as_str).collect();
    for node in tree.find_all(container, &strip) {
        tree.remove(node);
    }

    let marker = rules.promo_marker.as_str();
    let promos = tree.find_where(container, |element| {
        element.value().name() == "a"
            && !marker.is_empty()
            && element
                .value()
                .attr("href")
                .is_some_and(|href| href.contains(marker))
    });
    for node in promos {
        tree.remove(node);
    }

    // The title lives in the front matter, keep it out of the body.
    if let Some(heading) = tree.find_first(container, &rules.title_tag) {
        tree.remove(heading);
    }

    Some(tree.outer_html(container))
}

fn markdown_from_tree<C: Converter + ?Sized>(
    tree: &mut PageTree,
    rules: &ContentRules,
    converter: &C,
) -> String {
    clean_content_html(tree, rules)
        .map(|html| converter.to_markdown(&html).trim().to_string())
        .unwrap_or_default()
}
