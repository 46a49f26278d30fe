pub const OUTPUT_EXTENSION: &str = "mdx";

const FALLBACK_SLUG: &str = "untitled";

/// Lowercase, filesystem-safe slug for a title.
///
/// Characters other than word characters, whitespace and `-` are dropped and
/// each run of whitespace becomes a single `-`. Applying it to its own output
/// changes nothing.
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_whitespace = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }
    slug
}

/// `<slug>.mdx`, with a fixed stem when the title has no usable characters.
pub fn output_filename(title: &str) -> String {
    let slug = slugify(title);
    let stem = if slug.is_empty() { FALLBACK_SLUG } else { slug.as_str() };
    format!("{stem}.{OUTPUT_EXTENSION}")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
