use crate::ArticleRecord;

/// Render the `.mdx` document for a record: quoted front matter, blank line, body.
pub fn build_mdx_document(record: &ArticleRecord) -> String {
    format!(
        "---\ntitle: {title}\ndate: {date}\nsource: {source}\n---\n\n{body}",
        title = quoted(&record.title),
        date = quoted(&record.date),
        source = quoted(&record.url),
        body = record.content,
    )
}

/// YAML double-quoted scalar.
fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' | '\r' => out.push(' '),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
