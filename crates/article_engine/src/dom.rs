use ego_tree::NodeId;
use scraper::{ElementRef, Html};

/// Mutable view over a parsed HTML document.
///
/// Nodes are addressed by `NodeId` handles so callers can collect matches
/// first and detach them afterwards. A removed node and its subtree are no
/// longer visible to any query.
pub struct PageTree {
    html: Html,
}

impl PageTree {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn root(&self) -> NodeId {
        self.html.tree.root().id()
    }

    /// First element named `tag` below `scope`, in document order.
    pub fn find_first(&self, scope: NodeId, tag: &str) -> Option<NodeId> {
        self.elements_under(scope)
            .find(|element| element.value().name().eq_ignore_ascii_case(tag))
            .map(|element| element.id())
    }

    /// All elements below `scope` whose name is one of `tags`.
    pub fn find_all(&self, scope: NodeId, tags: &[&str]) -> Vec<NodeId> {
        self.find_where(scope, |element| {
            let name = element.value().name();
            tags.iter().any(|tag| name.eq_ignore_ascii_case(tag))
        })
    }

    pub fn find_where<F>(&self, scope: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: Fn(ElementRef<'_>) -> bool,
    {
        self.elements_under(scope)
            .filter(|element| predicate(*element))
            .map(|element| element.id())
            .collect()
    }

    pub fn remove(&mut self, node: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(node) {
            node.detach();
        }
    }

    /// Text content with runs of whitespace collapsed to one space.
    pub fn text(&self, node: NodeId) -> String {
        self.element(node)
            .map(|element| {
                element
                    .text()
                    .collect::<String>()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        self.element(node)
            .map(|element| element.html())
            .unwrap_or_default()
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(node).and_then(ElementRef::wrap)
    }

    fn elements_under(&self, scope: NodeId) -> impl Iterator<Item = ElementRef<'_>> {
        self.html
            .tree
            .get(scope)
            .into_iter()
            .flat_map(|node| node.descendants().skip(1))
            .filter_map(ElementRef::wrap)
    }
}
