use ego_tree::NodeId;
use html5ever::tendril::StrTendril as ParserTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use log::debug;
use scraper::node::{Element, Text};
use scraper::{CaseSensitivity, ElementRef, Html, Node, Selector, StrTendril};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Structural change under `<body>`, reported to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Added { parent: NodeId, node: NodeId },
    Removed { parent: NodeId, node: NodeId },
}

/// A parsed document that can be edited in place. Node ids stay valid after
/// a node is detached, so a removed subtree can still be read and written.
#[derive(Debug)]
pub struct Page {
    html: Html,
    observer: Option<UnboundedSender<Mutation>>,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        let html = Html::parse_document(html);
        debug!("Parsed page with {} nodes", html.tree.nodes().count());
        Page {
            html,
            observer: None,
        }
    }

    /// Starts reporting child list changes anywhere below `<body>`. Replaces
    /// any earlier observer.
    pub fn observe(&mut self) -> UnboundedReceiver<Mutation> {
        let (sender, receiver) = unbounded_channel();
        self.observer = Some(sender);
        receiver
    }

    pub fn disconnect(&mut self) {
        self.observer = None;
    }

    fn notify(&self, mutation: Mutation) {
        let Some(observer) = &self.observer else {
            return;
        };
        let (Mutation::Added { parent, .. } | Mutation::Removed { parent, .. }) = mutation;
        if !self.is_within(parent, self.body()) {
            return;
        }
        if observer.send(mutation).is_err() {
            debug!("Mutation observer is gone, dropping {:?}", mutation);
        }
    }

    /// The `<body>` element, or the `<html>` element when there is none.
    pub fn body(&self) -> NodeId {
        let root = self.html.root_element();
        root.child_elements()
            .find(|child| child.value().name() == "body")
            .unwrap_or(root)
            .id()
    }

    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        std::iter::successors(Some(node), |current| self.parent(*current)).any(|n| n == ancestor)
    }

    pub fn create_element(&mut self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let attributes = attributes
            .iter()
            .map(|(name, value)| attribute(name, value))
            .collect();
        let name = QualName::new(
            None,
            Namespace::from(HTML_NAMESPACE),
            LocalName::from(tag.to_lowercase().as_str()),
        );
        self.html
            .tree
            .orphan(Node::Element(Element::new(name, attributes)))
            .id()
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.html
            .tree
            .orphan(Node::Text(Text {
                text: StrTendril::from_slice(text),
            }))
            .id()
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.is_within(parent, child) {
            return;
        }
        let old_parent = self.parent(child);
        let Some(mut parent_node) = self.html.tree.get_mut(parent) else {
            return;
        };
        parent_node.append_id(child);

        if let Some(old_parent) = old_parent {
            self.notify(Mutation::Removed {
                parent: old_parent,
                node: child,
            });
        }
        self.notify(Mutation::Added {
            parent,
            node: child,
        });
    }

    /// Inserts `node` right after `reference`. Returns false when `reference`
    /// has no parent to insert into.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> bool {
        let Some(parent) = self.parent(reference) else {
            return false;
        };
        if reference == node || self.is_within(reference, node) {
            return false;
        }
        let old_parent = self.parent(node);
        let Some(mut reference_node) = self.html.tree.get_mut(reference) else {
            return false;
        };
        reference_node.insert_id_after(node);

        if let Some(old_parent) = old_parent {
            self.notify(Mutation::Removed {
                parent: old_parent,
                node,
            });
        }
        self.notify(Mutation::Added { parent, node });
        true
    }

    pub fn remove(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(mut detached) = self.html.tree.get_mut(node) {
            detached.detach();
        }
        self.notify(Mutation::Removed { parent, node });
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.html.tree.get(node)?.parent().map(|parent| parent.id())
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(node)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        ElementRef::wrap(self.html.tree.get(node)?)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|element| element.value().name())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.value().attr(name)
    }

    /// Attribute changes are not reported to the observer.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(mut target) = self.html.tree.get_mut(node) else {
            return;
        };
        let Node::Element(element) = target.value() else {
            return;
        };

        let replaced = attribute(name, value);
        let mut attributes: Vec<Attribute> = element
            .attrs
            .iter()
            .filter(|(existing, _)| *existing != replaced.name)
            .map(|(existing, current)| Attribute {
                name: existing.clone(),
                value: ParserTendril::from_slice(current),
            })
            .collect();
        attributes.push(replaced);
        // Rebuilt rather than patched so the cached id and class lists stay in sync.
        *element = Element::new(element.name.clone(), attributes);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|element| {
            element
                .value()
                .has_class(class, CaseSensitivity::CaseSensitive)
        })
    }

    /// Replaces the children of `node` with a single text node.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        for child in self.children(node) {
            self.remove(child);
        }
        let text_node = self.create_text(text);
        self.append_child(node, text_node);
    }

    pub fn text_content(&self, node: NodeId) -> String {
        self.html
            .tree
            .get(node)
            .map(|node| {
                node.descendants()
                    .filter_map(|descendant| descendant.value().as_text())
                    .map(|text| &**text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// All nodes below `node` in document order, `node` excluded.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(node)
            .map(|node| node.descendants().skip(1).map(|d| d.id()).collect())
            .unwrap_or_default()
    }

    pub fn find_descendant(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        self.element(node)?.select(selector).next().map(|found| found.id())
    }

    /// Attached elements matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.html
            .root_element()
            .select(selector)
            .map(|element| element.id())
            .collect()
    }

    pub fn select_first(&self, selector: &Selector) -> Option<NodeId> {
        self.html
            .root_element()
            .select(selector)
            .next()
            .map(|element| element.id())
    }

    pub fn to_html(&self) -> String {
        self.html.html()
    }
}

fn attribute(name: &str, value: &str) -> Attribute {
    Attribute {
        name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
        value: ParserTendril::from_slice(value),
    }
}
