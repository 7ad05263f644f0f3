//! Virtual node model and the identity predicate the reconciler keys reuse on.
//!
//! A [`VNode`] describes one position of a UI tree before it is rendered. The
//! handle type `N` is whatever the render target hands out for its real nodes
//! (for the arena DOM an [`indextree::NodeId`]). A node only carries a handle
//! after it has been materialized or patched; the handle is an index into the
//! render target's storage, the target keeps ownership of the real node.

use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::props::Props;

/// Identity token for a node among its siblings.
///
/// Integer keys are kept in their decimal form, so `7` and `"7"` are the same
/// key whether they come from the builder or from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(key) => Ok(Self(key)),
            Value::Number(number) if number.is_i64() || number.is_u64() => {
                Ok(Self(number.to_string()))
            }
            other => Err(D::Error::custom(format!(
                "key must be a string or an integer, got {other}"
            ))),
        }
    }
}

impl Key {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Key {
    #[inline]
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for Key {
    #[inline]
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two shapes a virtual node can take. Fixed at construction.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged, bound(deserialize = ""))]
pub enum VNodeKind<N> {
    Element {
        tag: String,
        #[serde(default)]
        data: Props,
        #[serde(default)]
        children: Vec<VNode<N>>,
    },
    Text {
        text: String,
    },
}

/// Description of one tree position.
///
/// Deserializes from the producer shape
/// `{"tag": "li", "key": "a", "data": {"id": "x", "style": {...}}, "children": [...]}`
/// or `{"text": "hello"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = ""))]
pub struct VNode<N> {
    #[serde(default)]
    key: Option<Key>,
    #[serde(flatten)]
    kind: VNodeKind<N>,
    #[serde(skip)]
    el: Option<N>,
}

/// Starts an element node.
#[inline]
pub fn h<N>(tag: impl Into<String>) -> VNode<N> {
    VNode::new_element(tag)
}

/// Creates a text node.
#[inline]
pub fn text<N>(content: impl Into<String>) -> VNode<N> {
    VNode::new_text(content)
}

impl<N> VNode<N> {
    pub fn new_element(tag: impl Into<String>) -> Self {
        Self {
            key: None,
            kind: VNodeKind::Element {
                tag: tag.into(),
                data: Props::default(),
                children: Vec::new(),
            },
            el: None,
        }
    }

    pub fn new_text(content: impl Into<String>) -> Self {
        Self {
            key: None,
            kind: VNodeKind::Text {
                text: content.into(),
            },
            el: None,
        }
    }

    /// Sets the sibling identity key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets an attribute. No effect on text nodes.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNodeKind::Element { data, .. } = &mut self.kind {
            data.insert_attr(name, value);
        }
        self
    }

    /// Sets one style property. No effect on text nodes.
    #[must_use]
    pub fn style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNodeKind::Element { data, .. } = &mut self.kind {
            data.insert_style(name, value);
        }
        self
    }

    /// Replaces the whole property map. No effect on text nodes.
    #[must_use]
    pub fn props(mut self, props: Props) -> Self {
        if let VNodeKind::Element { data, .. } = &mut self.kind {
            *data = props;
        }
        self
    }

    /// Appends a child. No effect on text nodes.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        if let VNodeKind::Element { children, .. } = &mut self.kind {
            children.push(child);
        }
        self
    }

    /// Appends several children in order. No effect on text nodes.
    #[must_use]
    pub fn children(mut self, new_children: impl IntoIterator<Item = Self>) -> Self {
        if let VNodeKind::Element { children, .. } = &mut self.kind {
            children.extend(new_children);
        }
        self
    }

    #[inline]
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    #[inline]
    pub const fn kind(&self) -> &VNodeKind<N> {
        &self.kind
    }

    #[inline]
    pub(crate) fn kind_mut(&mut self) -> &mut VNodeKind<N> {
        &mut self.kind
    }

    #[inline]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, VNodeKind::Text { .. })
    }

    /// Element tag, `None` for text nodes.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            VNodeKind::Element { tag, .. } => Some(tag),
            VNodeKind::Text { .. } => None,
        }
    }

    /// Text content, `None` for elements.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            VNodeKind::Text { text } => Some(text),
            VNodeKind::Element { .. } => None,
        }
    }

    /// Element properties, `None` for text nodes.
    pub fn data(&self) -> Option<&Props> {
        match &self.kind {
            VNodeKind::Element { data, .. } => Some(data),
            VNodeKind::Text { .. } => None,
        }
    }

    /// Child list; always empty for text nodes.
    pub fn child_nodes(&self) -> &[Self] {
        match &self.kind {
            VNodeKind::Element { children, .. } => children,
            VNodeKind::Text { .. } => &[],
        }
    }

    #[inline]
    pub(crate) fn bind(&mut self, el: N) {
        self.el = Some(el);
    }
}

impl<N: Copy> VNode<N> {
    /// Real node this description was last rendered into.
    #[inline]
    pub fn el(&self) -> Option<N> {
        self.el
    }
}

/// Whether two nodes describe the same logical node: matching variant, equal
/// tag for elements, and equal key (an absent key only equals an absent key).
/// Content is not compared.
pub fn is_same_vnode<N>(left: &VNode<N>, right: &VNode<N>) -> bool {
    if left.key != right.key {
        return false;
    }
    match (&left.kind, &right.kind) {
        (VNodeKind::Element { tag: left_tag, .. }, VNodeKind::Element { tag: right_tag, .. }) => {
            left_tag == right_tag
        }
        (VNodeKind::Text { .. }, VNodeKind::Text { .. }) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Node = VNode<u32>;

    #[test]
    fn same_tag_without_keys_is_same() {
        let left: Node = h("div").attr("id", "a");
        let right: Node = h("div").child(text("different content"));
        assert!(is_same_vnode(&left, &right));
    }

    #[test]
    fn different_tags_differ() {
        let left: Node = h("div");
        let right: Node = h("span");
        assert!(!is_same_vnode(&left, &right));
    }

    #[test]
    fn present_key_never_equals_absent_key() {
        let keyed: Node = h("li").with_key("a");
        let plain: Node = h("li");
        assert!(!is_same_vnode(&keyed, &plain));
        assert!(!is_same_vnode(&plain, &keyed));
        assert!(is_same_vnode(&keyed, &h("li").with_key("a")));
        assert!(!is_same_vnode(&keyed, &h("li").with_key("b")));
    }

    #[test]
    fn text_nodes_match_regardless_of_content() {
        let left: Node = text("one");
        let right: Node = text("two");
        assert!(is_same_vnode(&left, &right));
        assert!(!is_same_vnode(&left, &h("one")));
    }

    #[test]
    fn builders_ignore_element_only_calls_on_text() {
        let node: Node = text("x").attr("id", "a").child(h("b"));
        assert!(node.is_text());
        assert!(node.child_nodes().is_empty());
        assert!(node.data().is_none());
    }

    #[test]
    fn numeric_keys_compare_by_rendered_value() {
        let left: Node = h("li").with_key(7u64);
        let right: Node = h("li").with_key("7");
        assert!(is_same_vnode(&left, &right));
    }

    #[test]
    fn deserializes_producer_shape() {
        let node: Node = serde_json::from_value(serde_json::json!({
            "tag": "ul",
            "data": { "id": "list", "style": { "color": "red" } },
            "children": [
                { "tag": "li", "key": "a", "children": [ { "text": "A" } ] },
                { "text": "tail" }
            ]
        }))
        .unwrap();

        assert_eq!(node.tag(), Some("ul"));
        let data = node.data().unwrap();
        assert_eq!(data.attr("id"), Some("list"));
        assert_eq!(data.style("color"), Some("red"));
        assert_eq!(data.attr("style"), None);
        assert_eq!(node.child_nodes().len(), 2);
        assert_eq!(node.child_nodes()[0].key(), Some(&Key::from("a")));
        assert_eq!(node.child_nodes()[1].text_content(), Some("tail"));
        assert!(node.el().is_none());
    }

    #[test]
    fn integer_keys_deserialize_like_builder_keys() {
        let node: Node = serde_json::from_value(serde_json::json!({ "tag": "li", "key": 5 })).unwrap();
        assert_eq!(node.key(), Some(&Key::from(5u64)));
        assert!(is_same_vnode(&node, &h("li").with_key("5")));

        let negative: Node =
            serde_json::from_value(serde_json::json!({ "tag": "li", "key": -2 })).unwrap();
        assert_eq!(negative.key().map(Key::as_str), Some("-2"));
    }

    #[test]
    fn non_scalar_keys_are_rejected() {
        let err = serde_json::from_value::<Key>(serde_json::json!(true)).unwrap_err();
        assert!(err.to_string().contains("key must be a string or an integer"));
        assert!(serde_json::from_value::<Key>(serde_json::json!(1.5)).is_err());
    }

    #[test]
    fn scalar_attribute_values_deserialize() {
        let node: Node = serde_json::from_value(serde_json::json!({
            "tag": "input",
            "data": { "tabindex": 0, "disabled": true }
        }))
        .unwrap();
        let data = node.data().unwrap();
        assert_eq!(data.attr("tabindex"), Some("0"));
        assert_eq!(data.attr("disabled"), Some("true"));
    }
}
