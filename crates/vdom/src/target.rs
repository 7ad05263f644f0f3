//! Capabilities the reconciler needs from whatever holds the real nodes.

use core::fmt::Debug;
use core::hash::Hash;

use anyhow::Result;

/// A mutable tree of real nodes the reconciler writes into.
///
/// Implementations own their nodes and hand out cheap `Copy` handles. Every
/// mutating call may fail (stale handle, wrong node kind, ...); the reconciler
/// propagates those failures to its caller untouched.
pub trait RenderTarget {
    type Node: Copy + Eq + Hash + Debug;

    fn create_element(&mut self, tag: &str) -> Result<Self::Node>;
    fn create_text(&mut self, text: &str) -> Result<Self::Node>;

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str) -> Result<()>;
    fn remove_attribute(&mut self, node: Self::Node, name: &str) -> Result<()>;
    fn set_style(&mut self, node: Self::Node, name: &str, value: &str) -> Result<()>;
    /// Resets a style property to its default (unset) value.
    fn clear_style(&mut self, node: Self::Node, name: &str) -> Result<()>;
    fn set_text(&mut self, node: Self::Node, text: &str) -> Result<()>;

    /// Appends `child` as the last child of `parent`, detaching it first if attached.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node) -> Result<()>;
    /// Inserts `child` under `parent` right before `reference`, or appends when
    /// `reference` is `None`. An attached `child` is moved.
    fn insert_before(
        &mut self,
        parent: Self::Node,
        child: Self::Node,
        reference: Option<Self::Node>,
    ) -> Result<()>;
    /// Puts `new` at the position of `old` and drops `old` with its subtree.
    fn replace_node(&mut self, old: Self::Node, new: Self::Node) -> Result<()>;
    /// Detaches `node` from its parent and drops it with its subtree.
    fn remove_node(&mut self, node: Self::Node) -> Result<()>;
    /// Drops every child of `parent`.
    fn clear_children(&mut self, parent: Self::Node) -> Result<()>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;
}
