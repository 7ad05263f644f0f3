//! In-memory arena DOM implementing [`RenderTarget`].
//!
//! Nodes live in an [`indextree::Arena`]; the handles the reconciler stores on
//! virtual nodes are plain [`NodeId`]s into it. Every mutation is appended to a
//! journal so callers can inspect exactly what a pass did.

mod printing;
mod updating;

use core::mem;

use anyhow::{Result, anyhow, bail};
use indextree::{Arena, Node};
use smallvec::SmallVec;

pub use indextree::NodeId;
pub use updating::DomMutation;

use crate::node::VNode;
use crate::target::RenderTarget;

/// Virtual node bound to this DOM's handles.
pub type DomVNode = VNode<NodeId>;

type Pairs = SmallVec<(String, String), 4>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DomNode {
    pub kind: NodeKind,
    pub attrs: Pairs,
    pub styles: Pairs,
}

impl DomNode {
    fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.to_owned(),
            },
            ..Self::default()
        }
    }

    fn text(text: &str) -> Self {
        Self {
            kind: NodeKind::Text {
                text: text.to_owned(),
            },
            ..Self::default()
        }
    }
}

fn lookup<'pairs>(pairs: &'pairs Pairs, name: &str) -> Option<&'pairs str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn upsert(pairs: &mut Pairs, name: &str, value: &str) {
    if let Some(slot) = pairs.iter_mut().find(|(key, _)| key == name) {
        value.clone_into(&mut slot.1);
    } else {
        pairs.push((name.to_owned(), value.to_owned()));
    }
}

/// Headless document tree.
pub struct Dom {
    dom: Arena<DomNode>,
    root: NodeId,
    journal: Vec<DomMutation>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    pub fn new() -> Self {
        let mut dom = Arena::new();
        Self {
            root: dom.new_node(DomNode::default()),
            dom,
            journal: Vec::new(),
        }
    }

    /// The document node. It cannot be removed.
    #[inline]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Appends a fresh element under the document, for use as a mount placeholder.
    ///
    /// # Errors
    /// Fails for an empty tag.
    pub fn mount_point(&mut self, tag: &str) -> Result<NodeId> {
        let node = self.create_element(tag)?;
        self.append_child(self.root, node)?;
        Ok(node)
    }

    /// Whether `id` refers to a live node of this document.
    pub fn contains(&self, id: NodeId) -> bool {
        self.dom.get(id).is_some() && !id.is_removed(&self.dom)
    }

    pub fn node(&self, id: NodeId) -> Option<&DomNode> {
        self.live(id).ok().map(Node::get)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        if self.contains(id) {
            id.children(&self.dom).collect()
        } else {
            Vec::new()
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.kind {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Document | NodeKind::Text { .. } => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        lookup(&self.node(id)?.attrs, name)
    }

    pub fn style(&self, id: NodeId, name: &str) -> Option<&str> {
        lookup(&self.node(id)?.styles, name)
    }

    /// Concatenated text of `id` and all its descendants, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        if !self.contains(id) {
            return String::new();
        }
        id.descendants(&self.dom)
            .filter_map(|desc| match &self.dom.get(desc)?.get().kind {
                NodeKind::Text { text } => Some(text.as_str()),
                NodeKind::Document | NodeKind::Element { .. } => None,
            })
            .collect()
    }

    /// Every mutation applied since construction or the last clear.
    #[inline]
    pub fn mutations(&self) -> &[DomMutation] {
        &self.journal
    }

    pub fn count_mutations(&self, pred: impl Fn(&DomMutation) -> bool) -> usize {
        self.journal.iter().filter(|mutation| pred(mutation)).count()
    }

    #[inline]
    pub fn take_mutations(&mut self) -> Vec<DomMutation> {
        mem::take(&mut self.journal)
    }

    #[inline]
    pub fn clear_mutations(&mut self) {
        self.journal.clear();
    }

    fn live(&self, id: NodeId) -> Result<&Node<DomNode>> {
        if !self.contains(id) {
            bail!("node {id:?} is not part of this document");
        }
        self.dom
            .get(id)
            .ok_or_else(|| anyhow!("node {id:?} is not part of this document"))
    }

    fn live_mut(&mut self, id: NodeId) -> Result<&mut DomNode> {
        if !self.contains(id) {
            bail!("node {id:?} is not part of this document");
        }
        self.dom
            .get_mut(id)
            .map(Node::get_mut)
            .ok_or_else(|| anyhow!("node {id:?} is not part of this document"))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut DomNode> {
        let node = self.live_mut(id)?;
        if !matches!(node.kind, NodeKind::Element { .. }) {
            bail!("node {id:?} is not an element");
        }
        Ok(node)
    }

    /// Parent of an attached, live node.
    fn attached_parent(&self, id: NodeId) -> Result<NodeId> {
        self.live(id)?
            .parent()
            .ok_or_else(|| anyhow!("node {id:?} is detached"))
    }

    fn place(&mut self, parent: NodeId, child: NodeId, before: Option<NodeId>) -> Result<()> {
        self.live(parent)?;
        self.live(child)?;
        if child == self.root {
            bail!("the document node cannot be moved");
        }
        let moved = self.dom[child].parent() == Some(parent);
        match before {
            Some(reference) if reference == child => return Ok(()),
            Some(reference) => {
                if self.live(reference)?.parent() != Some(parent) {
                    bail!("node {reference:?} is not a child of {parent:?}");
                }
                reference
                    .checked_insert_before(child, &mut self.dom)
                    .map_err(|err| anyhow!("cannot insert {child:?} before {reference:?}: {err:?}"))?;
            }
            None => {
                parent
                    .checked_append(child, &mut self.dom)
                    .map_err(|err| anyhow!("cannot append {child:?} to {parent:?}: {err:?}"))?;
            }
        }
        self.journal.push(if moved {
            DomMutation::Move {
                parent,
                node: child,
                before,
            }
        } else {
            DomMutation::Insert {
                parent,
                node: child,
                before,
            }
        });
        Ok(())
    }
}

impl RenderTarget for Dom {
    type Node = NodeId;

    fn create_element(&mut self, tag: &str) -> Result<NodeId> {
        if tag.is_empty() {
            bail!("cannot create an element with an empty tag");
        }
        let node = self.dom.new_node(DomNode::element(tag));
        self.journal.push(DomMutation::CreateElement {
            node,
            tag: tag.to_owned(),
        });
        Ok(node)
    }

    fn create_text(&mut self, text: &str) -> Result<NodeId> {
        let node = self.dom.new_node(DomNode::text(text));
        self.journal.push(DomMutation::CreateText {
            node,
            text: text.to_owned(),
        });
        Ok(node)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        upsert(&mut self.element_mut(node)?.attrs, name, value);
        self.journal.push(DomMutation::SetAttr {
            node,
            name: name.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<()> {
        self.element_mut(node)?.attrs.retain(|(key, _)| key != name);
        self.journal.push(DomMutation::RemoveAttr {
            node,
            name: name.to_owned(),
        });
        Ok(())
    }

    fn set_style(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        upsert(&mut self.element_mut(node)?.styles, name, value);
        self.journal.push(DomMutation::SetStyle {
            node,
            name: name.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    fn clear_style(&mut self, node: NodeId, name: &str) -> Result<()> {
        self.element_mut(node)?.styles.retain(|(key, _)| key != name);
        self.journal.push(DomMutation::ClearStyle {
            node,
            name: name.to_owned(),
        });
        Ok(())
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        match &mut self.live_mut(node)?.kind {
            NodeKind::Text { text: content } => text.clone_into(content),
            NodeKind::Document | NodeKind::Element { .. } => {
                bail!("node {node:?} is not a text node")
            }
        }
        self.journal.push(DomMutation::SetText {
            node,
            text: text.to_owned(),
        });
        Ok(())
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.place(parent, child, None)
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        self.place(parent, child, reference)
    }

    fn replace_node(&mut self, old: NodeId, new: NodeId) -> Result<()> {
        let parent = self.attached_parent(old)?;
        self.live(new)?;
        if old == new {
            return Ok(());
        }
        old.checked_insert_before(new, &mut self.dom)
            .map_err(|err| anyhow!("cannot replace {old:?} with {new:?}: {err:?}"))?;
        old.remove_subtree(&mut self.dom);
        self.journal.push(DomMutation::Replace { parent, old, new });
        Ok(())
    }

    fn remove_node(&mut self, node: NodeId) -> Result<()> {
        let parent = self.attached_parent(node)?;
        node.remove_subtree(&mut self.dom);
        self.journal.push(DomMutation::Remove { parent, node });
        Ok(())
    }

    fn clear_children(&mut self, parent: NodeId) -> Result<()> {
        self.live(parent)?;
        let children: Vec<NodeId> = parent.children(&self.dom).collect();
        for child in children {
            child.remove_subtree(&mut self.dom);
        }
        self.journal.push(DomMutation::ClearChildren { parent });
        Ok(())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.live(node).ok()?.parent()
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.live(node).ok()?.next_sibling()
    }
}
