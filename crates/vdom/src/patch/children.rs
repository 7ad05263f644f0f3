//! Keyed two-ended diff of sibling lists.
//!
//! Both lists are walked from their ends inwards. The four end-to-end
//! comparisons cover unchanged lists, appends, prepends, removals and single
//! moves without allocating. Only when none of them match is a key → old index
//! map built (lazily by default) to find the new head among the remaining old
//! window.
//!
//! Windows are half-open: `old_start..old_end` and `new_start..new_end`.

use std::collections::HashMap;

use anyhow::{Result, bail};
use log::trace;

use super::Reconciler;
use crate::config::KeyMapStrategy;
use crate::node::{Key, VNode, is_same_vnode};
use crate::target::RenderTarget;

/// Lookup from key to old child index plus the slots already taken by the
/// keyed path.
struct KeyIndex<'tree> {
    by_key: HashMap<&'tree Key, usize>,
    consumed: Vec<bool>,
}

impl<'tree> KeyIndex<'tree> {
    fn build<N>(old_children: &'tree [VNode<N>], start: usize, end: usize) -> Self {
        // Later duplicates win; duplicate keys are unsupported.
        let by_key = old_children[start..end]
            .iter()
            .enumerate()
            .filter_map(|(offset, child)| child.key().map(|key| (key, start + offset)))
            .collect();
        Self {
            by_key,
            consumed: vec![false; old_children.len()],
        }
    }

    /// Old index holding `key`, if it is still inside the window and unused.
    fn find(&self, key: &Key, start: usize, end: usize) -> Option<usize> {
        self.by_key
            .get(key)
            .copied()
            .filter(|&idx| idx >= start && idx < end && !self.consumed[idx])
    }
}

fn is_consumed(index: Option<&KeyIndex<'_>>, idx: usize) -> bool {
    index.is_some_and(|keys| keys.consumed[idx])
}

impl<T: RenderTarget> Reconciler<'_, T> {
    /// Reconciles two non-empty child lists of `parent`.
    ///
    /// Under `strict_handles` an old child without a real node fails the
    /// pass before anything is touched.
    pub(super) fn update_children(
        &mut self,
        parent: T::Node,
        old_children: &[VNode<T::Node>],
        new_children: &mut [VNode<T::Node>],
    ) -> Result<()> {
        if self.config.strict_handles
            && let Some(idx) = old_children.iter().position(|child| child.el().is_none())
        {
            bail!("old child {idx} of {parent:?} has no real node bound");
        }

        let mut old_start = 0;
        let mut old_end = old_children.len();
        let mut new_start = 0;
        let mut new_end = new_children.len();

        let mut key_index = match self.config.key_map {
            KeyMapStrategy::Eager => Some(KeyIndex::build(old_children, old_start, old_end)),
            KeyMapStrategy::Lazy => None,
        };

        while old_start < old_end && new_start < new_end {
            if is_consumed(key_index.as_ref(), old_start) {
                old_start += 1;
                continue;
            }
            if is_consumed(key_index.as_ref(), old_end - 1) {
                old_end -= 1;
                continue;
            }

            let old_first = &old_children[old_start];
            let old_last = &old_children[old_end - 1];

            if reusable(old_first, &new_children[new_start]) {
                self.patch_vnode(old_first, &mut new_children[new_start])?;
                old_start += 1;
                new_start += 1;
            } else if reusable(old_last, &new_children[new_end - 1]) {
                self.patch_vnode(old_last, &mut new_children[new_end - 1])?;
                old_end -= 1;
                new_end -= 1;
            } else if reusable(old_first, &new_children[new_end - 1]) {
                // Head of the old window became the tail of the new one.
                let node = self.patch_vnode(old_first, &mut new_children[new_end - 1])?;
                let before = match old_last.el() {
                    Some(last) => self.target.next_sibling(last),
                    None => tail_anchor(new_children, new_end),
                };
                self.move_before(parent, node, before)?;
                old_start += 1;
                new_end -= 1;
            } else if reusable(old_last, &new_children[new_start]) {
                // Tail of the old window became the head of the new one.
                let node = self.patch_vnode(old_last, &mut new_children[new_start])?;
                let before = head_anchor(old_children, old_start, old_end, key_index.as_ref())
                    .or_else(|| tail_anchor(new_children, new_end));
                self.move_before(parent, node, before)?;
                old_end -= 1;
                new_start += 1;
            } else {
                let keys = key_index
                    .get_or_insert_with(|| KeyIndex::build(old_children, old_start, old_end));
                let head = &new_children[new_start];
                let matched = match head.key() {
                    Some(key) => keys
                        .find(key, old_start, old_end)
                        .filter(|&idx| reusable(&old_children[idx], head)),
                    // Keyless nodes fall back to the first positional match.
                    None => (old_start..old_end)
                        .find(|&idx| !keys.consumed[idx] && reusable(&old_children[idx], head)),
                };
                if let Some(idx) = matched {
                    keys.consumed[idx] = true;
                }
                let before = head_anchor(old_children, old_start, old_end, key_index.as_ref())
                    .or_else(|| tail_anchor(new_children, new_end));

                if let Some(idx) = matched {
                    let node = self.patch_vnode(&old_children[idx], &mut new_children[new_start])?;
                    self.move_before(parent, node, before)?;
                } else {
                    let node = self.create_elm(&mut new_children[new_start])?;
                    self.target.insert_before(parent, node, before)?;
                }
                new_start += 1;
            }
        }

        if new_start < new_end {
            let before = tail_anchor(new_children, new_end);
            for child in &mut new_children[new_start..new_end] {
                let node = self.create_elm(child)?;
                self.target.insert_before(parent, node, before)?;
            }
        } else {
            for (offset, child) in old_children[old_start..old_end].iter().enumerate() {
                if is_consumed(key_index.as_ref(), old_start + offset) {
                    continue;
                }
                if let Some(el) = child.el() {
                    self.target.remove_node(el)?;
                    trace!(target: "vdom", "removed {el:?}");
                    self.stats.removed += 1;
                }
            }
        }
        Ok(())
    }

    fn move_before(
        &mut self,
        parent: T::Node,
        node: T::Node,
        before: Option<T::Node>,
    ) -> Result<()> {
        if before == Some(node) {
            return Ok(());
        }
        self.target.insert_before(parent, node, before)?;
        trace!(target: "vdom", "moved {node:?} before {before:?}");
        self.stats.moved += 1;
        Ok(())
    }
}

/// Same logical node with a real node to reuse. Unbound old nodes never
/// match, so their new counterparts are materialized (lenient mode only).
fn reusable<N: Copy>(old: &VNode<N>, new: &VNode<N>) -> bool {
    old.el().is_some() && is_same_vnode(old, new)
}

/// Real node at the head of the old window: the first bound, unconsumed one.
fn head_anchor<N: Copy>(
    old_children: &[VNode<N>],
    start: usize,
    end: usize,
    index: Option<&KeyIndex<'_>>,
) -> Option<N> {
    (start..end)
        .filter(|&idx| !is_consumed(index, idx))
        .find_map(|idx| old_children[idx].el())
}

/// Real node right after the new window; those are already in final position.
fn tail_anchor<N: Copy>(new_children: &[VNode<N>], end: usize) -> Option<N> {
    new_children.get(end).and_then(VNode::el)
}
