//! The reconciler: turns an old rendered tree into a new one with as few real
//! node mutations as it can find.
//!
//! Entry point is [`Reconciler::patch`] (or the free [`patch`] with default
//! options). A first render passes the placeholder real node the tree should
//! take the place of; later renders pass the previous virtual tree.

mod children;
mod materialize;
pub mod props;
mod tree;

use core::mem;

use anyhow::{Result, anyhow};
use log::debug;

use crate::config::ReconcilerConfig;
use crate::node::VNode;
use crate::target::RenderTarget;

/// What a pass reconciles against.
#[derive(Debug, Clone, Copy)]
pub enum Mount<'tree, N> {
    /// A raw real node that has never been produced by the reconciler.
    Node(N),
    /// The virtual tree rendered by the previous pass.
    VNode(&'tree VNode<N>),
}

impl<'tree, N> From<&'tree VNode<N>> for Mount<'tree, N> {
    #[inline]
    fn from(value: &'tree VNode<N>) -> Self {
        Self::VNode(value)
    }
}

/// Counters for the real-node work done by a reconciler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatchStats {
    /// Real nodes built from scratch, descendants included.
    pub created: usize,
    /// Reused real nodes repositioned among their siblings.
    pub moved: usize,
    /// Real nodes dropped from a child list.
    pub removed: usize,
    /// Real nodes swapped out because the new node had a different identity.
    pub replaced: usize,
    /// Old/new pairs reconciled in place.
    pub patched: usize,
}

/// Reconciles virtual trees into one render target.
///
/// The reconciler holds the target mutably for its whole lifetime, so no
/// other writer can interleave with a pass.
pub struct Reconciler<'dom, T: RenderTarget> {
    target: &'dom mut T,
    config: ReconcilerConfig,
    stats: PatchStats,
}

impl<'dom, T: RenderTarget> Reconciler<'dom, T> {
    #[inline]
    pub fn new(target: &'dom mut T) -> Self {
        Self::with_config(target, ReconcilerConfig::default())
    }

    #[inline]
    pub fn with_config(target: &'dom mut T, config: ReconcilerConfig) -> Self {
        Self {
            target,
            config,
            stats: PatchStats::default(),
        }
    }

    #[inline]
    pub const fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    #[inline]
    pub fn target(&self) -> &T {
        self.target
    }

    /// Counters accumulated since construction or the last [`Self::take_stats`].
    #[inline]
    pub const fn stats(&self) -> PatchStats {
        self.stats
    }

    #[inline]
    pub fn take_stats(&mut self) -> PatchStats {
        mem::take(&mut self.stats)
    }

    /// Renders `new` in place of `old` and returns the real node for `new`.
    ///
    /// For [`Mount::Node`] the new tree is built, inserted right after the
    /// placeholder, and the placeholder is removed. For [`Mount::VNode`] the
    /// previous tree is diffed against `new`.
    ///
    /// # Errors
    /// Fails if a placeholder has no parent, or propagates the first failure
    /// reported by the render target.
    pub fn patch(&mut self, old: Mount<'_, T::Node>, new: &mut VNode<T::Node>) -> Result<T::Node> {
        let before = self.stats;
        let node = match old {
            Mount::Node(placeholder) => {
                debug!(target: "vdom", "first mount over {placeholder:?}");
                self.mount(placeholder, new)?
            }
            Mount::VNode(old_vnode) => {
                debug!(target: "vdom", "patching {:?}", old_vnode.el());
                self.patch_vnode(old_vnode, new)?
            }
        };
        debug!(
            target: "vdom",
            "pass done: created={} moved={} removed={} replaced={} patched={}",
            self.stats.created - before.created,
            self.stats.moved - before.moved,
            self.stats.removed - before.removed,
            self.stats.replaced - before.replaced,
            self.stats.patched - before.patched,
        );
        Ok(node)
    }

    fn mount(&mut self, placeholder: T::Node, new: &mut VNode<T::Node>) -> Result<T::Node> {
        let parent = self
            .target
            .parent(placeholder)
            .ok_or_else(|| anyhow!("cannot mount over detached node {placeholder:?}"))?;
        let node = self.create_elm(new)?;
        let after = self.target.next_sibling(placeholder);
        self.target.insert_before(parent, node, after)?;
        self.target.remove_node(placeholder)?;
        Ok(node)
    }
}

/// Runs one pass with default options.
///
/// # Errors
/// See [`Reconciler::patch`].
pub fn patch<T: RenderTarget>(
    target: &mut T,
    old: Mount<'_, T::Node>,
    new: &mut VNode<T::Node>,
) -> Result<T::Node> {
    Reconciler::new(target).patch(old, new)
}
