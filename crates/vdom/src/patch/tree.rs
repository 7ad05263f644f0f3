use anyhow::{Result, bail};
use log::{trace, warn};

use super::Reconciler;
use super::props::patch_props;
use crate::node::{VNode, VNodeKind, is_same_vnode};
use crate::target::RenderTarget;

impl<T: RenderTarget> Reconciler<'_, T> {
    /// Reconciles `old` (already rendered) into `new` and returns the real
    /// node now backing `new`.
    ///
    /// Nodes with a different identity are rebuilt and swapped in at the old
    /// position. Same nodes keep their real node: text is rewritten when it
    /// changed, elements get their props and children reconciled.
    ///
    /// # Errors
    /// Fails when `old` is unbound under `strict_handles`, or propagates the
    /// first failure reported by the render target.
    pub fn patch_vnode(
        &mut self,
        old: &VNode<T::Node>,
        new: &mut VNode<T::Node>,
    ) -> Result<T::Node> {
        let Some(el) = old.el() else {
            if self.config.strict_handles {
                bail!("old vnode {:?} has no real node bound", old.tag());
            }
            warn!(target: "vdom", "old vnode {:?} is unbound, rebuilding it", old.tag());
            return self.create_elm(new);
        };

        if !is_same_vnode(old, new) {
            let node = self.create_elm(new)?;
            self.target.replace_node(el, node)?;
            trace!(target: "vdom", "replaced {el:?} with {node:?}");
            self.stats.replaced += 1;
            return Ok(node);
        }

        new.bind(el);
        self.stats.patched += 1;
        match (old.kind(), new.kind_mut()) {
            (VNodeKind::Text { text: old_text }, VNodeKind::Text { text }) => {
                if old_text != text {
                    self.target.set_text(el, text)?;
                }
            }
            (
                VNodeKind::Element {
                    data: old_data,
                    children: old_children,
                    ..
                },
                VNodeKind::Element { data, children, .. },
            ) => {
                patch_props(&mut *self.target, el, old_data, data)?;
                match (old_children.is_empty(), children.is_empty()) {
                    (false, false) => self.update_children(el, old_children, children)?,
                    (true, false) => {
                        for child in children.iter_mut() {
                            let node = self.create_elm(child)?;
                            self.target.append_child(el, node)?;
                        }
                    }
                    (false, true) => {
                        self.target.clear_children(el)?;
                        self.stats.removed += old_children.len();
                    }
                    (true, true) => {}
                }
            }
            // Identity already guarantees both sides share a variant.
            _ => {}
        }
        Ok(el)
    }
}
