use anyhow::Result;
use log::trace;

use super::Reconciler;
use super::props::patch_props;
use crate::node::{VNode, VNodeKind};
use crate::props::Props;
use crate::target::RenderTarget;

impl<T: RenderTarget> Reconciler<'_, T> {
    /// Builds a fresh real subtree for `vnode`, binding every node it creates.
    ///
    /// The returned node is detached; placing it is up to the caller.
    ///
    /// # Errors
    /// Propagates the first failure reported by the render target.
    pub fn create_elm(&mut self, vnode: &mut VNode<T::Node>) -> Result<T::Node> {
        let node = match vnode.kind_mut() {
            VNodeKind::Element {
                tag,
                data,
                children,
            } => {
                let element = self.target.create_element(tag)?;
                patch_props(&mut *self.target, element, &Props::default(), data)?;
                for child in children.iter_mut() {
                    let child_node = self.create_elm(child)?;
                    self.target.append_child(element, child_node)?;
                }
                element
            }
            VNodeKind::Text { text } => self.target.create_text(text)?,
        };
        trace!(target: "vdom", "created {node:?}");
        vnode.bind(node);
        self.stats.created += 1;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::{Dom, NodeId};
    use crate::node::{VNode, h, text};
    use crate::patch::Reconciler;
    use crate::target::RenderTarget as _;

    #[test]
    fn builds_subtree_and_binds_every_node() {
        let mut dom = Dom::new();
        let mut tree: VNode<NodeId> = h("ul")
            .attr("id", "list")
            .style("color", "red")
            .child(h("li").child(text("one")))
            .child(h("li").child(text("two")));

        let mut reconciler = Reconciler::new(&mut dom);
        let node = reconciler.create_elm(&mut tree).unwrap();
        assert_eq!(reconciler.stats().created, 5);

        assert_eq!(tree.el(), Some(node));
        for item in tree.child_nodes() {
            let li = item.el().unwrap();
            assert_eq!(dom.parent(li), Some(node));
            assert_eq!(dom.parent(item.child_nodes()[0].el().unwrap()), Some(li));
        }
        assert_eq!(dom.parent(node), None);
        assert_eq!(
            dom.outer_html(node),
            r#"<ul id="list" style="color: red"><li>one</li><li>two</li></ul>"#
        );
    }

    #[test]
    fn empty_tag_surfaces_target_error() {
        let mut dom = Dom::new();
        let mut tree: VNode<NodeId> = h("");
        assert!(Reconciler::new(&mut dom).create_elm(&mut tree).is_err());
        assert!(tree.el().is_none());
    }
}
