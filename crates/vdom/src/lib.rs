//! Keyed virtual-DOM reconciliation.
//!
//! A producer describes the UI as a tree of [`VNode`]s each render pass. The
//! [`Reconciler`] compares it with the tree from the previous pass and applies
//! the smallest set of mutations it finds to a [`RenderTarget`], reusing real
//! nodes wherever the tag and key of a node stay the same. Sibling lists are
//! matched with a two-ended keyed diff.
//!
//! [`Dom`] is an in-memory render target with a mutation journal and HTML/JSON
//! snapshots.
//!
//! ```
//! use vdom::{Dom, DomVNode, Mount, h, patch, text};
//!
//! let mut dom = Dom::new();
//! let placeholder = dom.mount_point("div")?;
//!
//! let mut first: DomVNode = h("ul").child(h("li").with_key("a").child(text("A")));
//! let list = patch(&mut dom, Mount::Node(placeholder), &mut first)?;
//!
//! let mut second: DomVNode = h("ul")
//!     .child(h("li").with_key("b").child(text("B")))
//!     .child(h("li").with_key("a").child(text("A")));
//! assert_eq!(patch(&mut dom, Mount::from(&first), &mut second)?, list);
//! assert_eq!(dom.outer_html(list), "<ul><li>B</li><li>A</li></ul>");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod dom;
pub mod node;
pub mod patch;
pub mod props;
pub mod target;

pub use config::{KeyMapStrategy, ReconcilerConfig};
pub use dom::{Dom, DomMutation, DomVNode, NodeId, NodeKind};
pub use node::{Key, VNode, VNodeKind, h, is_same_vnode, text};
pub use patch::props::patch_props;
pub use patch::{Mount, PatchStats, Reconciler, patch};
pub use props::Props;
pub use target::RenderTarget;
