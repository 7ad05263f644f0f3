use indextree::NodeId;

/// One change applied to a [`Dom`](super::Dom), in application order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomMutation {
    CreateElement {
        node: NodeId,
        tag: String,
    },
    CreateText {
        node: NodeId,
        text: String,
    },
    SetAttr {
        node: NodeId,
        name: String,
        value: String,
    },
    RemoveAttr {
        node: NodeId,
        name: String,
    },
    SetStyle {
        node: NodeId,
        name: String,
        value: String,
    },
    ClearStyle {
        node: NodeId,
        name: String,
    },
    SetText {
        node: NodeId,
        text: String,
    },
    /// A node placed under a parent it was not a child of. `before: None` appends.
    Insert {
        parent: NodeId,
        node: NodeId,
        before: Option<NodeId>,
    },
    /// A node repositioned among its current siblings.
    Move {
        parent: NodeId,
        node: NodeId,
        before: Option<NodeId>,
    },
    Replace {
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    },
    Remove {
        parent: NodeId,
        node: NodeId,
    },
    ClearChildren {
        parent: NodeId,
    },
}

impl DomMutation {
    /// Short kebab-case label, handy for logs and assertions.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateElement { .. } => "create-element",
            Self::CreateText { .. } => "create-text",
            Self::SetAttr { .. } => "set-attr",
            Self::RemoveAttr { .. } => "remove-attr",
            Self::SetStyle { .. } => "set-style",
            Self::ClearStyle { .. } => "clear-style",
            Self::SetText { .. } => "set-text",
            Self::Insert { .. } => "insert",
            Self::Move { .. } => "move",
            Self::Replace { .. } => "replace",
            Self::Remove { .. } => "remove",
            Self::ClearChildren { .. } => "clear-children",
        }
    }

    pub const fn is_create(&self) -> bool {
        matches!(self, Self::CreateElement { .. } | Self::CreateText { .. })
    }

    pub const fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }

    /// Removal of real nodes, including replacement and clearing.
    pub const fn is_removal(&self) -> bool {
        matches!(
            self,
            Self::Remove { .. } | Self::Replace { .. } | Self::ClearChildren { .. }
        )
    }

    /// Attribute, style or text content writes on an existing node.
    pub const fn is_content(&self) -> bool {
        matches!(
            self,
            Self::SetAttr { .. }
                | Self::RemoveAttr { .. }
                | Self::SetStyle { .. }
                | Self::ClearStyle { .. }
                | Self::SetText { .. }
        )
    }
}
