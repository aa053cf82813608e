use crate::drag::DragController;
use crate::editor::NodeEditor;
use crate::graph_state::{ContentPatch, Position, ThoughtId, ThoughtNode};
use crate::versioned::Versioned;

/// Session state of the canvas: the node list plus the UI state that
/// hangs off it. Only `actions::update` and `effects::apply_completion`
/// mutate it.
pub struct Store {
    pub nodes: Versioned<Vec<ThoughtNode>>,
    pub selected: Option<ThoughtId>,
    pub editor: NodeEditor,
    pub drag: DragController,
}

impl Store {
    pub fn new() -> Self {
        Self::with_nodes(Vec::new())
    }

    pub fn with_nodes(nodes: Vec<ThoughtNode>) -> Self {
        Self {
            nodes: Versioned::new(nodes),
            selected: None,
            editor: NodeEditor::new(),
            drag: DragController::new(),
        }
    }

    pub fn nodes(&self) -> &[ThoughtNode] {
        self.nodes.get()
    }

    pub fn node(&self, id: &ThoughtId) -> Option<&ThoughtNode> {
        self.nodes.get().iter().find(|n| &n.id == id)
    }

    pub fn replace_nodes(&mut self, nodes: Vec<ThoughtNode>) {
        self.nodes.set(nodes);
        if let Some(selected) = &self.selected
            && self.node(selected).is_none()
        {
            self.selected = None;
        }
    }

    pub fn append_node(&mut self, node: ThoughtNode) {
        self.nodes.get_mut().push(node);
    }

    /// Move `id` to `position` clamped into the canvas, returning the
    /// stored position. Unknown ids leave the list untouched.
    pub fn set_position(
        &mut self,
        id: &ThoughtId,
        position: Position,
    ) -> Position {
        let clamped = position.clamped();
        if let Some(node) =
            self.nodes.get_mut().iter_mut().find(|n| &n.id == id)
        {
            node.position = clamped;
        }
        clamped
    }

    pub fn set_content(
        &mut self,
        id: &ThoughtId,
        patch: &ContentPatch,
    ) -> bool {
        match self.nodes.get_mut().iter_mut().find(|n| &n.id == id) {
            Some(node) => {
                patch.apply(node);
                true
            }
            None => false,
        }
    }

    /// Position a node is drawn at: the drag preview while it is being
    /// dragged, its stored position otherwise.
    pub fn display_position(&self, node: &ThoughtNode) -> Position {
        self.drag.preview(&node.id).unwrap_or(node.position)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
