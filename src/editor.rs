use crate::graph_state::{ContentPatch, ThoughtId, ThoughtKind, ThoughtNode};

/// Form fields shared by the create and edit dialogs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorFields {
    pub title: String,
    pub content: String,
    pub kind: ThoughtKind,
}

impl EditorFields {
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorMode {
    #[default]
    Closed,
    Create,
    Edit { id: ThoughtId },
}

/// What a successful submit hands to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorSubmission {
    Create {
        title: String,
        content: String,
        kind: ThoughtKind,
    },
    Edit {
        id: ThoughtId,
        patch: ContentPatch,
    },
}

/// Transient state of the "new thought" / "edit thought" dialogs.
#[derive(Debug, Clone, Default)]
pub struct NodeEditor {
    mode: EditorMode,
    fields: EditorFields,
}

impl NodeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn fields(&self) -> &EditorFields {
        &self.fields
    }

    pub fn is_open(&self) -> bool {
        self.mode != EditorMode::Closed
    }

    pub fn open_create(&mut self) {
        if self.mode != EditorMode::Create {
            self.fields = EditorFields::default();
        }
        self.mode = EditorMode::Create;
    }

    pub fn open_edit(&mut self, node: &ThoughtNode) {
        self.fields = EditorFields {
            title: node.title.clone(),
            content: node.content.clone(),
            kind: node.kind,
        };
        self.mode = EditorMode::Edit {
            id: node.id.clone(),
        };
    }

    pub fn set_title(&mut self, title: String) {
        self.fields.title = title;
    }

    pub fn set_content(&mut self, content: String) {
        self.fields.content = content;
    }

    /// Kind is fixed once a thought exists, so this only applies while
    /// creating.
    pub fn set_kind(&mut self, kind: ThoughtKind) {
        if self.mode == EditorMode::Create {
            self.fields.kind = kind;
        }
    }

    /// Close the form, returning its contents if there is anything to
    /// submit. A blank form stays open and yields nothing.
    pub fn submit(&mut self) -> Option<EditorSubmission> {
        if self.mode == EditorMode::Closed || self.fields.is_blank() {
            return None;
        }
        let fields = std::mem::take(&mut self.fields);
        match std::mem::take(&mut self.mode) {
            EditorMode::Create => Some(EditorSubmission::Create {
                title: fields.title,
                content: fields.content,
                kind: fields.kind,
            }),
            EditorMode::Edit { id } => Some(EditorSubmission::Edit {
                id,
                patch: ContentPatch {
                    title: Some(fields.title),
                    content: Some(fields.content),
                },
            }),
            EditorMode::Closed => None,
        }
    }

    pub fn cancel(&mut self) {
        self.mode = EditorMode::Closed;
        self.fields = EditorFields::default();
    }
}
