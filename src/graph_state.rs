// Graph state module - thought node types and the directed link index

use chrono::{DateTime, Utc};
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use std::collections::HashMap;
use std::fmt;

// Canvas geometry shared by the store, the drag controller and the view
pub const CANVAS_WIDTH: f32 = 850.0;
pub const CANVAS_HEIGHT: f32 = 500.0;
pub const NODE_WIDTH: f32 = 150.0;
pub const NODE_HEIGHT: f32 = 100.0;

/// Where freshly created thoughts land on the canvas.
pub const DEFAULT_POSITION: Position = Position::new(50.0, 50.0);

// ------------------------------------------------------------------
// Identifiers and positions
// ------------------------------------------------------------------

/// Opaque identifier assigned by the persistence service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThoughtId(String);

impl ThoughtId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThoughtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThoughtId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ThoughtId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Top-left corner of a node card, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp into `[0, CANVAS_WIDTH] x [0, CANVAS_HEIGHT]`.
    ///
    /// NaN collapses to the lower bound so a committed position is
    /// always a real point inside the canvas.
    pub fn clamped(self) -> Self {
        Self {
            x: clamp_axis(self.x, CANVAS_WIDTH),
            y: clamp_axis(self.y, CANVAS_HEIGHT),
        }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_bounds(self) -> bool {
        (0.0..=CANVAS_WIDTH).contains(&self.x)
            && (0.0..=CANVAS_HEIGHT).contains(&self.y)
    }
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

// ------------------------------------------------------------------
// Kinds and their display table
// ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThoughtKind {
    #[default]
    Task,
    Note,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindIcon {
    CheckSquare,
    StickyNote,
    FileText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeStyle {
    pub fill: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindStyle {
    pub icon: KindIcon,
    pub color: &'static str,
    pub badge: BadgeStyle,
}

const TASK_STYLE: KindStyle = KindStyle {
    icon: KindIcon::CheckSquare,
    color: "#D3E4FD",
    badge: BadgeStyle {
        fill: "#D3E4FD",
        text: "#1E40AF",
    },
};

const NOTE_STYLE: KindStyle = KindStyle {
    icon: KindIcon::StickyNote,
    color: "#E0F5E9",
    badge: BadgeStyle {
        fill: "#E0F5E9",
        text: "#166534",
    },
};

const FILE_STYLE: KindStyle = KindStyle {
    icon: KindIcon::FileText,
    color: "#FDE1D3",
    badge: BadgeStyle {
        fill: "#FDE1D3",
        text: "#9A3412",
    },
};

impl ThoughtKind {
    pub const ALL: [ThoughtKind; 3] =
        [ThoughtKind::Task, ThoughtKind::Note, ThoughtKind::File];

    pub fn style(self) -> &'static KindStyle {
        match self {
            ThoughtKind::Task => &TASK_STYLE,
            ThoughtKind::Note => &NOTE_STYLE,
            ThoughtKind::File => &FILE_STYLE,
        }
    }

    pub fn default_color(self) -> &'static str {
        self.style().color
    }

    /// Lowercase name, as used on the wire and on the badge.
    pub fn as_str(self) -> &'static str {
        match self {
            ThoughtKind::Task => "task",
            ThoughtKind::Note => "note",
            ThoughtKind::File => "file",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ThoughtKind::Task => "Task",
            ThoughtKind::Note => "Note",
            ThoughtKind::File => "File",
        }
    }
}

impl fmt::Display for ThoughtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ------------------------------------------------------------------
// Thought nodes
// ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ThoughtNode {
    pub id: ThoughtId,
    pub title: String,
    pub content: String,
    pub kind: ThoughtKind,
    pub position: Position,
    pub color: String,
    /// Directed out-edges. Entries may dangle, repeat, or point back
    /// at this node.
    pub connections: Vec<ThoughtId>,
    pub created_at: DateTime<Utc>,
}

/// A thought that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewThought {
    pub title: String,
    pub content: String,
    pub kind: ThoughtKind,
    pub position: Position,
    pub color: String,
    pub connections: Vec<ThoughtId>,
    pub created_at: DateTime<Utc>,
}

impl NewThought {
    /// Build a draft at the default position with no connections.
    /// `color` overrides the kind's default when given.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        kind: ThoughtKind,
        color: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            kind,
            position: DEFAULT_POSITION,
            color: color
                .unwrap_or_else(|| kind.default_color().to_string()),
            connections: Vec::new(),
            created_at,
        }
    }

    pub fn with_id(self, id: ThoughtId) -> ThoughtNode {
        ThoughtNode {
            id,
            title: self.title,
            content: self.content,
            kind: self.kind,
            position: self.position,
            color: self.color,
            connections: self.connections,
            created_at: self.created_at,
        }
    }
}

/// Title/content edits coming out of the edit form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ContentPatch {
    pub fn apply(&self, node: &mut ThoughtNode) {
        if let Some(title) = &self.title {
            node.title = title.clone();
        }
        if let Some(content) = &self.content {
            node.content = content.clone();
        }
    }
}

// ------------------------------------------------------------------
// Link index
// ------------------------------------------------------------------

/// Directed graph over the resolvable connections of a node set.
///
/// Dangling references are counted but never become edges, so every
/// edge in the graph joins two nodes that exist in the session.
pub struct ThoughtGraph {
    graph: StableDiGraph<ThoughtId, ()>,
    index: HashMap<ThoughtId, NodeIndex>,
    dangling: usize,
}

impl ThoughtGraph {
    pub fn from_nodes(nodes: &[ThoughtNode]) -> Self {
        let mut graph = StableDiGraph::new();
        let mut index = HashMap::with_capacity(nodes.len());

        for node in nodes {
            index
                .entry(node.id.clone())
                .or_insert_with(|| graph.add_node(node.id.clone()));
        }

        let mut dangling = 0;
        for node in nodes {
            let source = index[&node.id];
            for target_id in &node.connections {
                match index.get(target_id) {
                    Some(&target) => {
                        graph.add_edge(source, target, ());
                    }
                    None => {
                        tracing::trace!(
                            source = %node.id,
                            target = %target_id,
                            "skipping dangling connection"
                        );
                        dangling += 1;
                    }
                }
            }
        }

        Self {
            graph,
            index,
            dangling,
        }
    }

    /// Nodes linking to `id`, without duplicates, in load order.
    pub fn backlinks(&self, id: &ThoughtId) -> Vec<ThoughtId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Resolved link targets of `id`, without duplicates, in load order.
    pub fn outgoing(&self, id: &ThoughtId) -> Vec<ThoughtId> {
        self.neighbors(id, Direction::Outgoing)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn dangling_count(&self) -> usize {
        self.dangling
    }

    fn neighbors(
        &self,
        id: &ThoughtId,
        direction: Direction,
    ) -> Vec<ThoughtId> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        let mut found: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, direction)
            .collect();
        found.sort();
        found.dedup();
        found
            .into_iter()
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, connections: &[&str]) -> ThoughtNode {
        NewThought::new(id, "", ThoughtKind::Note, None, Utc::now())
            .with_id(ThoughtId::from(id))
            .with_connections(connections)
    }

    impl ThoughtNode {
        fn with_connections(mut self, connections: &[&str]) -> Self {
            self.connections =
                connections.iter().map(|c| ThoughtId::from(*c)).collect();
            self
        }
    }

    #[test]
    fn clamping_pins_far_values_to_the_canvas_edges() {
        let cases = [
            (Position::new(-10.0, -0.5), Position::new(0.0, 0.0)),
            (Position::new(1e9, 1e9), Position::new(850.0, 500.0)),
            (Position::new(840.0, 10.0), Position::new(840.0, 10.0)),
            (
                Position::new(f32::NEG_INFINITY, f32::INFINITY),
                Position::new(0.0, 500.0),
            ),
            (Position::new(f32::NAN, 20.0), Position::new(0.0, 20.0)),
        ];
        for (input, expected) in cases {
            let clamped = input.clamped();
            assert_eq!(clamped, expected, "clamping {input:?}");
            assert!(clamped.in_bounds());
        }
    }

    #[test]
    fn new_thought_uses_kind_color_unless_overridden() {
        let now = Utc::now();
        for kind in ThoughtKind::ALL {
            let draft = NewThought::new("t", "c", kind, None, now);
            assert_eq!(draft.color, kind.default_color());
            assert!(draft.connections.is_empty());
            assert_eq!(draft.position, DEFAULT_POSITION);
        }

        let draft = NewThought::new(
            "t",
            "c",
            ThoughtKind::File,
            Some("#123456".into()),
            now,
        );
        assert_eq!(draft.color, "#123456");
    }

    #[test]
    fn kind_table_is_distinct_per_variant() {
        let icons: Vec<_> =
            ThoughtKind::ALL.iter().map(|k| k.style().icon).collect();
        assert_eq!(
            icons,
            vec![
                KindIcon::CheckSquare,
                KindIcon::StickyNote,
                KindIcon::FileText
            ]
        );
        assert_eq!(ThoughtKind::Task.default_color(), "#D3E4FD");
        assert_eq!(ThoughtKind::Note.default_color(), "#E0F5E9");
        assert_eq!(ThoughtKind::File.default_color(), "#FDE1D3");
    }

    #[test]
    fn graph_skips_dangling_links_and_keeps_cycles() {
        let nodes = vec![
            node("a", &["b", "ghost"]),
            node("b", &["c"]),
            node("c", &["a", "a"]),
        ];
        let graph = ThoughtGraph::from_nodes(&nodes);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.dangling_count(), 1);
        assert_eq!(graph.outgoing(&"a".into()), vec![ThoughtId::from("b")]);
        assert_eq!(graph.backlinks(&"a".into()), vec![ThoughtId::from("c")]);
    }

    #[test]
    fn self_links_show_up_as_their_own_backlink() {
        let nodes = vec![node("solo", &["solo"])];
        let graph = ThoughtGraph::from_nodes(&nodes);
        assert_eq!(
            graph.backlinks(&"solo".into()),
            vec![ThoughtId::from("solo")]
        );
        assert!(graph.backlinks(&"missing".into()).is_empty());
    }
}
