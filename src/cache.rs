use crate::connections::{Segment, connection_segments};
use crate::graph_state::ThoughtGraph;
use crate::store::Store;
use crate::versioned::Memoized;

/// Values derived from the node list, rebuilt whenever it changes.
pub struct Cache {
    pub segments: Memoized<Store, u64, Vec<Segment>>,
    pub graph: Memoized<Store, u64, ThoughtGraph>,
}

impl Cache {
    pub fn new() -> Self {
        let segments = Memoized::new(
            |s: &Store| s.nodes.version(),
            |s: &Store| connection_segments(s.nodes()),
        );

        let graph = Memoized::new(
            |s: &Store| s.nodes.version(),
            |s: &Store| ThoughtGraph::from_nodes(s.nodes()),
        );

        Self { segments, graph }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}
