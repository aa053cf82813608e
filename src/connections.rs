//! Maps the current node set to the line segments drawn between them.

use std::collections::HashMap;

use crate::graph_state::{
    NODE_HEIGHT, NODE_WIDTH, Position, ThoughtId, ThoughtNode,
};

/// Interior point of a card that lines attach to.
pub const ANCHOR_OFFSET: (f32, f32) = (NODE_WIDTH / 2.0, NODE_HEIGHT / 2.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub source: ThoughtId,
    pub target: ThoughtId,
    pub from: Position,
    pub to: Position,
}

pub fn anchor(position: Position) -> Position {
    position.offset(ANCHOR_OFFSET.0, ANCHOR_OFFSET.1)
}

/// One segment per resolvable connection, in node then connection order.
///
/// Targets are looked up by id; a connection whose target is not in
/// `nodes` yields nothing. When two nodes share an id the first one is
/// the target. Duplicate and self connections are drawn as they are
/// stored.
pub fn connection_segments(nodes: &[ThoughtNode]) -> Vec<Segment> {
    let mut by_id: HashMap<&ThoughtId, &ThoughtNode> = HashMap::new();
    for node in nodes {
        by_id.entry(&node.id).or_insert(node);
    }

    nodes
        .iter()
        .flat_map(|source| {
            let by_id = &by_id;
            source.connections.iter().filter_map(move |target_id| {
                let target = by_id.get(target_id)?;
                Some(Segment {
                    source: source.id.clone(),
                    target: target.id.clone(),
                    from: anchor(source.position),
                    to: anchor(target.position),
                })
            })
        })
        .collect()
}
