use crate::graph_state::{NewThought, Position, ThoughtId};
use crate::persistence::{Completion, PersistenceAdapter};
use crate::store::Store;

/// Remote work that must run outside the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the whole thought collection
    FetchAll,
    /// Store a new thought
    CreateThought { draft: NewThought },
    /// Persist the coordinates of an existing thought
    PersistPosition { id: ThoughtId, position: Position },
}

/// Start a single effect. Returns immediately; the outcome arrives
/// later as a [`Completion`].
pub fn run(persistence: &PersistenceAdapter, effect: Effect) {
    match effect {
        Effect::FetchAll => persistence.fetch_all(),
        Effect::CreateThought { draft } => persistence.create(draft),
        Effect::PersistPosition { id, position } => {
            persistence.update_position(id, position)
        }
    }
}

/// Fold a finished request back into the store. Failures are logged
/// and otherwise ignored; nothing is retried or rolled back.
pub fn apply_completion(store: &mut Store, completion: Completion) {
    match completion {
        Completion::Loaded(Ok(nodes)) => {
            tracing::info!(count = nodes.len(), "loaded thoughts");
            store.replace_nodes(nodes);
        }
        Completion::Loaded(Err(e)) => {
            tracing::warn!(error = %e, "failed to load thoughts");
            store.replace_nodes(Vec::new());
        }
        Completion::Created(Ok(node)) => {
            tracing::info!(id = %node.id, kind = %node.kind, "created thought");
            store.append_node(node);
        }
        Completion::Created(Err(e)) => {
            tracing::warn!(error = %e, "failed to save new thought");
        }
        Completion::PositionSaved { id, result: Ok(_) } => {
            tracing::debug!(%id, "position saved");
        }
        Completion::PositionSaved { id, result: Err(e) } => {
            tracing::warn!(%id, error = %e, "failed to update position");
        }
    }
}
