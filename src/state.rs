use crate::actions::{self, Action};
use crate::cache::Cache;
use crate::connections::Segment;
use crate::effects::{self, Effect};
use crate::graph_state::ThoughtGraph;
use crate::persistence::{CompletionQueue, PersistenceAdapter};
use crate::store::Store;

/// Everything a canvas session owns. Mutation happens on one thread:
/// actions are queued while a frame is drawn and applied afterwards,
/// and remote completions are folded in between frames.
pub struct State {
    pub store: Store,
    pub cache: Cache,
    persistence: PersistenceAdapter,
    completions: CompletionQueue,
    action_queue: Vec<Action>,
    effect_queue: Vec<Effect>,
}

impl State {
    pub fn new(
        store: Store,
        persistence: PersistenceAdapter,
        completions: CompletionQueue,
    ) -> Self {
        Self {
            store,
            cache: Cache::new(),
            persistence,
            completions,
            action_queue: Vec::new(),
            effect_queue: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        self.action_queue.push(action);
    }

    pub fn flush_actions(&mut self) {
        let actions = std::mem::take(&mut self.action_queue);
        for action in actions {
            let mut effects = actions::update(&mut self.store, action);
            self.effect_queue.append(&mut effects);
        }
    }

    pub fn flush_effects(&mut self) {
        let effects = std::mem::take(&mut self.effect_queue);
        for effect in effects {
            effects::run(&self.persistence, effect);
        }
    }

    /// Apply every completion that has already arrived.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Some(completion) = self.completions.try_next() {
            effects::apply_completion(&mut self.store, completion);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion and apply it. Returns `false` once
    /// no more completions can arrive.
    pub async fn settle_next(&mut self) -> bool {
        match self.completions.next().await {
            Some(completion) => {
                effects::apply_completion(&mut self.store, completion);
                true
            }
            None => false,
        }
    }

    /// Line segments for the current node list.
    pub fn segments(&mut self) -> &[Segment] {
        self.cache.segments.get(&self.store)
    }

    pub fn graph(&mut self) -> &ThoughtGraph {
        self.cache.graph.get(&self.store)
    }
}
