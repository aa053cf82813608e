use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use super::{PersistError, ThoughtBackend};
use crate::graph_state::{NewThought, Position, ThoughtId, ThoughtNode};

/// In-process thought collection for offline sessions and tests.
///
/// Ids are random hex strings. Flipping [`set_failing`] makes every call
/// fail with [`PersistError::Unavailable`] until it is flipped back.
///
/// [`set_failing`]: MemoryBackend::set_failing
#[derive(Default)]
pub struct MemoryBackend {
    records: Mutex<Vec<ThoughtNode>>,
    failing: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nodes(nodes: Vec<ThoughtNode>) -> Self {
        Self {
            records: Mutex::new(nodes),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<ThoughtNode> {
        self.records().clone()
    }

    fn records(&self) -> MutexGuard<'_, Vec<ThoughtNode>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_available(&self) -> Result<(), PersistError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(PersistError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ThoughtBackend for MemoryBackend {
    async fn fetch_all(&self) -> Result<Vec<ThoughtNode>, PersistError> {
        self.check_available()?;
        Ok(self.snapshot())
    }

    async fn create(
        &self,
        draft: NewThought,
    ) -> Result<ThoughtNode, PersistError> {
        self.check_available()?;
        let id = ThoughtId::new(Uuid::new_v4().simple().to_string());
        let node = draft.with_id(id);
        self.records().push(node.clone());
        Ok(node)
    }

    async fn update_position(
        &self,
        id: &ThoughtId,
        position: Position,
    ) -> Result<ThoughtNode, PersistError> {
        self.check_available()?;
        let mut records = self.records();
        let node = records
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| PersistError::UnknownId(id.clone()))?;
        node.position = position;
        Ok(node.clone())
    }
}
