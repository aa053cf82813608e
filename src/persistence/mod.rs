//! Fire-and-forget bridge between the store and the thought service.
//!
//! Every request runs as a detached task on the tokio runtime. Its
//! outcome comes back as a [`Completion`] on an unbounded channel that
//! the UI thread drains between frames; nothing is retried, batched or
//! ordered, and a request that never finishes simply never reports.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::graph_state::{NewThought, Position, ThoughtId, ThoughtNode};

pub use http::HttpBackend;
pub use memory::MemoryBackend;

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("service answered without a record")]
    EmptyResponse,
    #[error("no thought with id {0}")]
    UnknownId(ThoughtId),
    #[error("backend unavailable")]
    Unavailable,
}

/// The remote thought collection.
#[async_trait]
pub trait ThoughtBackend: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<ThoughtNode>, PersistError>;

    /// Store a new thought and return it with its assigned id.
    async fn create(
        &self,
        draft: NewThought,
    ) -> Result<ThoughtNode, PersistError>;

    /// Overwrite only the coordinates of an existing thought.
    async fn update_position(
        &self,
        id: &ThoughtId,
        position: Position,
    ) -> Result<ThoughtNode, PersistError>;
}

/// Outcome of a detached request, delivered back to the UI thread.
#[derive(Debug)]
pub enum Completion {
    Loaded(Result<Vec<ThoughtNode>, PersistError>),
    Created(Result<ThoughtNode, PersistError>),
    PositionSaved {
        id: ThoughtId,
        result: Result<ThoughtNode, PersistError>,
    },
}

type Notifier = Arc<dyn Fn() + Send + Sync>;

pub struct PersistenceAdapter {
    backend: Arc<dyn ThoughtBackend>,
    runtime: Handle,
    completions: mpsc::UnboundedSender<Completion>,
    notify: Option<Notifier>,
}

impl PersistenceAdapter {
    pub fn new(
        backend: Arc<dyn ThoughtBackend>,
        runtime: Handle,
    ) -> (Self, CompletionQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        let adapter = Self {
            backend,
            runtime,
            completions: tx,
            notify: None,
        };
        (adapter, CompletionQueue { rx })
    }

    /// Call `notify` after each completion is queued, e.g. to wake the
    /// UI for a repaint.
    pub fn with_notifier(
        mut self,
        notify: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.notify = Some(Arc::new(notify));
        self
    }

    pub fn fetch_all(&self) {
        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::Loaded(backend.fetch_all().await)
        });
    }

    pub fn create(&self, draft: NewThought) {
        let backend = self.backend.clone();
        self.spawn(async move {
            Completion::Created(backend.create(draft).await)
        });
    }

    pub fn update_position(&self, id: ThoughtId, position: Position) {
        let backend = self.backend.clone();
        self.spawn(async move {
            let result = backend.update_position(&id, position).await;
            Completion::PositionSaved { id, result }
        });
    }

    fn spawn<F>(&self, request: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let tx = self.completions.clone();
        let notify = self.notify.clone();
        self.runtime.spawn(async move {
            let completion = request.await;
            // The receiver is gone once the session has shut down.
            if tx.send(completion).is_ok()
                && let Some(notify) = notify
            {
                notify();
            }
        });
    }
}

/// Receiving end of the completion channel, owned by the UI thread.
pub struct CompletionQueue {
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl CompletionQueue {
    /// Next completion that has already arrived, without waiting.
    pub fn try_next(&mut self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next completion.
    pub async fn next(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }
}
