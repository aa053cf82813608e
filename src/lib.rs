pub mod actions;
pub mod app;
pub mod cache;
pub mod config;
pub mod connections;
pub mod drag;
pub mod editor;
pub mod effects;
pub mod graph_state;
pub mod graph_view;
pub mod native;
pub mod node_shapes;
pub mod persistence;
pub mod serialization;
pub mod state;
pub mod store;
pub mod versioned;

use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::app::ThoughtWebApp;
use crate::config::{BackendKind, Config};
use crate::persistence::{
    HttpBackend, MemoryBackend, PersistenceAdapter, ThoughtBackend,
};
use crate::state::State;
use crate::store::Store;

/// Build the application for a window. Completions wake the UI through
/// the window's context.
pub fn create_app(
    cc: &eframe::CreationContext<'_>,
    config: &Config,
    runtime: Arc<Runtime>,
) -> ThoughtWebApp {
    let backend: Arc<dyn ThoughtBackend> = match config.backend {
        BackendKind::Http => {
            Arc::new(HttpBackend::new(config.endpoint.clone()))
        }
        BackendKind::Memory => Arc::new(MemoryBackend::new()),
    };

    let ctx = cc.egui_ctx.clone();
    let (persistence, completions) =
        PersistenceAdapter::new(backend, runtime.handle().clone());
    let persistence = persistence.with_notifier(move || ctx.request_repaint());

    ThoughtWebApp::new(
        State::new(Store::new(), persistence, completions),
        runtime,
    )
}
