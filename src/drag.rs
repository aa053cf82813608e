use crate::graph_state::{Position, ThoughtId};

/// An in-progress pointer drag of a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub id: ThoughtId,
    pub origin: Position,
    pub dx: f32,
    pub dy: f32,
}

impl DragGesture {
    /// Unclamped position under the pointer.
    pub fn current(&self) -> Position {
        self.origin.offset(self.dx, self.dy)
    }
}

/// Tracks the active drag gesture. Positions reported here are previews
/// only and may leave the canvas; bounds are applied when the store
/// commits the final position.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    active: Option<DragGesture>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `id` from `origin`, dropping any gesture that was
    /// still open without committing it.
    pub fn begin(&mut self, id: ThoughtId, origin: Position) {
        if let Some(previous) = self.active.take() {
            tracing::debug!(id = %previous.id, "drag replaced before release");
        }
        self.active = Some(DragGesture {
            id,
            origin,
            dx: 0.0,
            dy: 0.0,
        });
    }

    /// Accumulate pointer motion and return the new preview position.
    pub fn motion(&mut self, dx: f32, dy: f32) -> Option<Position> {
        let gesture = self.active.as_mut()?;
        gesture.dx += dx;
        gesture.dy += dy;
        Some(gesture.current())
    }

    pub fn preview(&self, id: &ThoughtId) -> Option<Position> {
        self.active
            .as_ref()
            .filter(|g| &g.id == id)
            .map(DragGesture::current)
    }

    pub fn active(&self) -> Option<&DragGesture> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Close the gesture and hand back the raw release position.
    pub fn finish(&mut self) -> Option<(ThoughtId, Position)> {
        self.active.take().map(|g| {
            let position = g.current();
            (g.id, position)
        })
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}
