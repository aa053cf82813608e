use eframe::egui::{
    self, Color32, Id, Pos2, Rect, Sense, Stroke, Vec2,
    scroll_area::ScrollSource,
};

use crate::actions::Action;
use crate::graph_state::{
    CANVAS_HEIGHT, CANVAS_WIDTH, NODE_HEIGHT, NODE_WIDTH, Position,
};
use crate::node_shapes::{CardState, paint_card, paint_empty_hint};
use crate::state::State;

pub const CONNECTION_WIDTH: f32 = 3.0;
const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(0xfa, 0xfa, 0xfb);
const CANVAS_BORDER: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb);
const ADD_BUTTON_SIZE: Vec2 = Vec2::new(110.0, 32.0);
const ADD_BUTTON_MARGIN: f32 = 16.0;

/// Size of the drawing area: the coordinate range plus one card, so a
/// card at the far corner is still fully visible.
pub fn canvas_size() -> Vec2 {
    Vec2::new(CANVAS_WIDTH + NODE_WIDTH, CANVAS_HEIGHT + NODE_HEIGHT)
}

/// Pointer drags belong to the cards, so the canvas only scrolls with
/// the wheel and the scroll bars.
pub fn canvas_scroll_source() -> ScrollSource {
    ScrollSource {
        drag: false,
        ..ScrollSource::ALL
    }
}

pub fn to_screen(origin: Pos2, position: Position) -> Pos2 {
    origin + Vec2::new(position.x, position.y)
}

pub fn card_rect(origin: Pos2, position: Position) -> Rect {
    Rect::from_min_size(
        to_screen(origin, position),
        Vec2::new(NODE_WIDTH, NODE_HEIGHT),
    )
}

/// Draw the canvas and turn pointer input on it into actions.
///
/// Connection lines are drawn first so cards sit on top of them. The
/// card being dragged is drawn last so it stays above its neighbours.
pub fn show_canvas(ui: &mut egui::Ui, state: &mut State) {
    let (rect, _) = ui.allocate_exact_size(canvas_size(), Sense::hover());
    let origin = rect.min;
    let painter = ui.painter().clone();

    painter.rect_filled(rect, 6.0, CANVAS_BACKGROUND);
    painter.rect_stroke(
        rect,
        6.0,
        Stroke::new(1.0, CANVAS_BORDER),
        egui::StrokeKind::Inside,
    );

    let line = Stroke::new(CONNECTION_WIDTH, Color32::BLACK);
    for segment in state.segments() {
        let from = to_screen(origin, segment.from);
        let to = to_screen(origin, segment.to);
        painter.line_segment([from, to], line);
        // round caps
        painter.circle_filled(from, CONNECTION_WIDTH / 2.0, Color32::BLACK);
        painter.circle_filled(to, CONNECTION_WIDTH / 2.0, Color32::BLACK);
    }

    let store = &state.store;
    if store.nodes().is_empty() {
        paint_empty_hint(&painter, rect);
    }

    let dragged = store.drag.active().map(|g| g.id.clone());
    let mut actions = Vec::new();
    let mut on_top = None;

    for node in store.nodes() {
        let card_area = card_rect(origin, store.display_position(node));
        let response = ui.interact(
            card_area,
            Id::new(("thought", node.id.as_str())),
            Sense::click_and_drag(),
        );

        if response.drag_started() {
            actions.push(Action::BeginDrag {
                id: node.id.clone(),
            });
        }
        if response.dragged() {
            let delta = response.drag_delta();
            if delta != Vec2::ZERO {
                actions.push(Action::DragBy {
                    dx: delta.x,
                    dy: delta.y,
                });
            }
        }
        if response.drag_stopped() {
            actions.push(Action::EndDrag);
        }
        if response.clicked() {
            actions.push(Action::OpenEditEditor {
                id: node.id.clone(),
            });
        }

        let card = CardState {
            hovered: response.hovered(),
            dragged: dragged.as_ref() == Some(&node.id),
            selected: store.selected.as_ref() == Some(&node.id),
        };
        if card.dragged {
            on_top = Some((card_area, node, card));
        } else {
            paint_card(&painter, card_area, node, card);
        }
    }
    if let Some((card_area, node, card)) = on_top {
        paint_card(&painter, card_area, node, card);
    }

    let button_rect = Rect::from_min_size(
        rect.max - ADD_BUTTON_SIZE - Vec2::splat(ADD_BUTTON_MARGIN),
        ADD_BUTTON_SIZE,
    );
    if ui
        .put(button_rect, egui::Button::new("+ Add Item"))
        .clicked()
    {
        actions.push(Action::OpenCreateEditor);
    }

    for action in actions {
        state.dispatch(action);
    }
}
