use eframe::egui;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::actions::Action;
use crate::editor::{EditorFields, EditorMode};
use crate::graph_state::ThoughtKind;
use crate::graph_view::{canvas_scroll_source, show_canvas};
use crate::node_shapes::kind_label;
use crate::state::State;

pub struct ThoughtWebApp {
    state: State,
    // Detached requests run here; it must outlive the window.
    _runtime: Arc<Runtime>,
}

impl ThoughtWebApp {
    /// Wrap `state` and kick off the initial load.
    pub fn new(mut state: State, runtime: Arc<Runtime>) -> Self {
        state.dispatch(Action::Load);
        state.flush_actions();
        state.flush_effects();
        Self {
            state,
            _runtime: runtime,
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let nodes = self.state.store.nodes().len();
        let links = self.state.segments().len();
        let mut reload = false;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Thought Web");
                ui.separator();
                ui.label(format!("{nodes} thoughts, {links} connections"));
                ui.with_layout(
                    egui::Layout::right_to_left(egui::Align::Center),
                    |ui| {
                        reload = ui.button("Reload").clicked();
                    },
                );
            });
        });

        if reload {
            self.state.dispatch(Action::Load);
        }
    }

    fn show_editor(&mut self, ctx: &egui::Context) {
        let mode = self.state.store.editor.mode().clone();
        let fields = self.state.store.editor.fields().clone();
        let window_title = match &mode {
            EditorMode::Closed => return,
            EditorMode::Create => "Add New Thought",
            EditorMode::Edit { .. } => "Edit Thought",
        };

        let linked_from: Vec<String> = match &mode {
            EditorMode::Edit { id } => {
                let sources = self.state.graph().backlinks(id);
                sources
                    .iter()
                    .filter_map(|source| self.state.store.node(source))
                    .map(|node| node.title.clone())
                    .collect()
            }
            _ => Vec::new(),
        };

        let mut actions = Vec::new();
        let mut open = true;
        egui::Window::new(window_title)
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                editor_fields(ui, &mode, &fields, &mut actions);

                if !linked_from.is_empty() {
                    ui.separator();
                    ui.label("Linked from");
                    for title in &linked_from {
                        ui.label(format!("• {title}"));
                    }
                }

                ui.separator();
                ui.horizontal(|ui| {
                    let submit = match mode {
                        EditorMode::Create => "Add",
                        _ => "Save Changes",
                    };
                    if ui
                        .add_enabled(
                            !fields.is_blank(),
                            egui::Button::new(submit),
                        )
                        .clicked()
                    {
                        actions.push(Action::SubmitEditor);
                    }
                    if ui.button("Cancel").clicked() {
                        actions.push(Action::CancelEditor);
                    }
                });
            });

        if !open {
            actions.push(Action::CancelEditor);
        }
        for action in actions {
            self.state.dispatch(action);
        }
    }
}

fn editor_fields(
    ui: &mut egui::Ui,
    mode: &EditorMode,
    fields: &EditorFields,
    actions: &mut Vec<Action>,
) {
    let mut title = fields.title.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut title).hint_text("Title"))
        .changed()
    {
        actions.push(Action::SetEditorTitle { title });
    }

    let mut content = fields.content.clone();
    if ui
        .add(
            egui::TextEdit::multiline(&mut content)
                .hint_text("Content")
                .desired_rows(4),
        )
        .changed()
    {
        actions.push(Action::SetEditorContent { content });
    }

    ui.horizontal(|ui| {
        ui.label("Type");
        match mode {
            EditorMode::Create => {
                egui::ComboBox::from_id_salt("thought_kind")
                    .selected_text(fields.kind.display_name())
                    .show_ui(ui, |ui| {
                        for kind in ThoughtKind::ALL {
                            if ui
                                .selectable_label(
                                    fields.kind == kind,
                                    kind.display_name(),
                                )
                                .clicked()
                            {
                                actions.push(Action::SetEditorKind { kind });
                            }
                        }
                    });
            }
            // The kind of an existing thought is fixed.
            _ => kind_label(ui, fields.kind),
        }
    });
}

impl eframe::App for ThoughtWebApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.drain_completions();

        self.show_header(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .scroll_source(canvas_scroll_source())
                .show(ui, |ui| show_canvas(ui, &mut self.state));
        });

        self.show_editor(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.state.store.drag.is_dragging() {
                self.state.dispatch(Action::CancelDrag);
            } else if self.state.store.editor.is_open() {
                self.state.dispatch(Action::CancelEditor);
            }
        }

        self.state.flush_actions();
        self.state.flush_effects();
    }
}
