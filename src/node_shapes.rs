use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke,
    StrokeKind, Vec2, text::LayoutJob,
};

use crate::graph_state::{KindIcon, ThoughtKind, ThoughtNode};

const CARD_ROUNDING: f32 = 8.0;
const CARD_PADDING: f32 = 12.0;
const BADGE_HEIGHT: f32 = 18.0;
const BADGE_ROUNDING: f32 = 9.0;
const BADGE_FONT: f32 = 11.0;
const ICON_SIZE: f32 = 10.0;
const TITLE_FONT: f32 = 13.0;
const CONTENT_FONT: f32 = 11.0;
const CONTENT_MAX_ROWS: usize = 2;

const FALLBACK_FILL: Color32 = Color32::from_rgb(0xf0, 0xf0, 0xf0);
const BORDER: Color32 = Color32::from_rgb(0xe2, 0xe8, 0xf0);
const BORDER_HOVERED: Color32 = Color32::from_rgb(0x93, 0xa8, 0xd8);
const BORDER_SELECTED: Color32 = Color32::from_rgb(0x3b, 0x5b, 0xdb);
const SHADOW: Color32 = Color32::from_black_alpha(24);
const TITLE_COLOR: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);
const CONTENT_COLOR: Color32 = Color32::from_rgb(0x64, 0x74, 0x8b);

/// Parse a `#rrggbb` / `#rrggbbaa` display color.
pub fn parse_color(hex: &str) -> Option<Color32> {
    Color32::from_hex(hex.trim()).ok()
}

/// Card background: the node's own color, or a neutral grey when the
/// stored value is not a hex color.
pub fn card_fill(node: &ThoughtNode) -> Color32 {
    parse_color(&node.color).unwrap_or(FALLBACK_FILL)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CardState {
    pub hovered: bool,
    pub dragged: bool,
    pub selected: bool,
}

/// Draw a thought card: kind badge, title, and up to two lines of
/// content.
pub fn paint_card(
    painter: &Painter,
    rect: Rect,
    node: &ThoughtNode,
    state: CardState,
) {
    let shadow_offset = if state.dragged { 4.0 } else { 2.0 };
    painter.rect_filled(
        rect.translate(Vec2::splat(shadow_offset)),
        CARD_ROUNDING,
        SHADOW,
    );
    painter.rect_filled(rect, CARD_ROUNDING, card_fill(node));

    let border = if state.selected {
        Stroke::new(2.0, BORDER_SELECTED)
    } else if state.hovered || state.dragged {
        Stroke::new(1.5, BORDER_HOVERED)
    } else {
        Stroke::new(1.0, BORDER)
    };
    painter.rect_stroke(rect, CARD_ROUNDING, border, StrokeKind::Inside);

    let inner = rect.shrink(CARD_PADDING);
    let badge = paint_badge(painter, inner.min, node.kind);

    let title_top = badge.bottom() + 4.0;
    let title = single_job(
        &node.title,
        TITLE_FONT,
        TITLE_COLOR,
        inner.width(),
        1,
    );
    let title = painter.layout_job(title);
    let content_top = title_top + title.size().y + 2.0;
    painter.galley(Pos2::new(inner.left(), title_top), title, TITLE_COLOR);

    if !node.content.is_empty() {
        let content = single_job(
            &node.content,
            CONTENT_FONT,
            CONTENT_COLOR,
            inner.width(),
            CONTENT_MAX_ROWS,
        );
        painter.galley(
            Pos2::new(inner.left(), content_top),
            painter.layout_job(content),
            CONTENT_COLOR,
        );
    }
}

fn single_job(
    text: &str,
    size: f32,
    color: Color32,
    width: f32,
    max_rows: usize,
) -> LayoutJob {
    let mut job = LayoutJob::simple(
        text.to_owned(),
        FontId::proportional(size),
        color,
        width,
    );
    job.wrap.max_rows = max_rows;
    job
}

/// Pill with the kind's icon and name. Returns the rect it occupies.
fn paint_badge(painter: &Painter, top_left: Pos2, kind: ThoughtKind) -> Rect {
    let style = kind.style();
    let fill = parse_color(style.badge.fill).unwrap_or(FALLBACK_FILL);
    let text_color =
        parse_color(style.badge.text).unwrap_or(Color32::DARK_GRAY);

    let label = painter.layout_no_wrap(
        kind.as_str().to_owned(),
        FontId::proportional(BADGE_FONT),
        text_color,
    );
    let width = 6.0 + ICON_SIZE + 4.0 + label.size().x + 8.0;
    let rect = Rect::from_min_size(top_left, Vec2::new(width, BADGE_HEIGHT));

    painter.rect_filled(rect, BADGE_ROUNDING, fill.gamma_multiply(0.85));
    painter.rect_stroke(
        rect,
        BADGE_ROUNDING,
        Stroke::new(1.0, text_color.gamma_multiply(0.3)),
        StrokeKind::Inside,
    );

    let icon_rect = Rect::from_center_size(
        Pos2::new(rect.left() + 6.0 + ICON_SIZE / 2.0, rect.center().y),
        Vec2::splat(ICON_SIZE),
    );
    paint_icon(painter, icon_rect, style.icon, text_color);

    painter.galley(
        Pos2::new(
            icon_rect.right() + 4.0,
            rect.center().y - label.size().y / 2.0,
        ),
        label,
        text_color,
    );
    rect
}

/// Small vector glyphs standing in for the kind icons.
pub fn paint_icon(
    painter: &Painter,
    rect: Rect,
    icon: KindIcon,
    color: Color32,
) {
    let stroke = Stroke::new(1.2, color);
    match icon {
        KindIcon::CheckSquare => {
            painter.rect_stroke(rect, 2.0, stroke, StrokeKind::Inside);
            let check = vec![
                rect.lerp_inside(Vec2::new(0.25, 0.5)),
                rect.lerp_inside(Vec2::new(0.45, 0.72)),
                rect.lerp_inside(Vec2::new(0.78, 0.3)),
            ];
            painter.add(Shape::line(check, stroke));
        }
        KindIcon::StickyNote => {
            let fold = rect.width() * 0.35;
            let outline = vec![
                rect.left_top(),
                rect.right_top(),
                rect.right_bottom() - Vec2::new(0.0, fold),
                rect.right_bottom() - Vec2::new(fold, 0.0),
                rect.left_bottom(),
                rect.left_top(),
            ];
            painter.add(Shape::line(outline, stroke));
            painter.line_segment(
                [
                    rect.right_bottom() - Vec2::new(fold, 0.0),
                    rect.right_bottom() - Vec2::new(fold, fold),
                ],
                stroke,
            );
        }
        KindIcon::FileText => {
            let page = rect.shrink2(Vec2::new(rect.width() * 0.12, 0.0));
            painter.rect_stroke(page, 1.0, stroke, StrokeKind::Inside);
            for t in [0.35, 0.55, 0.75] {
                painter.line_segment(
                    [
                        page.lerp_inside(Vec2::new(0.22, t)),
                        page.lerp_inside(Vec2::new(0.78, t)),
                    ],
                    stroke,
                );
            }
        }
    }
}

/// Anchor text for places that only need a plain label (the editor).
pub fn kind_label(ui: &mut egui::Ui, kind: ThoughtKind) {
    let style = kind.style();
    let color = parse_color(style.badge.text).unwrap_or(Color32::DARK_GRAY);
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(ICON_SIZE + 4.0, BADGE_HEIGHT),
        egui::Sense::hover(),
    );
    paint_icon(
        ui.painter(),
        Rect::from_center_size(rect.center(), Vec2::splat(ICON_SIZE)),
        style.icon,
        color,
    );
    ui.colored_label(color, kind.display_name());
}

/// Label anchored at the canvas corner while nothing has loaded yet.
pub fn paint_empty_hint(painter: &Painter, rect: Rect) {
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "No thoughts yet. Use \"Add Item\" to create one.",
        FontId::proportional(14.0),
        CONTENT_COLOR,
    );
}
