use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2};

use crate::pathway::VertexId;
use crate::scene::{LayoutNode, NodeShape, PathwayListFilter, PathwayScene};

use super::render_utils::{FrameTransform, draw_background, node_color, selected_color};

const FRAME_PADDING: f32 = 24.0;
const CLICK_SLOP: f32 = 6.0;

fn node_rect(node: &LayoutNode, transform: FrameTransform) -> Rect {
    let half = node.shape().half_extent() * transform.scale();
    Rect::from_center_size(transform.to_screen(node.position()), half * 2.0)
}

fn paint_node(painter: &egui::Painter, node: &LayoutNode, transform: FrameTransform) {
    let rect = node_rect(node, transform);
    let fill = node_color(node.variant());
    let outline = if node.is_selected() {
        Stroke::new(2.5, selected_color())
    } else {
        Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
    };

    match node.shape() {
        NodeShape::Rect { .. } => {
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, outline, StrokeKind::Outside);
        }
        NodeShape::Circle { .. } => {
            let radius = rect.width() * 0.5;
            painter.circle_filled(rect.center(), radius, fill);
            painter.circle_stroke(rect.center(), radius, outline);
        }
        NodeShape::RoundedRect { rounding, .. } => {
            let stroke = if node.is_selected() {
                outline
            } else {
                Stroke::new(1.5, fill)
            };
            painter.rect_stroke(rect, rounding * transform.scale(), stroke, StrokeKind::Outside);
        }
    }

    if node.variant().shows_label() {
        let anchor = match node.shape() {
            NodeShape::Circle { .. } => rect.right_center() + Vec2::new(4.0, 0.0),
            _ => rect.center(),
        };
        let align = match node.shape() {
            NodeShape::Circle { .. } => Align2::LEFT_CENTER,
            _ => Align2::CENTER_CENTER,
        };
        painter.text(
            anchor,
            align,
            node.label(),
            FontId::proportional(11.0),
            Color32::from_gray(238),
        );
    }
}

fn hit_node<L: PathwayListFilter>(
    scene: &PathwayScene<L>,
    transform: FrameTransform,
    pointer: Pos2,
) -> Option<&VertexId> {
    scene
        .nodes()
        .iter()
        .filter_map(|node| {
            let rect = node_rect(node, transform).expand(CLICK_SLOP);
            rect.contains(pointer)
                .then(|| (node, rect.center().distance(pointer)))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(node, _)| node.vertex())
}

/// Paints the scene and returns the vertex under a click, if any.
pub(super) fn draw_scene<L: PathwayListFilter>(
    ui: &mut Ui,
    scene: &PathwayScene<L>,
) -> Option<VertexId> {
    let size = ui.available_size().max(scene.min_size());
    let (response, painter) = ui.allocate_painter(size, Sense::click());
    let rect = response.rect;

    let frame = scene.layout_config().frame();
    let transform = FrameTransform::fit(rect, frame, FRAME_PADDING);
    let frame_rect = Rect::from_min_max(transform.to_screen(Vec2::ZERO), transform.to_screen(frame));
    draw_background(&painter, rect, frame_rect);

    let nodes = scene.nodes();
    for edge in scene.edges() {
        let (Some(source), Some(target)) = (scene.node(edge.source()), scene.node(edge.target()))
        else {
            continue;
        };
        painter.line_segment(
            [
                transform.to_screen(source.position()),
                transform.to_screen(target.position()),
            ],
            Stroke::new(1.2, Color32::from_rgba_unmultiplied(150, 160, 175, 160)),
        );
    }

    for node in nodes.iter().filter(|node| !node.is_selected()) {
        paint_node(&painter, node, transform);
    }
    for node in nodes.iter().filter(|node| node.is_selected()) {
        paint_node(&painter, node, transform);
    }

    if nodes.is_empty() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Pick a pathway on the left to start",
            FontId::proportional(14.0),
            Color32::from_gray(180),
        );
    }

    if response.clicked()
        && let Some(pointer) = response.interact_pointer_pos()
    {
        return hit_node(scene, transform, pointer).cloned();
    }

    None
}
