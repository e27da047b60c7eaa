use super::CanvasConfig;
use super::command::{DrawCommand, Point};
use super::node::node_box;
use super::theme::{ONE_TO_MANY_STROKE, PENDING_STROKE, RELATION_STROKE};
use crate::model::{RelationType, Table};
use std::f64::consts::PI;

/// Triangle with its tip at `to`, pointing along the `from -> to` direction.
pub fn arrowhead(from: Point, to: Point, size: f64) -> [Point; 3] {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    [
        to,
        Point::new(
            to.x - size * (angle - PI / 6.0).cos(),
            to.y - size * (angle - PI / 6.0).sin(),
        ),
        Point::new(
            to.x - size * (angle + PI / 6.0).cos(),
            to.y - size * (angle + PI / 6.0).sin(),
        ),
    ]
}

pub(super) fn draw_relation(
    out: &mut Vec<DrawCommand>,
    config: &CanvasConfig,
    from: &Table,
    to: &Table,
    kind: RelationType,
) {
    let start = node_box(from, config).out_anchor;
    let end = node_box(to, config).in_anchor;
    let color = match kind {
        RelationType::OneToMany => ONE_TO_MANY_STROKE,
        _ => RELATION_STROKE,
    };
    let dash = (kind == RelationType::ManyToMany).then_some(config.dash);

    out.push(DrawCommand::StrokeLine {
        from: start,
        to: end,
        color,
        width: config.line_width,
        dash,
    });
    out.push(DrawCommand::FillPolygon {
        points: arrowhead(start, end, config.arrow_size).to_vec(),
        color,
    });
}

pub(super) fn draw_pending(out: &mut Vec<DrawCommand>, config: &CanvasConfig, from: &Table, pointer: Point) {
    out.push(DrawCommand::StrokeLine {
        from: node_box(from, config).out_anchor,
        to: pointer,
        color: PENDING_STROKE,
        width: config.line_width,
        dash: Some(config.dash),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_arrowhead_horizontal() {
        let [tip, a, b] = arrowhead(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 12.0);
        let dx = 12.0 * (PI / 6.0).cos();
        let dy = 12.0 * (PI / 6.0).sin();
        assert!(close(tip, Point::new(100.0, 0.0)));
        assert!(close(a, Point::new(100.0 - dx, dy)));
        assert!(close(b, Point::new(100.0 - dx, -dy)));
    }

    #[test]
    fn test_arrowhead_points_backwards_for_leftward_line() {
        let [_, a, b] = arrowhead(Point::new(100.0, 50.0), Point::new(0.0, 50.0), 12.0);
        assert!(a.x > 0.0 && b.x > 0.0);
        assert!(((a.y - 50.0).abs() - 6.0).abs() < 1e-9);
        assert!(((a.y + b.y) / 2.0 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_self_relation_still_drawn() {
        let t = Table::new("1", "tree", crate::model::Position::new(0.0, 0.0));
        let mut out = Vec::new();
        draw_relation(&mut out, &CanvasConfig::default(), &t, &t, RelationType::OneToOne);
        assert_eq!(out.len(), 2);
        assert!(matches!(out[1], DrawCommand::FillPolygon { ref points, .. } if points.len() == 3));
    }
}
