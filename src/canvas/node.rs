use super::CanvasConfig;
use super::command::{DrawCommand, Point};
use super::theme::Palette;
use crate::model::Table;

/// Screen geometry of a table node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    /// Right-edge connector anchor; relations leave from here
    pub out_anchor: Point,
    /// Left-edge anchor where incoming relations end
    pub in_anchor: Point,
}

impl NodeBox {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.width
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.height
    }
}

pub fn node_box(table: &Table, config: &CanvasConfig) -> NodeBox {
    let Table { position, .. } = table;
    NodeBox {
        origin: Point::new(position.x, position.y),
        width: config.node_width,
        height: config.metrics.node_height(table.columns.len()),
        out_anchor: Point::new(position.x + config.node_width, position.y + config.anchor_offset),
        in_anchor: Point::new(position.x, position.y + config.anchor_offset),
    }
}

pub(super) fn draw_node(
    out: &mut Vec<DrawCommand>,
    config: &CanvasConfig,
    palette: &Palette,
    table: &Table,
    selected: bool,
) {
    let m = &config.metrics;
    let b = node_box(table, config);
    let Point { x, y } = b.origin;

    out.push(DrawCommand::Rect {
        origin: b.origin,
        width: b.width,
        height: b.height,
        radius: config.node_radius,
        fill: Some(if selected { palette.selected_bg } else { palette.node_bg }),
        stroke: Some(if selected { palette.selected_border } else { palette.border }),
        stroke_width: 2.0,
    });

    out.push(DrawCommand::Rect {
        origin: b.origin,
        width: b.width,
        height: m.header_height,
        radius: config.node_radius,
        fill: Some(palette.header_bg),
        stroke: None,
        stroke_width: 0.0,
    });
    out.push(DrawCommand::Text {
        at: Point::new(x + m.padding_x, y + m.header_height / 2.0 + 5.0),
        text: m.truncate(&table.name, b.width - m.padding_x * 2.0),
        color: palette.header_text,
        size: m.header_font_size,
        bold: true,
    });

    let row_x = x + m.body_padding;
    let row_w = b.width - m.body_padding * 2.0;
    let text_x = row_x + 6.0;
    let text_w = row_w - 12.0;
    for (i, column) in table.columns.iter().enumerate() {
        let row_y = y + m.header_height + m.body_padding + i as f64 * (m.row_height + m.row_gap);
        let (bg, fg) = if column.is_primary {
            (palette.pk_row_bg, palette.pk_text)
        } else {
            (palette.row_bg, palette.row_text)
        };

        out.push(DrawCommand::Rect {
            origin: Point::new(row_x, row_y),
            width: row_w,
            height: m.row_height,
            radius: 4.0,
            fill: Some(bg),
            stroke: None,
            stroke_width: 0.0,
        });

        let label = if column.is_primary {
            format!("🔑 {}", column.name)
        } else {
            column.name.clone()
        };
        out.push(DrawCommand::Text {
            at: Point::new(text_x, row_y + 15.0),
            text: m.truncate(&label, text_w),
            color: fg,
            size: m.column_font_size,
            bold: column.is_primary,
        });
        out.push(DrawCommand::Text {
            at: Point::new(text_x, row_y + 30.0),
            text: column.typ.to_string(),
            color: palette.type_text,
            size: m.type_font_size,
            bold: false,
        });
    }

    out.push(DrawCommand::FillCircle {
        center: b.out_anchor,
        radius: config.handle_radius,
        color: palette.handle,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Theme;
    use crate::model::{Column, ColumnType, Position};

    fn texts(cmds: &[DrawCommand]) -> Vec<(&str, bool)> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, bold, .. } => Some((text.as_str(), *bold)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_node_box_geometry() {
        let mut t = Table::new("1", "users", Position::new(10.0, 20.0));
        t.columns.push(Column::new("1-2", "email", ColumnType::Varchar));
        let b = node_box(&t, &CanvasConfig::default());
        assert_eq!(b.origin, Point::new(10.0, 20.0));
        assert_eq!(b.width, 160.0);
        assert_eq!(b.height, 44.0 + 16.0 + 2.0 * 36.0 + 4.0);
        assert_eq!(b.out_anchor, Point::new(170.0, 80.0));
        assert_eq!(b.in_anchor, Point::new(10.0, 80.0));
        assert!(b.contains(Point::new(10.0, 20.0)));
        assert!(!b.contains(Point::new(171.0, 30.0)));
    }

    #[test]
    fn test_primary_rows_highlighted() {
        let mut t = Table::new("1", "users", Position::default());
        t.columns.push(Column::new("1-2", "email", ColumnType::Varchar));
        let mut out = Vec::new();
        let palette = Theme::Light.palette();
        draw_node(&mut out, &CanvasConfig::default(), palette, &t, false);

        assert_eq!(
            texts(&out),
            vec![("users", true), ("🔑 id", true), ("INT", false), ("email", false), ("VARCHAR", false)]
        );
        let row_fills: Vec<&str> = out
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { radius, fill: Some(f), .. } if *radius == 4.0 => Some(*f),
                _ => None,
            })
            .collect();
        assert_eq!(row_fills, vec![palette.pk_row_bg, palette.row_bg]);
    }

    #[test]
    fn test_selected_border() {
        let t = Table::new("1", "users", Position::default());
        let mut out = Vec::new();
        let palette = Theme::Dark.palette();
        draw_node(&mut out, &CanvasConfig::default(), palette, &t, true);
        assert!(matches!(
            out[0],
            DrawCommand::Rect { stroke: Some(s), .. } if s == palette.selected_border
        ));
    }

    #[test]
    fn test_long_name_truncated() {
        let t = Table::new("1", "customer_order_line_items_archive", Position::default());
        let mut out = Vec::new();
        draw_node(&mut out, &CanvasConfig::default(), Theme::Light.palette(), &t, false);
        let (header, _) = texts(&out)[0];
        assert!(header.ends_with('…'));
        assert!(CanvasConfig::default().metrics.text_width(header) <= 136.0);
    }
}
