//! SVG serialisation of a draw command list.

use super::Viewport;
use super::command::{DrawCommand, Point};
use std::fmt::Write;

pub fn to_svg(commands: &[DrawCommand], viewport: Viewport) -> String {
    let mut svg = String::new();

    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        viewport.width, viewport.height, viewport.width, viewport.height
    )
    .unwrap();

    writeln!(
        &mut svg,
        r#"<style>
  text {{ font-family: ui-sans-serif, system-ui, sans-serif; }}
</style>"#
    )
    .unwrap();

    for command in commands {
        render_command(&mut svg, command);
    }

    writeln!(&mut svg, "</svg>").unwrap();
    svg
}

fn render_command(svg: &mut String, command: &DrawCommand) {
    match command {
        DrawCommand::Clear { width, height, color } => {
            writeln!(
                svg,
                r#"<rect x="0" y="0" width="{}" height="{}" fill="{}" />"#,
                width, height, color
            )
            .unwrap();
        }
        DrawCommand::FillCircle { center, radius, color } => {
            writeln!(
                svg,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}" />"#,
                center.x, center.y, radius, color
            )
            .unwrap();
        }
        DrawCommand::StrokeLine {
            from,
            to,
            color,
            width,
            dash,
        } => {
            let dash_attr = dash
                .map(|[on, off]| format!(r#" stroke-dasharray="{} {}""#, on, off))
                .unwrap_or_default();
            writeln!(
                svg,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{} />"#,
                from.x, from.y, to.x, to.y, color, width, dash_attr
            )
            .unwrap();
        }
        DrawCommand::FillPolygon { points, color } => {
            writeln!(
                svg,
                r#"<polygon points="{}" fill="{}" />"#,
                points_attr(points),
                color
            )
            .unwrap();
        }
        DrawCommand::Rect {
            origin,
            width,
            height,
            radius,
            fill,
            stroke,
            stroke_width,
        } => {
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}" stroke-width="{}""#, s, stroke_width))
                .unwrap_or_default();
            writeln!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}"{} />"#,
                origin.x,
                origin.y,
                width,
                height,
                radius,
                fill.unwrap_or("none"),
                stroke_attr
            )
            .unwrap();
        }
        DrawCommand::Text {
            at,
            text,
            color,
            size,
            bold,
        } => {
            let weight = if *bold { r#" font-weight="bold""# } else { "" };
            writeln!(
                svg,
                r#"<text x="{}" y="{}" font-size="{}" fill="{}"{}>{}</text>"#,
                at.x,
                at.y,
                size,
                color,
                weight,
                escape_xml(text)
            )
            .unwrap();
        }
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{PendingRelation, Scene, Theme, draw};
    use crate::templates::template;

    #[test]
    fn test_render_template() {
        let schema = template("blog").unwrap().schema;
        let viewport = Viewport::default();
        let cmds = draw(&Scene::new(&schema.tables, &schema.relations), viewport, Theme::Light);
        let svg = to_svg(&cmds, viewport);

        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="2000" height="1500""#));
        assert!(svg.contains(">authors</text>"));
        assert!(svg.contains(">🔑 id</text>"));
        assert!(svg.contains(r##"stroke="#f59e0b""##));
        assert!(svg.contains("<polygon"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_dashed_pending_line() {
        let schema = template("user-product").unwrap().schema;
        let pending = PendingRelation {
            from_table_id: "1".into(),
            pointer: Point::new(300.0, 300.0),
        };
        let scene = Scene {
            pending: Some(&pending),
            ..Scene::new(&schema.tables, &schema.relations)
        };
        let cmds = draw(&scene, Viewport::default(), Theme::Dark);
        let svg = to_svg(&cmds, Viewport::default());
        assert!(svg.contains(r##"stroke="#9ca3af" stroke-width="2" stroke-dasharray="5 5""##));
        assert!(svg.contains(r##"fill="#1a1a1a""##));
    }

    #[test]
    fn test_escape() {
        let cmds = vec![DrawCommand::Text {
            at: Point::new(0.0, 0.0),
            text: "a<b & \"c\"".into(),
            color: "#000",
            size: 12.0,
            bold: false,
        }];
        let svg = to_svg(&cmds, Viewport { width: 10.0, height: 10.0 });
        assert!(svg.contains(">a&lt;b &amp; &quot;c&quot;</text>"));
    }
}
