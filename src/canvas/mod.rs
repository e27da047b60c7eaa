//! Canvas rendering: a pure function from scene inputs to draw commands.

mod command;
mod connector;
mod node;
pub mod svg;
mod theme;

pub use command::{Color, DrawCommand, Point};
pub use connector::arrowhead;
pub use node::{NodeBox, node_box};
pub use theme::{ONE_TO_MANY_STROKE, PENDING_STROKE, Palette, RELATION_STROKE, Theme};

use crate::measure::TextMetrics;
use crate::model::{Relation, Table};
use serde::Deserialize;

/// Visual constants of the designer surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub dot_spacing: f64,
    pub dot_radius: f64,
    pub node_width: f64,
    pub node_radius: f64,
    /// Vertical offset of the connector anchor from a node's top edge
    pub anchor_offset: f64,
    pub handle_radius: f64,
    pub arrow_size: f64,
    pub line_width: f64,
    pub dash: [f64; 2],
    #[serde(skip)]
    pub metrics: TextMetrics,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            dot_spacing: 50.0,
            dot_radius: 1.5,
            node_width: 160.0,
            node_radius: 8.0,
            anchor_offset: 60.0,
            handle_radius: 6.0,
            arrow_size: 12.0,
            line_width: 2.0,
            dash: [5.0, 5.0],
            metrics: TextMetrics::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 2000.0,
            height: 1500.0,
        }
    }
}

/// A relation whose source is chosen and whose end follows the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRelation {
    pub from_table_id: String,
    pub pointer: Point,
}

#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub tables: &'a [Table],
    pub relations: &'a [Relation],
    pub selected: Option<&'a str>,
    pub pending: Option<&'a PendingRelation>,
}

impl<'a> Scene<'a> {
    pub fn new(tables: &'a [Table], relations: &'a [Relation]) -> Self {
        Self {
            tables,
            relations,
            selected: None,
            pending: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    config: CanvasConfig,
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn draw(&self, scene: &Scene<'_>, viewport: Viewport, theme: Theme) -> Vec<DrawCommand> {
        let palette = theme.palette();
        let mut out = vec![DrawCommand::Clear {
            width: viewport.width,
            height: viewport.height,
            color: palette.background,
        }];

        self.draw_grid(&mut out, viewport, palette);

        // Connectors go under the nodes
        for relation in scene.relations {
            let from = scene.tables.iter().find(|t| t.id == relation.from_table_id);
            let to = scene.tables.iter().find(|t| t.id == relation.to_table_id);
            if let (Some(from), Some(to)) = (from, to) {
                connector::draw_relation(&mut out, &self.config, from, to, relation.kind);
            }
        }

        if let Some(pending) = scene.pending {
            if let Some(from) = scene.tables.iter().find(|t| t.id == pending.from_table_id) {
                connector::draw_pending(&mut out, &self.config, from, pending.pointer);
            }
        }

        for table in scene.tables {
            let selected = scene.selected == Some(table.id.as_str());
            node::draw_node(&mut out, &self.config, palette, table, selected);
        }

        out
    }

    fn draw_grid(&self, out: &mut Vec<DrawCommand>, viewport: Viewport, palette: &Palette) {
        let step = self.config.dot_spacing;
        if step <= 0.0 {
            return;
        }
        let mut x = 0.0;
        while x < viewport.width {
            let mut y = 0.0;
            while y < viewport.height {
                out.push(DrawCommand::FillCircle {
                    center: Point::new(x, y),
                    radius: self.config.dot_radius,
                    color: palette.dot,
                });
                y += step;
            }
            x += step;
        }
    }
}

/// Draw with the default configuration.
pub fn draw(scene: &Scene<'_>, viewport: Viewport, theme: Theme) -> Vec<DrawCommand> {
    Canvas::default().draw(scene, viewport, theme)
}

/// Remembers the inputs of the last frame and redraws only when one changed.
#[derive(Debug, Default)]
pub struct FrameCache {
    last: Option<FrameInputs>,
    commands: Vec<DrawCommand>,
}

#[derive(Debug, Clone, PartialEq)]
struct FrameInputs {
    tables: Vec<Table>,
    relations: Vec<Relation>,
    selected: Option<String>,
    pending: Option<PendingRelation>,
    viewport: Viewport,
    theme: Theme,
}

impl FrameInputs {
    fn matches(&self, scene: &Scene<'_>, viewport: Viewport, theme: Theme) -> bool {
        self.viewport == viewport
            && self.theme == theme
            && self.selected.as_deref() == scene.selected
            && self.pending.as_ref() == scene.pending
            && self.tables == scene.tables
            && self.relations == scene.relations
    }
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new frame, or `None` when nothing changed since the last call.
    pub fn render(
        &mut self,
        canvas: &Canvas,
        scene: &Scene<'_>,
        viewport: Viewport,
        theme: Theme,
    ) -> Option<&[DrawCommand]> {
        if let Some(last) = &self.last {
            if last.matches(scene, viewport, theme) {
                return None;
            }
        }
        self.commands = canvas.draw(scene, viewport, theme);
        self.last = Some(FrameInputs {
            tables: scene.tables.to_vec(),
            relations: scene.relations.to_vec(),
            selected: scene.selected.map(str::to_string),
            pending: scene.pending.cloned(),
            viewport,
            theme,
        });
        Some(&self.commands)
    }

    /// The most recent frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
