//! Stateful designer handle for the browser host.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::canvas::{Canvas, FrameCache, Point, Scene, Theme, Viewport, svg};
use crate::codegen;
use crate::error::Error;
use crate::export;
use crate::interaction::{Controller, PointerEvent, hit_test};
use crate::js_error;
use crate::model::{Column, ColumnType, Relation, RelationType, Schema};
use crate::store::Designer;
use crate::{parse_canvas_config, parse_dialect, parse_settings, parse_theme};

/// A relation as listed in a table's side panel.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelationRow<'a> {
    id: &'a str,
    label: String,
    kind: RelationType,
    short_label: &'static str,
}

#[wasm_bindgen(js_name = "Designer")]
pub struct WebDesigner {
    designer: Designer,
    controller: Controller,
    canvas: Canvas,
    cache: FrameCache,
    theme: Theme,
    viewport: Viewport,
}

impl Default for WebDesigner {
    fn default() -> Self {
        Self {
            designer: Designer::new(),
            controller: Controller::new(),
            canvas: Canvas::default(),
            cache: FrameCache::new(),
            theme: Theme::default(),
            viewport: Viewport::default(),
        }
    }
}

#[wasm_bindgen(js_class = "Designer")]
impl WebDesigner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(js_name = "fromJson")]
    pub fn from_json(schema_json: &str) -> Result<WebDesigner, JsValue> {
        let schema = Schema::from_json(schema_json).map_err(js_error)?;
        Ok(Self {
            designer: Designer::from_schema(schema, Default::default()),
            ..Self::default()
        })
    }

    #[wasm_bindgen(js_name = "addTable")]
    pub fn add_table(&mut self, name: &str) -> String {
        self.designer.add_table(name)
    }

    #[wasm_bindgen(js_name = "addTables")]
    pub fn add_tables(&mut self, names: Vec<String>) -> Vec<String> {
        self.designer.add_tables(&names)
    }

    #[wasm_bindgen(js_name = "deleteTable")]
    pub fn delete_table(&mut self, table_id: &str) {
        self.designer.delete_table(table_id);
    }

    #[wasm_bindgen(js_name = "renameTable")]
    pub fn rename_table(&mut self, table_id: &str, name: &str) {
        self.designer.rename_table(table_id, name);
    }

    #[wasm_bindgen(js_name = "addColumn")]
    pub fn add_column(
        &mut self,
        table_id: &str,
        name: &str,
        column_type: &str,
        is_primary: bool,
        is_auto_increment: bool,
        is_null: bool,
    ) -> Result<Option<String>, JsValue> {
        let typ = ColumnType::from_tag(column_type)
            .ok_or_else(|| js_error(Error::UnknownColumnType(column_type.to_string())))?;
        let column = Column {
            id: String::new(),
            name: name.to_string(),
            typ,
            is_primary,
            is_null,
            is_auto_increment,
        };
        Ok(self.designer.add_column(table_id, column))
    }

    #[wasm_bindgen(js_name = "deleteColumn")]
    pub fn delete_column(&mut self, table_id: &str, column_id: &str) {
        self.designer.delete_column(table_id, column_id);
    }

    #[wasm_bindgen(js_name = "addRelation")]
    pub fn add_relation(
        &mut self,
        from_table_id: &str,
        from_column_id: &str,
        to_table_id: &str,
        to_column_id: &str,
        kind: &str,
    ) -> Result<String, JsValue> {
        let kind = RelationType::from_str(kind)
            .ok_or_else(|| js_error(Error::UnknownRelationType(kind.to_string())))?;
        Ok(self.designer.add_relation(Relation {
            id: String::new(),
            from_table_id: from_table_id.to_string(),
            from_column_id: from_column_id.to_string(),
            to_table_id: to_table_id.to_string(),
            to_column_id: to_column_id.to_string(),
            kind,
        }))
    }

    #[wasm_bindgen(js_name = "deleteRelation")]
    pub fn delete_relation(&mut self, relation_id: &str) {
        self.designer.delete_relation(relation_id);
    }

    #[wasm_bindgen(js_name = "loadTemplate")]
    pub fn load_template(&mut self, key: &str) -> Result<(), JsValue> {
        self.designer.load_template(key).map_err(js_error)
    }

    pub fn selected(&self) -> Option<String> {
        self.designer.selected().map(str::to_string)
    }

    pub fn select(&mut self, table_id: Option<String>) {
        self.designer.select(table_id);
    }

    #[wasm_bindgen(js_name = "setTheme")]
    pub fn set_theme(&mut self, theme: &str) -> Result<(), JsValue> {
        self.theme = parse_theme(Some(theme)).map_err(js_error)?;
        Ok(())
    }

    /// Override canvas constants from a partial JSON object.
    #[wasm_bindgen(js_name = "setCanvasConfig")]
    pub fn set_canvas_config(&mut self, config_json: &str) -> Result<(), JsValue> {
        self.canvas = Canvas::new(parse_canvas_config(Some(config_json)).map_err(js_error)?);
        self.cache.invalidate();
        Ok(())
    }

    #[wasm_bindgen(js_name = "setViewport")]
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport { width, height };
    }

    /// Relations touching a table, as a JSON array of `{ id, label, kind, shortLabel }`
    pub fn relations(&self, table_id: &str) -> Result<String, JsValue> {
        let schema = self.designer.schema();
        let rows: Vec<RelationRow<'_>> = schema
            .relations_of(table_id)
            .map(|r| RelationRow {
                id: &r.id,
                label: schema.relation_label(r),
                kind: r.kind,
                short_label: r.kind.short_label(),
            })
            .collect();
        serde_json::to_string(&rows).map_err(js_error)
    }

    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let at = Point::new(x, y);
        let target = hit_test(&self.designer.schema().tables, at, self.canvas.config());
        self.pointer(PointerEvent::Down { at, target });
    }

    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer(PointerEvent::Move { at: Point::new(x, y) });
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        let at = Point::new(x, y);
        let target = hit_test(&self.designer.schema().tables, at, self.canvas.config());
        self.pointer(PointerEvent::Up { at, target });
    }

    #[wasm_bindgen(js_name = "pointerLeave")]
    pub fn pointer_leave(&mut self) {
        self.pointer(PointerEvent::Leave);
    }

    /// Current design as an export document
    pub fn snapshot(&self) -> Result<String, JsValue> {
        export::to_json(self.designer.schema()).map_err(js_error)
    }

    pub fn generate(&self, dialect: Option<String>, settings_json: Option<String>) -> Result<String, JsValue> {
        let dialect = parse_dialect(dialect.as_deref()).map_err(js_error)?;
        let settings = parse_settings(settings_json.as_deref()).map_err(js_error)?;
        let schema = self.designer.schema();
        Ok(codegen::generate_with(dialect, &schema.tables, &schema.relations, &settings))
    }

    /// Draw commands as JSON, or `undefined` when the frame is unchanged
    pub fn draw(&mut self) -> Result<Option<String>, JsValue> {
        let pending = self.controller.pending_relation();
        let schema = self.designer.schema();
        let scene = Scene {
            tables: &schema.tables,
            relations: &schema.relations,
            selected: self.designer.selected(),
            pending: pending.as_ref(),
        };
        match self.cache.render(&self.canvas, &scene, self.viewport, self.theme) {
            Some(commands) => serde_json::to_string(commands).map(Some).map_err(js_error),
            None => Ok(None),
        }
    }

    pub fn svg(&mut self) -> String {
        let pending = self.controller.pending_relation();
        let schema = self.designer.schema();
        let scene = Scene {
            tables: &schema.tables,
            relations: &schema.relations,
            selected: self.designer.selected(),
            pending: pending.as_ref(),
        };
        svg::to_svg(&self.canvas.draw(&scene, self.viewport, self.theme), self.viewport)
    }
}

impl WebDesigner {
    fn pointer(&mut self, event: PointerEvent) {
        let effect = self.controller.handle(event, &self.designer.schema().tables);
        if let Some(effect) = effect {
            self.designer.apply_effect(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relations_for_side_panel() {
        let mut web = WebDesigner::new();
        web.load_template("blog").unwrap();
        let json = web.relations("2").unwrap();
        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["label"], "posts → authors");
        assert_eq!(rows[0]["kind"], "one-to-many");
        assert_eq!(rows[0]["shortLabel"], "1:N");
        assert_eq!(web.relations("nope").unwrap(), "[]");
    }

    #[test]
    fn test_generate_with_settings() {
        let mut web = WebDesigner::new();
        web.add_table("users");
        let py = web
            .generate(Some("python".into()), Some(r#"{"host":"db","password":"s3cret"}"#.into()))
            .unwrap();
        assert!(py.contains("host='db'"));
        assert!(py.contains("password='s3cret'"));
        assert!(py.contains("database='your_database'"));
    }

    #[test]
    fn test_canvas_config_and_viewport_redraw() {
        let mut web = WebDesigner::new();
        web.add_table("users");
        assert!(web.draw().unwrap().is_some());
        assert!(web.draw().unwrap().is_none());

        web.set_canvas_config(r#"{"nodeWidth":300}"#).unwrap();
        let frame = web.draw().unwrap().unwrap();
        assert!(frame.contains(r#""width":300.0"#));

        web.set_viewport(400.0, 300.0);
        assert!(web.draw().unwrap().is_some());
        assert!(web.svg().starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300""#));
    }
}
