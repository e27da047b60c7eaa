pub mod canvas;
pub mod codegen;
pub mod error;
pub mod export;
pub mod interaction;
pub mod measure;
pub mod model;
pub mod store;
pub mod templates;
pub mod web;

pub use error::{Error, Result};

use wasm_bindgen::prelude::*;

use canvas::{Canvas, CanvasConfig, Scene, Theme, Viewport};
use codegen::{ConnectionSettings, Dialect};
use model::Schema;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

pub fn parse_dialect(name: Option<&str>) -> Result<Dialect> {
    match name {
        None => Ok(Dialect::default()),
        Some(s) => Dialect::from_str(s).ok_or_else(|| Error::UnknownDialect(s.to_string())),
    }
}

pub fn parse_theme(name: Option<&str>) -> Result<Theme> {
    match name {
        None => Ok(Theme::default()),
        Some(s) => Theme::from_str(s).ok_or_else(|| Error::UnknownTheme(s.to_string())),
    }
}

/// Connection placeholders from a partial JSON object; missing fields keep their defaults.
pub fn parse_settings(json: Option<&str>) -> Result<ConnectionSettings> {
    match json {
        None => Ok(ConnectionSettings::default()),
        Some(s) => Ok(serde_json::from_str(s)?),
    }
}

/// Canvas constants from a partial JSON object; missing fields keep their defaults.
pub fn parse_canvas_config(json: Option<&str>) -> Result<CanvasConfig> {
    match json {
        None => Ok(CanvasConfig::default()),
        Some(s) => Ok(serde_json::from_str(s)?),
    }
}

/// Generate SQL or connection code for a `{ tables, relations }` document
#[wasm_bindgen(js_name = "generateCode")]
pub fn generate_code(
    schema_json: &str,
    dialect: Option<String>,
    settings_json: Option<String>,
) -> std::result::Result<String, JsValue> {
    let schema = Schema::from_json(schema_json).map_err(js_error)?;
    let dialect = parse_dialect(dialect.as_deref()).map_err(js_error)?;
    let settings = parse_settings(settings_json.as_deref()).map_err(js_error)?;
    Ok(codegen::generate_with(dialect, &schema.tables, &schema.relations, &settings))
}

/// Render a design to a standalone SVG document
#[wasm_bindgen(js_name = "renderSvg")]
pub fn render_svg(
    schema_json: &str,
    theme: Option<String>,
    config_json: Option<String>,
) -> std::result::Result<String, JsValue> {
    let schema = Schema::from_json(schema_json).map_err(js_error)?;
    let theme = parse_theme(theme.as_deref()).map_err(js_error)?;
    let canvas = Canvas::new(parse_canvas_config(config_json.as_deref()).map_err(js_error)?);
    let viewport = Viewport::default();
    let commands = canvas.draw(&Scene::new(&schema.tables, &schema.relations), viewport, theme);
    Ok(canvas::svg::to_svg(&commands, viewport))
}

/// Draw commands for a design, as a JSON array
#[wasm_bindgen(js_name = "drawCommands")]
pub fn draw_commands(
    schema_json: &str,
    theme: Option<String>,
    config_json: Option<String>,
) -> std::result::Result<String, JsValue> {
    let schema = Schema::from_json(schema_json).map_err(js_error)?;
    let theme = parse_theme(theme.as_deref()).map_err(js_error)?;
    let canvas = Canvas::new(parse_canvas_config(config_json.as_deref()).map_err(js_error)?);
    let commands = canvas.draw(
        &Scene::new(&schema.tables, &schema.relations),
        Viewport::default(),
        theme,
    );
    serde_json::to_string(&commands).map_err(js_error)
}

/// Line-tagged SQL preview, as a JSON array
#[wasm_bindgen(js_name = "previewLines")]
pub fn preview_lines(schema_json: &str) -> std::result::Result<String, JsValue> {
    let schema = Schema::from_json(schema_json).map_err(js_error)?;
    serde_json::to_string(&codegen::preview(&schema.tables, &schema.relations)).map_err(js_error)
}

/// Validate and pretty-print a design for download
#[wasm_bindgen(js_name = "exportJson")]
pub fn export_json(schema_json: &str) -> std::result::Result<String, JsValue> {
    let schema = Schema::from_json(schema_json).map_err(js_error)?;
    export::to_json(&schema).map_err(js_error)
}

/// A built-in template as a design document
#[wasm_bindgen(js_name = "templateJson")]
pub fn template_json(key: &str) -> std::result::Result<String, JsValue> {
    let template = templates::template(key).ok_or_else(|| js_error(Error::UnknownTemplate(key.to_string())))?;
    export::to_json(&template.schema).map_err(js_error)
}
