use dbsketch::canvas::{self, Canvas, CanvasConfig, Scene, Theme, Viewport};
use dbsketch::codegen::{self, ConnectionSettings, Dialect};
use dbsketch::model::Schema;
use dbsketch::{Error, export, parse_canvas_config, templates};
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

enum Format {
    Code(Dialect),
    Svg,
    Json,
}

impl Format {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "svg" => Some(Format::Svg),
            "json" => Some(Format::Json),
            other => Dialect::from_str(other).map(Format::Code),
        }
    }
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} (<design.json> | --template <key>) [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --template <key>      Start from a built-in template ({})", templates::TEMPLATE_KEYS.join(", "));
    eprintln!("  -f, --format <fmt>    sql, nodejs, python, php, svg or json (default: sql)");
    eprintln!("  -t, --theme <name>    Canvas theme for svg output: light, dark (default: light)");
    eprintln!("  -c, --config <file>   Canvas constants for svg output, as a JSON object");
    eprintln!("  --host <host>         Connection host for script output (default: localhost)");
    eprintln!("  --user <user>         Connection user (default: root)");
    eprintln!("  --password <secret>   Connection password (default: empty)");
    eprintln!("  --database <name>     Database name (default: your_database)");
    eprintln!("  -o, --output <file>   Output file (default: stdout)");
    process::exit(1);
}

/// argv[0], which a bare `execve` may leave out.
fn program_name(args: &[String]) -> &str {
    args.first().map_or("dbsketch", String::as_str)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = program_name(&args);

    if args.len() < 2 {
        usage(program);
    }

    let mut input_path: Option<String> = None;
    let mut template_key: Option<String> = None;
    let mut output_path: Option<String> = None;
    let mut format = Format::Code(Dialect::Sql);
    let mut theme = Theme::default();
    let mut config_path: Option<String> = None;
    let mut settings = ConnectionSettings::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--template" => {
                i += 1;
                if i < args.len() {
                    template_key = Some(args[i].clone());
                }
            }
            "-f" | "--format" => {
                i += 1;
                if i < args.len() {
                    format = Format::from_str(&args[i]).unwrap_or_else(|| {
                        eprintln!("Invalid format: {}", args[i]);
                        process::exit(1);
                    });
                }
            }
            "-t" | "--theme" => {
                i += 1;
                if i < args.len() {
                    theme = Theme::from_str(&args[i]).unwrap_or_else(|| {
                        eprintln!("{}", Error::UnknownTheme(args[i].clone()));
                        process::exit(1);
                    });
                }
            }
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_path = Some(args[i].clone());
                }
            }
            "--host" | "--user" | "--password" | "--database" => {
                let flag = args[i].as_str();
                i += 1;
                if i < args.len() {
                    let value = args[i].clone();
                    match flag {
                        "--host" => settings.host = value,
                        "--user" => settings.user = value,
                        "--password" => settings.password = value,
                        _ => settings.database = value,
                    }
                }
            }
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-h" | "--help" => usage(program),
            arg if !arg.starts_with('-') && input_path.is_none() => {
                input_path = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let schema = match (input_path, template_key) {
        (Some(path), None) => {
            let input = match fs::read_to_string(&path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to read {}: {}", path, e);
                    process::exit(1);
                }
            };
            match Schema::from_json(&input) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}: {}", path, e);
                    process::exit(1);
                }
            }
        }
        (None, Some(key)) => match templates::template(&key) {
            Some(t) => t.schema,
            None => {
                eprintln!("{}", Error::UnknownTemplate(key));
                process::exit(1);
            }
        },
        _ => usage(program),
    };

    let config = match config_path {
        Some(path) => {
            let input = match fs::read_to_string(&path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to read {}: {}", path, e);
                    process::exit(1);
                }
            };
            match parse_canvas_config(Some(&input)) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("{}: {}", path, e);
                    process::exit(1);
                }
            }
        }
        None => CanvasConfig::default(),
    };

    tracing::debug!(
        tables = schema.tables.len(),
        relations = schema.relations.len(),
        "loaded design"
    );

    let output = match format {
        Format::Code(dialect) => codegen::generate_with(dialect, &schema.tables, &schema.relations, &settings),
        Format::Svg => {
            let viewport = Viewport::default();
            let commands =
                Canvas::new(config).draw(&Scene::new(&schema.tables, &schema.relations), viewport, theme);
            canvas::svg::to_svg(&commands, viewport)
        }
        Format::Json => match export::to_json(&schema) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_with_empty_argv() {
        assert_eq!(program_name(&[]), "dbsketch");
        assert_eq!(program_name(&["./bin/dbsketch".to_string()]), "./bin/dbsketch");
    }

    #[test]
    fn test_format_from_str() {
        assert!(matches!(Format::from_str("SVG"), Some(Format::Svg)));
        assert!(matches!(Format::from_str("mysql"), Some(Format::Code(Dialect::Sql))));
        assert!(Format::from_str("yaml").is_none());
    }
}
