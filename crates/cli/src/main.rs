#![deny(unsafe_code)]
//! CLI binary for the hausa-scribble wallpaper generator.
//!
//! Subcommands:
//! - `render` renders one wallpaper (by catalog id or raw seed) to a PNG
//! - `export` renders selected catalog wallpapers at full size into a directory
//! - `previews` renders preview-size PNGs in parallel
//! - `list` prints palettes, motifs and aspect ratios

mod error;
mod logging;
mod progress;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use hausa_scribble_core::catalog::{catalog, select, RATIOS};
use hausa_scribble_core::{render, AspectRatio, Motif, Palette, Raster, ScribbleError, Settings, Wallpaper};
use hausa_scribble_export::snapshot::write_png;
use hausa_scribble_export::{render_previews, BulkExporter, CancelToken, DirectorySink, ExportOptions};
use logging::{init_logging, LoggingConfig};
use progress::ExportProgress;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "hausa-scribble", about = "Seeded geometric wallpaper generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Settings file (JSON object); flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by every rendering subcommand.
#[derive(Args)]
struct Look {
    /// Aspect ratio preset id or name (9:16, 16:9, 4:3, 1:1, phone, ...).
    #[arg(short, long)]
    ratio: Option<String>,

    /// Shape-count multiplier.
    #[arg(short, long)]
    density: Option<f64>,
}

#[derive(Subcommand)]
enum Command {
    /// Render a single wallpaper to a PNG.
    Render {
        /// Catalog id (seed = id * 1337 + 42).
        #[arg(long, conflicts_with = "seed", required_unless_present = "seed")]
        id: Option<u32>,

        /// Raw renderer seed.
        #[arg(long, allow_negative_numbers = true)]
        seed: Option<f64>,

        #[command(flatten)]
        look: Look,

        /// Output file path (defaults to the catalog file name).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export catalog wallpapers at full resolution, one at a time.
    ///
    /// The run is never cancelled from here: there is no interrupt hook, so
    /// stopping the process mid-batch leaves the files written so far and no
    /// partial PNG.
    Export {
        /// Comma-separated catalog ids, exported in the order given.
        #[arg(long, value_delimiter = ',', required_unless_present = "all")]
        ids: Vec<u32>,

        /// Export the whole catalog.
        #[arg(long, conflicts_with = "ids")]
        all: bool,

        #[command(flatten)]
        look: Look,

        /// Destination directory (created if missing).
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Pause between items in milliseconds.
        #[arg(long)]
        pause_ms: Option<u64>,
    },
    /// Render preview-size PNGs in parallel.
    Previews {
        /// Comma-separated catalog ids (defaults to the whole catalog).
        #[arg(long, value_delimiter = ',')]
        ids: Vec<u32>,

        #[command(flatten)]
        look: Look,

        /// Destination directory (created if missing).
        #[arg(short, long, default_value = "previews")]
        out_dir: PathBuf,
    },
    /// List palettes, motifs and aspect ratios.
    List,
}

fn load_settings(config: Option<&Path>, look: Option<&Look>) -> Result<Settings, CliError> {
    let mut settings = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(look) = look {
        if let Some(ratio) = &look.ratio {
            settings.ratio = ratio.clone();
        }
        if let Some(density) = look.density {
            settings.density = density;
        }
    }
    settings.validate()?;
    Ok(settings)
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.config.as_deref();
    match cli.command {
        Command::List => {
            let palettes = Palette::list_names();
            let motifs: Vec<&str> = Motif::ALL.iter().map(|m| m.name()).collect();
            if cli.json {
                print_json(&serde_json::json!({
                    "palettes": palettes,
                    "motifs": motifs,
                    "ratios": RATIOS,
                }))?;
            } else {
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
                println!("Motifs:");
                println!("  {}", motifs.join(", "));
                println!("Aspect ratios:");
                for r in &RATIOS {
                    println!("  {:<5} {:<8} {}x{}", r.id, r.name, r.width, r.height);
                }
            }
        }
        Command::Render {
            id,
            seed,
            look,
            output,
        } => {
            let settings = load_settings(config, Some(&look))?;
            let ratio = settings.aspect_ratio()?;
            let (seed, default_name) = match (id, seed) {
                (Some(id), _) => {
                    select(&[id], settings.wallpaper_count)?;
                    let w = Wallpaper::from_id(id);
                    (w.seed_f64(), w.file_name(&settings.product, &ratio))
                }
                (None, Some(seed)) => (
                    seed,
                    format!(
                        "{}-seed-{seed}-{}.png",
                        settings.product,
                        ratio.name.to_lowercase()
                    ),
                ),
                (None, None) => return Err(CliError::Input("pass --id or --seed".into())),
            };
            let output = output.unwrap_or_else(|| PathBuf::from(default_name));

            let mut raster = Raster::new(ratio.width, ratio.height)?;
            let composition = render(&mut raster, ratio.width, ratio.height, seed, settings.density)
                .ok_or(ScribbleError::InvalidDimensions {
                    width: ratio.width,
                    height: ratio.height,
                })?;
            write_png(&raster, &output)?;

            if cli.json {
                print_json(&serde_json::json!({
                    "id": id,
                    "seed": seed,
                    "ratio": ratio,
                    "density": settings.density,
                    "composition": composition,
                    "output": output.display().to_string(),
                }))?;
            } else {
                eprintln!(
                    "rendered seed {seed} ({}x{}, {} palette, {} layers, {} shapes) -> {}",
                    ratio.width,
                    ratio.height,
                    composition.palette,
                    composition.layers.len(),
                    composition.total_shapes(),
                    output.display()
                );
            }
        }
        Command::Export {
            ids,
            all,
            look,
            out_dir,
            pause_ms,
        } => {
            let mut settings = load_settings(config, Some(&look))?;
            if let Some(pause_ms) = pause_ms {
                settings.pause_ms = pause_ms;
            }
            let wallpapers = if all {
                catalog(settings.wallpaper_count)
            } else {
                select(&ids, settings.wallpaper_count)?
            };
            if wallpapers.is_empty() {
                return Err(CliError::Input("no wallpapers selected".into()));
            }

            let options = ExportOptions::from_settings(&settings)?;
            let sink = DirectorySink::new(&out_dir)?;
            let mut exporter = BulkExporter::new(sink, options);
            let progress = ExportProgress::new(wallpapers.len(), cli.json);
            let report = exporter.run(&wallpapers, &CancelToken::new(), |_, outcome| {
                progress.item_done(outcome);
            });
            progress.finish(&report);

            let ratio = exporter.options().ratio;
            let sink = exporter.into_sink();
            if cli.json {
                print_json(&serde_json::to_value(&report)?)?;
            } else {
                eprintln!(
                    "exported {} of {} wallpapers ({}x{}) to {}",
                    report.succeeded(),
                    wallpapers.len(),
                    ratio.width,
                    ratio.height,
                    sink.dir().display()
                );
                for failed in report.outcomes.iter().filter(|o| !o.is_ok()) {
                    eprintln!(
                        "  #{} {}: {}",
                        failed.id,
                        failed.file_name,
                        failed.error.as_deref().unwrap_or_default()
                    );
                }
            }
            if report.failed() > 0 {
                return Err(CliError::PartialExport {
                    failed: report.failed(),
                    total: report.outcomes.len(),
                });
            }
        }
        Command::Previews { ids, look, out_dir } => {
            let settings = load_settings(config, Some(&look))?;
            let ratio: AspectRatio = settings.aspect_ratio()?;
            let wallpapers = if ids.is_empty() {
                catalog(settings.wallpaper_count)
            } else {
                select(&ids, settings.wallpaper_count)?
            };
            std::fs::create_dir_all(&out_dir)?;

            let mut written = Vec::with_capacity(wallpapers.len());
            for preview in render_previews(&wallpapers, &ratio, settings.density) {
                let preview = preview?;
                let name = preview
                    .wallpaper
                    .file_name(&settings.product, &ratio)
                    .replace(".png", "-preview.png");
                let path = out_dir.join(name);
                write_png(&preview.raster, &path)?;
                written.push(path.display().to_string());
            }

            if cli.json {
                print_json(&serde_json::json!({
                    "ratio": ratio,
                    "size": ratio.preview_size(),
                    "files": written,
                }))?;
            } else {
                let (w, h) = ratio.preview_size();
                eprintln!(
                    "wrote {} previews ({w}x{h}) to {}",
                    written.len(),
                    out_dir.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.verbose));
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn export_parses_id_list_in_order() {
        let cli = Cli::try_parse_from(["hausa-scribble", "export", "--ids", "7,2,9", "-o", "out"])
            .unwrap();
        match cli.command {
            Command::Export { ids, all, .. } => {
                assert_eq!(ids, [7, 2, 9]);
                assert!(!all);
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn export_requires_a_selection() {
        assert!(Cli::try_parse_from(["hausa-scribble", "export"]).is_err());
        assert!(Cli::try_parse_from(["hausa-scribble", "export", "--all", "--ids", "1"]).is_err());
    }

    #[test]
    fn render_takes_id_or_seed_not_both() {
        assert!(Cli::try_parse_from(["hausa-scribble", "render", "--id", "1"]).is_ok());
        assert!(Cli::try_parse_from(["hausa-scribble", "render", "--seed", "-3.5"]).is_ok());
        assert!(Cli::try_parse_from(["hausa-scribble", "render"]).is_err());
        assert!(
            Cli::try_parse_from(["hausa-scribble", "render", "--id", "1", "--seed", "2"]).is_err()
        );
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"ratio": "16:9", "density": 2.0, "pause_ms": 5}"#).unwrap();
        let look = Look {
            ratio: None,
            density: Some(0.5),
        };
        let Ok(settings) = load_settings(Some(&path), Some(&look)) else {
            panic!("settings file should load");
        };
        assert_eq!(settings.ratio, "16:9");
        assert_eq!(settings.density, 0.5);
        assert_eq!(settings.pause_ms, 5);
    }

    #[test]
    fn unknown_ratio_flag_is_input_error() {
        let look = Look {
            ratio: Some("21:9".into()),
            density: None,
        };
        let err = load_settings(None, Some(&look)).err().unwrap();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn render_by_id_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("one.png");
        let cli = Cli::try_parse_from([
            "hausa-scribble",
            "render",
            "--id",
            "1",
            "--density",
            "0.2",
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();
        if let Err(e) = run(cli) {
            panic!("render failed: {e}");
        }
        assert!(out.is_file());
    }

    #[test]
    fn export_writes_selected_wallpapers() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("batch");
        let cli = Cli::try_parse_from([
            "hausa-scribble",
            "export",
            "--ids",
            "3,1",
            "--ratio",
            "1:1",
            "--density",
            "0.2",
            "--pause-ms",
            "0",
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();
        if let Err(e) = run(cli) {
            panic!("export failed: {e}");
        }
        assert!(out.join("hausa-scribble-3-square.png").is_file());
        assert!(out.join("hausa-scribble-1-square.png").is_file());
    }

    #[test]
    fn render_unknown_id_is_input_error() {
        let cli = Cli::try_parse_from(["hausa-scribble", "render", "--id", "9999"]).unwrap();
        assert_eq!(run(cli).err().unwrap().exit_code(), 12);
    }
}
