//! Command-line interface.
//!
//! ```text
//! chartpal generate [--input FILE] [--count N] [--seed S] [--scheme S] [--strict]
//!                   [--format css|json|text] [--share]
//! chartpal import FILE [--format json|text]
//! chartpal export TOKEN [--all | --set ID]
//! chartpal contrast A B
//! chartpal project new FILE
//! chartpal project <show|generate|add|remove|set-color|strict|create-set|
//!                   duplicate|rename|delete> TOKEN ...
//! ```
//!
//! `project` commands edit a share token: every edit prints the updated
//! token, so edits chain through the shell.
//!
//! Command output goes to `out`; notes meant for a human (share tokens,
//! suggested file names) go to `err`, so `chartpal generate > colors.css`
//! stays clean.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use chartpal_css::{
    css_for_all, css_for_palette, export_filename, parse_mode_colors, parse_named_colors,
    ColorNames, ExportScope, ModeColors, PaletteBlock,
};
use chartpal_engine::{
    contrast_ratio, generate_with, ColorMode, ColorScheme, NamedColor, PaletteRequest,
    PaletteResult, Rgb,
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use crate::project::ColorConfig;
use crate::settings::Settings;
use crate::share::{decode_state, encode_state};
use crate::swatch::swatch;

#[derive(Debug, Parser)]
#[command(
    name = "chartpal",
    version,
    about = "Accessible chart color palettes for light and dark modes"
)]
pub struct Cli {
    /// YAML config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a light/dark palette
    Generate(GenerateArgs),
    /// List the colors a stylesheet defines
    Import(ImportArgs),
    /// Turn a share token back into CSS
    Export(ExportArgs),
    /// Contrast ratio between two colors
    Contrast(ContrastArgs),
    /// Create and edit projects held in share tokens
    Project(ProjectArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Css,
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Json,
    Text,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Stylesheet or hex list to draw colors from
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Number of series colors
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Seed; the same seed reproduces the same palette
    #[arg(short, long, default_value_t = 0)]
    pub seed: u64,

    /// mixed, warm, cool, neutral or monochromatic
    #[arg(long)]
    pub scheme: Option<ColorScheme>,

    /// Only emit colors from the input
    #[arg(long)]
    pub strict: bool,

    #[arg(short, long, value_enum, default_value_t = Format::Css)]
    pub format: Format,

    /// Also print a share token
    #[arg(long)]
    pub share: bool,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub file: PathBuf,

    #[arg(short, long, value_enum, default_value_t = ListFormat::Text)]
    pub format: ListFormat,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    pub token: String,

    /// Export the default palette and every set
    #[arg(long, conflicts_with = "set")]
    pub all: bool,

    /// Export one set by id
    #[arg(long, value_name = "ID")]
    pub set: Option<String>,
}

#[derive(Debug, Args)]
pub struct ContrastArgs {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub action: ProjectAction,
}

/// A project and the palette in it to work on.
#[derive(Debug, Args)]
pub struct Target {
    /// Share token of the project
    pub token: String,

    /// Color set id; the default palette when omitted
    #[arg(long, value_name = "ID")]
    pub set: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProjectAction {
    /// Start a project from a stylesheet or hex list
    New { file: PathBuf },
    /// List every palette in a project
    Show { token: String },
    /// Regenerate a palette from the project's imported colors
    Generate {
        #[command(flatten)]
        target: Target,
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        scheme: Option<ColorScheme>,
    },
    /// Append a copy of the last color
    Add {
        #[command(flatten)]
        target: Target,
    },
    /// Remove the color at a position (counting from 1)
    Remove {
        #[command(flatten)]
        target: Target,
        position: usize,
    },
    /// Replace the color at a position (counting from 1)
    SetColor {
        #[command(flatten)]
        target: Target,
        position: usize,
        color: String,
        /// Replace the dark-mode color instead of the light one
        #[arg(long)]
        dark: bool,
    },
    /// Turn strict mode on, or off with --off
    Strict {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        off: bool,
    },
    /// Add a numbered set copied from a palette
    CreateSet {
        token: String,
        /// Set to copy; the default palette when omitted
        #[arg(long, value_name = "ID")]
        from: Option<String>,
    },
    /// Add a "(Copy)" of a palette
    Duplicate {
        token: String,
        #[arg(long, value_name = "ID")]
        from: Option<String>,
    },
    /// Rename a palette
    Rename {
        #[command(flatten)]
        target: Target,
        name: String,
    },
    /// Delete a color set
    Delete { token: String, id: String },
}

/// Runs a parsed command line.
pub fn run(cli: &Cli, out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Settings::default(),
    };

    match &cli.command {
        Command::Generate(args) => generate(args, &settings, out, err),
        Command::Import(args) => import(args, out),
        Command::Export(args) => export(args, out, err),
        Command::Contrast(args) => contrast(args, out),
        Command::Project(args) => project(&args.action, &settings, out, err),
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Value-to-name map; a later name for the same value wins.
fn names_of(colors: &[NamedColor]) -> ColorNames {
    colors
        .iter()
        .map(|c| (c.value.clone(), c.name.clone()))
        .collect()
}

fn generate(
    args: &GenerateArgs,
    settings: &Settings,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let available = match &args.input {
        Some(path) => parse_named_colors(&read_input(path)?),
        None => Vec::new(),
    };
    let names = names_of(&available);

    let request = PaletteRequest {
        available_colors: available,
        count: settings.count(args.count),
        seed: args.seed,
        scheme: settings.scheme(args.scheme),
        strict_mode: settings.strict(args.strict),
    };
    let result = generate_with(&request, &settings.thresholds);
    info!(
        count = request.count,
        seed = request.seed,
        scheme = %request.scheme,
        strict = request.strict_mode,
        "generated palette"
    );

    match args.format {
        Format::Css => writeln!(out, "{}", css_for_palette(&result.light, &result.dark, &names))?,
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
        Format::Text => write_table(&result, out)?,
    }

    if args.share {
        ensure!(!result.is_empty(), "cannot share an empty palette");
        let config = ColorConfig {
            light: result.light.clone(),
            dark: result.dark.clone(),
            names,
            strict_mode: request.strict_mode,
            ..ColorConfig::default()
        };
        writeln!(err, "share token: {}", encode_state(&config)?)?;
    }
    Ok(())
}

fn write_table(result: &PaletteResult, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "  #  {:<20} {:<20}", "light", "dark")?;
    for (i, (light, dark)) in result.pairs().enumerate() {
        let light_rgb = Rgb::from_hex(light)?;
        let dark_rgb = Rgb::from_hex(dark)?;
        writeln!(
            out,
            "{:>3}  {} {} {:.3}  {} {} {:.3}",
            i + 1,
            swatch(light_rgb),
            light,
            light_rgb.luminance(),
            swatch(dark_rgb),
            dark,
            dark_rgb.luminance()
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct ImportReport<'a> {
    named: &'a [NamedColor],
    light: &'a [String],
    dark: &'a [String],
}

fn import(args: &ImportArgs, out: &mut dyn Write) -> Result<()> {
    let css = read_input(&args.file)?;
    let named = parse_named_colors(&css);
    let ModeColors { light, dark } = parse_mode_colors(&css);
    info!(named = named.len(), light = light.len(), dark = dark.len(), "imported");

    match args.format {
        ListFormat::Json => {
            let report = ImportReport {
                named: &named,
                light: &light,
                dark: &dark,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        ListFormat::Text => {
            writeln!(out, "named ({})", named.len())?;
            for color in &named {
                let rgb = Rgb::from_hex(&color.value)?;
                writeln!(out, "  {} {}  {}", swatch(rgb), color.value, color.name)?;
            }
            for (label, colors) in [("light", &light), ("dark", &dark)] {
                writeln!(out, "{} ({})", label, colors.len())?;
                for value in colors {
                    let rgb = Rgb::from_hex(value)?;
                    writeln!(out, "  {} {}", swatch(rgb), value)?;
                }
            }
        }
    }
    Ok(())
}

fn export(args: &ExportArgs, out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
    let config = decode_state(&args.token).context("decoding share token")?;

    let (css, filename) = if args.all {
        let default = PaletteBlock {
            name: &config.default_set_name,
            light: &config.light,
            dark: &config.dark,
        };
        let sets: Vec<PaletteBlock<'_>> = config
            .sets
            .iter()
            .map(|s| PaletteBlock {
                name: &s.name,
                light: &s.light,
                dark: &s.dark,
            })
            .collect();
        (
            css_for_all(default, &sets, &config.names),
            export_filename(ExportScope::All),
        )
    } else if let Some(id) = &args.set {
        let set = config.set(id)?;
        (
            css_for_palette(&set.light, &set.dark, &config.names),
            export_filename(ExportScope::Set(&set.name)),
        )
    } else {
        (
            css_for_palette(&config.light, &config.dark, &config.names),
            export_filename(ExportScope::Default),
        )
    };

    write!(out, "{}", css)?;
    if !css.ends_with('\n') {
        writeln!(out)?;
    }
    writeln!(err, "suggested filename: {}", filename)?;
    Ok(())
}

fn contrast(args: &ContrastArgs, out: &mut dyn Write) -> Result<()> {
    let a = Rgb::from_hex(&args.a).with_context(|| format!("parsing '{}'", args.a))?;
    let b = Rgb::from_hex(&args.b).with_context(|| format!("parsing '{}'", args.b))?;
    let (la, lb) = (a.luminance(), b.luminance());
    writeln!(out, "{} {}  luminance {:.4}", swatch(a), a, la)?;
    writeln!(out, "{} {}  luminance {:.4}", swatch(b), b, lb)?;
    writeln!(out, "contrast ratio {:.2}:1", contrast_ratio(la, lb))?;
    Ok(())
}

fn open_project(token: &str) -> Result<ColorConfig> {
    decode_state(token).context("decoding share token")
}

/// Converts a 1-based position from the command line to an index.
fn index_of(position: usize) -> Result<usize> {
    position.checked_sub(1).context("positions count from 1")
}

fn project(
    action: &ProjectAction,
    settings: &Settings,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let (config, note) = match action {
        ProjectAction::New { file } => {
            let css = read_input(file)?;
            let named = parse_named_colors(&css);
            let modes = parse_mode_colors(&css);
            let config = ColorConfig::from_import(&named, &modes)
                .with_context(|| format!("no colors found in {}", file.display()))?;
            let note = format!("imported {} named colors", config.names.len());
            (config, note)
        }
        ProjectAction::Show { token } => return show_project(&open_project(token)?, out),
        ProjectAction::Generate {
            target,
            seed,
            scheme,
        } => {
            let mut config = open_project(&target.token)?;
            let set = target.set.as_deref();
            let available = config.available_colors();
            let request = config.request(set, &available, settings.scheme(*scheme), *seed)?;
            let result = generate_with(&request, &settings.thresholds);
            config.apply_palette(set, &result)?;
            let note = format!(
                "generated {} colors for {}",
                result.len(),
                config.set_name(set)?
            );
            (config, note)
        }
        ProjectAction::Add { target } => {
            let mut config = open_project(&target.token)?;
            let set = target.set.as_deref();
            config.add_color(set)?;
            let note = size_note(&config, set)?;
            (config, note)
        }
        ProjectAction::Remove { target, position } => {
            let mut config = open_project(&target.token)?;
            let set = target.set.as_deref();
            config.remove_color(set, index_of(*position)?)?;
            let note = size_note(&config, set)?;
            (config, note)
        }
        ProjectAction::SetColor {
            target,
            position,
            color,
            dark,
        } => {
            let mut config = open_project(&target.token)?;
            let (mode, label) = if *dark {
                (ColorMode::Dark, "dark")
            } else {
                (ColorMode::Light, "light")
            };
            config.set_color(target.set.as_deref(), mode, index_of(*position)?, color)?;
            (config, format!("set {} color {}", label, position))
        }
        ProjectAction::Strict { target, off } => {
            let mut config = open_project(&target.token)?;
            let set = target.set.as_deref();
            config.set_strict_mode(set, !off)?;
            let state = if *off { "off" } else { "on" };
            let note = format!("strict mode {} for {}", state, config.set_name(set)?);
            (config, note)
        }
        ProjectAction::CreateSet { token, from } => {
            let mut config = open_project(token)?;
            let id = config.create_set(from.as_deref())?;
            let note = format!("created {} ({})", id, config.set(&id)?.name);
            (config, note)
        }
        ProjectAction::Duplicate { token, from } => {
            let mut config = open_project(token)?;
            let id = config.duplicate_set(from.as_deref())?;
            let note = format!("created {} ({})", id, config.set(&id)?.name);
            (config, note)
        }
        ProjectAction::Rename { target, name } => {
            let mut config = open_project(&target.token)?;
            config.rename_set(target.set.as_deref(), name)?;
            (config, format!("renamed to {}", name.trim()))
        }
        ProjectAction::Delete { token, id } => {
            let mut config = open_project(token)?;
            config.delete_set(id)?;
            (config, format!("deleted {}", id))
        }
    };

    info!(sets = config.sets.len(), "updated project");
    writeln!(out, "{}", encode_state(&config)?)?;
    writeln!(err, "{}", note)?;
    Ok(())
}

fn size_note(config: &ColorConfig, set: Option<&str>) -> Result<String> {
    let (light, _) = config.colors(set)?;
    Ok(format!("{} now has {} colors", config.set_name(set)?, light.len()))
}

fn show_project(config: &ColorConfig, out: &mut dyn Write) -> Result<()> {
    let strict = |on: bool| if on { ", strict" } else { "" };
    writeln!(
        out,
        "default  {} ({} colors{})",
        config.default_set_name,
        config.light.len(),
        strict(config.strict_mode)
    )?;
    write_pairs(&config.light, &config.dark, out)?;
    for set in &config.sets {
        writeln!(
            out,
            "{}  {} ({}/{} colors{})",
            set.id,
            set.name,
            set.light.len(),
            set.size,
            strict(set.strict_mode)
        )?;
        write_pairs(&set.light, &set.dark, out)?;
    }
    Ok(())
}

fn write_pairs(light: &[String], dark: &[String], out: &mut dyn Write) -> Result<()> {
    for (i, (l, d)) in light.iter().zip(dark).enumerate() {
        let (light_rgb, dark_rgb) = (Rgb::from_hex(l)?, Rgb::from_hex(d)?);
        writeln!(
            out,
            "{:>5}  {} {}  {} {}",
            i + 1,
            swatch(light_rgb),
            l,
            swatch(dark_rgb),
            d
        )?;
    }
    Ok(())
}
