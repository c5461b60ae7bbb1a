use crate::config::{Config, load_config};
use crate::html::{render_html, write_output_html};
use crate::ir::Timetable;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_events;
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "wgr",
    version,
    about = "Weekly timetable renderer - SVG charts and HTML fragments"
)]
pub struct Args {
    /// Event list JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for text outputs.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Render mode
    #[arg(short = 'm', long = "mode", value_enum, default_value = "svg")]
    pub mode: Mode,

    /// Output format for the chart mode
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Write the computed render model as pretty JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Course codes to fetch from the records service instead of reading
    /// a file. Repeatable.
    #[cfg(feature = "fetch")]
    #[arg(long = "course")]
    pub courses: Vec<String>,

    /// Semester id for fetched courses, e.g. B241
    #[cfg(feature = "fetch")]
    #[arg(long = "semester")]
    pub semester: Option<String>,

    /// Records-service login name
    #[cfg(feature = "fetch")]
    #[arg(long = "username")]
    pub username: Option<String>,

    /// Records-service password
    #[cfg(feature = "fetch")]
    #[arg(long = "password")]
    pub password: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Svg,
    Html,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let timetable = load_timetable(&args, &config)?;
    let layout = compute_layout(&timetable, &config.layout);

    if let Some(path) = &args.dump_layout {
        write_layout_dump(path, &layout)?;
    }

    match args.mode {
        Mode::Html => {
            if args.output_format == OutputFormat::Png {
                return Err(anyhow::anyhow!("PNG output applies to the chart mode only"));
            }
            let html = render_html(&layout, &config.layout);
            write_output_html(&html, args.output.as_deref())?;
        }
        Mode::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout, &config.render);
            match args.output_format {
                OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref())?,
                OutputFormat::Png => {
                    let output = ensure_output(&args.output, "png")?;
                    write_png(&svg, &output)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path) -> Result<()> {
    crate::render::write_output_png(svg, output)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path) -> Result<()> {
    Err(anyhow::anyhow!(
        "this build has no PNG support (enable the `png` feature)"
    ))
}

fn load_timetable(args: &Args, config: &Config) -> Result<Timetable> {
    #[cfg(feature = "fetch")]
    if !args.courses.is_empty() {
        return fetch_timetable(args, config);
    }
    #[cfg(not(feature = "fetch"))]
    let _ = config;

    let input = read_input(args.input.as_deref())?;
    Ok(parse_events(&input)?)
}

#[cfg(feature = "fetch")]
fn fetch_timetable(args: &Args, config: &Config) -> Result<Timetable> {
    let semester = args
        .semester
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--semester is required when fetching courses"))?;
    let username = args
        .username
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--username is required when fetching courses"))?;
    let password = args
        .password
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--password is required when fetching courses"))?;

    let client = crate::records::RecordsClient::login(&config.records, username, password)?;
    let events = client.schedule_for_courses(&args.courses, semester)?;
    info!(
        "fetched {} events for {}",
        events.len(),
        client.display_name()
    );
    Ok(Timetable { events })
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
