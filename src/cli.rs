use crate::config::load_config;
use crate::diagram::parse_diagram;
use crate::render::{render_svg, write_output_svg};
use crate::route_dump::{route_dump_string, write_route_dump};
use crate::router::{Router, compute_layout};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bwr", version, about = "Orthogonal connector router for block diagrams")]
pub struct Args {
    /// Input diagram file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (router parameters and render style)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Override the clearance margin around obstacles
    #[arg(long = "margin")]
    pub margin: Option<f32>,

    /// Override the port stub length
    #[arg(long = "stubLength")]
    pub stub_length: Option<f32>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(margin) = args.margin {
        config.router.margin = margin;
    }
    if let Some(stub_length) = args.stub_length {
        config.router.stub_length = stub_length;
    }

    let input = read_input(args.input.as_deref())?;
    let diagram = parse_diagram(&input)?;
    let router = Router::new(config.router)?;
    let layout = compute_layout(&diagram, &router);

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&layout, &config.render);
            write_png(&svg, &output)?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_route_dump(path, &layout)?,
            None => println!("{}", route_dump_string(&layout)?),
        },
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
        "PNG output requires the 'png' feature to be enabled"
    ))
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
