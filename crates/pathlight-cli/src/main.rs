use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pathlight::frontends::{EstreeFrontend, ScriptFrontend};
use pathlight::{Frontend, Html, Options, Render, Seeds, Terminal};
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(name = "pathlight", version)]
#[command(about = "Substitute local variables and color the branches of a JavaScript function", long_about = None)]
struct Args {
    /// Program to analyse
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// JSON file of seed records by variable name
    #[arg(short, long, value_name = "FILE")]
    symbols: Option<PathBuf>,

    /// Seed a variable, e.g. `y=2` or `arr=[1, 2, 3]`; repeatable
    #[arg(short, long = "arg", value_name = "NAME=VALUE")]
    args: Vec<String>,

    /// Read SOURCE as ESTree JSON instead of script text
    #[arg(long)]
    ast: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Class for visited lines in HTML output
    #[arg(long, value_name = "CLASS", default_value = "visited")]
    visited_class: String,

    /// Class for unvisited lines in HTML output
    #[arg(long, value_name = "CLASS", default_value = "unvisited")]
    unvisited_class: String,

    /// Maximum nesting depth
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Format {
    /// `<pre><code>` blocks
    Html,
    /// ANSI colored lines
    Terminal,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn run(args: &Args) -> Result<String> {
    let input = fs::read_to_string(&args.source)
        .with_context(|| format!("reading {}", args.source.display()))?;

    let frontend: Box<dyn Frontend> = if args.ast {
        Box::new(EstreeFrontend::new())
    } else {
        Box::new(ScriptFrontend::new())
    };
    let program = frontend
        .parse(&input)
        .with_context(|| format!("parsing {} as {}", args.source.display(), frontend.name()))?;

    let seeds = load_seeds(args)?;
    let mut options = Options::default().traced(args.verbose >= 3);
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }

    let lines = pathlight::annotate(&program, &seeds, &options)
        .with_context(|| format!("substituting {}", args.source.display()))?;
    debug!(lines = lines.len(), "annotated");

    Ok(match args.format {
        Format::Html => {
            let mut html = Html::with_classes(&args.visited_class, &args.unvisited_class).render(&lines);
            html.push('\n');
            html
        }
        Format::Terminal => Terminal.render(&lines),
    })
}

fn load_seeds(args: &Args) -> Result<Seeds> {
    let mut seeds = match &args.symbols {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Seeds::from_json(&text).with_context(|| format!("loading seeds from {}", path.display()))?
        }
        None => Seeds::new(),
    };
    let mut form = Seeds::new();
    for pair in &args.args {
        form.insert_form(pair)
            .with_context(|| format!("in --arg {}", pair))?;
    }
    seeds.merge(form);
    Ok(seeds)
}
