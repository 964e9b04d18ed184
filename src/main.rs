use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use texcv::{
    compile::{DEFAULT_ENDPOINT, compile_latex_to_pdf},
    model::ResumeDocument,
    profile::{ProfileFormat, load_profile, parse_profile},
    template::Layout,
    watch::{WatchCommand, resolve_output_path, watch_inputs},
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "texcv", version)]
#[command(about = "Render résumé profiles to LaTeX and PDF")]
struct Cli {
    #[arg(help = "Profile files (YAML or JSON). If omitted, read from stdin.")]
    inputs: Vec<PathBuf>,

    #[arg(
        short,
        long,
        help = "Output path. Defaults to <input>.pdf (or .tex) for file input."
    )]
    output: Option<PathBuf>,

    #[arg(short, long, default_value = "classic", value_name = "layout", value_parser = clap::builder::PossibleValuesParser::new(Layout::ALL.map(Layout::id)))]
    layout: String,

    #[arg(long, help = "Write the LaTeX source instead of compiling a PDF.")]
    tex: bool,

    #[arg(
        long = "compile-url",
        env = "TEXCV_COMPILE_URL",
        default_value = DEFAULT_ENDPOINT,
        value_name = "url",
        help = "LaTeX build service endpoint."
    )]
    compile_url: String,

    #[arg(
        long,
        conflicts_with = "inputs",
        help = "Render the built-in example profile."
    )]
    seed: bool,

    #[arg(long = "list-layouts", help = "List the available layouts and exit.")]
    list_layouts: bool,

    #[arg(short, long, help = "Watch input files and re-render on change.")]
    watch: bool,

    #[arg(short, long, default_value_t = false, help = "Verbose diagnostics.")]
    verbose: bool,
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin(String),
    Seed,
}

struct ProcessOptions<'a> {
    output: &'a Option<PathBuf>,
    layout: Layout,
    tex_only: bool,
    endpoint: &'a str,
    multiple_inputs: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(error) = run(cli) {
        eprintln!("[texcv] {error}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={default_level}", env!("CARGO_PKG_NAME")))
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    if cli.list_layouts {
        for layout in Layout::ALL {
            println!(
                "{:<11} {} ({})",
                layout.id(),
                layout.display_name(),
                layout.description()
            );
        }
        return Ok(());
    }

    if cli.inputs.is_empty() && cli.watch {
        return Err("watch mode requires at least one input file".to_string());
    }

    let multiple_inputs = cli.inputs.len() > 1;
    if multiple_inputs
        && let Some(output) = &cli.output
        && output.extension().is_some()
    {
        return Err("multiple input files require output directory path".to_string());
    }

    let layout = Layout::try_from(cli.layout.as_str()).map_err(|e| e.to_string())?;

    let inputs = if cli.seed {
        vec![InputSource::Seed]
    } else if cli.inputs.is_empty() {
        vec![InputSource::Stdin(read_stdin()?)]
    } else {
        cli.inputs
            .into_iter()
            .map(InputSource::File)
            .collect::<Vec<_>>()
    };

    if cli.watch {
        let files = inputs
            .iter()
            .filter_map(|i| match i {
                InputSource::File(path) => Some(path.clone()),
                InputSource::Stdin(_) | InputSource::Seed => None,
            })
            .collect::<Vec<_>>();

        let command = WatchCommand {
            layout,
            output: cli.output.clone(),
            multiple_inputs,
            tex_only: cli.tex,
            endpoint: cli.compile_url.clone(),
        };

        return watch_inputs(&files, &command).map_err(|e| format!("watch failed: {e}"));
    }

    let process_options = ProcessOptions {
        output: &cli.output,
        layout,
        tex_only: cli.tex,
        endpoint: &cli.compile_url,
        multiple_inputs,
    };

    inputs
        .iter()
        .try_for_each(|input| process_one(input, &process_options))?;

    Ok(())
}

fn process_one(input: &InputSource, options: &ProcessOptions<'_>) -> Result<(), String> {
    let path_hint = match input {
        InputSource::File(path) => Some(path.as_path()),
        InputSource::Stdin(_) | InputSource::Seed => None,
    };

    let doc = match input {
        InputSource::File(path) => load_profile(path).map_err(|e| e.to_string())?,
        InputSource::Stdin(text) => parse_profile(text, ProfileFormat::detect(None, text))
            .map_err(|e| format!("stdin: {e}"))?,
        InputSource::Seed => ResumeDocument::seed(),
    };

    let source = options.layout.render(&doc);
    debug!(layout = %options.layout, bytes = source.len(), "rendered");

    let extension = if options.tex_only { "tex" } else { "pdf" };
    let out_path = resolve_output_path(
        path_hint,
        options.output.as_deref(),
        options.multiple_inputs,
        extension,
    );

    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| format!("create output dir: {e}"))?;
    }

    let written = if options.tex_only {
        fs::write(&out_path, &source).map_err(|e| format!("write {}: {e}", out_path.display()))?;
        source.len()
    } else {
        compile_latex_to_pdf(&source, options.endpoint, &out_path)
            .map_err(|e| format!("compile failed: {e}"))?
            .len()
    };

    println!("written {} ({written} bytes)", out_path.display());
    Ok(())
}

fn read_stdin() -> Result<String, String> {
    if atty::is(atty::Stream::Stdin) {
        return Err("no input files given and stdin is a terminal (pass a profile or use --seed)".to_string());
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| e.to_string())?;
    Ok(input)
}
