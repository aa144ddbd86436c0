//! Command-line interface for cire
//! Turns a source file plus the annotation files produced for it into a literate document.
//!
//! Usage:
//!   cire `<source>` -a `<annotations>`... [--format `<format>`] [--output `<path>`]
//!   cire --list-formats

use cire::cire::config::{CireConfig, Loader};
use cire::cire::loader::load_annotation_files;
use cire::cire::pipeline::{Pipeline, PipelineError};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("cire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interleave source code, its annotations and its comments into one document")
        .arg_required_else_help(true)
        .arg(
            Arg::new("source")
                .help("Path to the source file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("annotations")
                .long("annotations")
                .short('a')
                .help("Annotation file (.json, .yaml or .yml); may be given several times")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from config: mdx)"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file path (default: next to the source file)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help("Source language, used to strip markers from raw comments"),
        )
        .arg(
            Arg::new("date")
                .long("date")
                .help("Prefix the output file name with the current date")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("code-wrapper-start")
                .long("code-wrapper-start")
                .help("Custom opening markup for code blocks"),
        )
        .arg(
            Arg::new("code-wrapper-end")
                .long("code-wrapper-end")
                .help("Custom closing markup for code blocks"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log progress to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cire=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Built-in defaults, the optional config file, then command-line overrides
fn load_config(matches: &ArgMatches) -> Result<CireConfig, PipelineError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if let Some(lang) = matches.get_one::<String>("lang") {
        loader = loader.set_override("prose.language", lang.as_str())?;
    }
    if matches.get_flag("date") {
        loader = loader.set_override("output.prefix_date", true)?;
    }

    let mut config = loader.build()?;

    // Wrapper flags apply to whichever format is selected
    let wrappers = match config.output.format.as_str() {
        "markdown" => Some(&mut config.formats.markdown),
        "mdx" => Some(&mut config.formats.mdx),
        _ => None,
    };
    if let Some(wrappers) = wrappers {
        if let Some(start) = matches.get_one::<String>("code-wrapper-start") {
            wrappers.code_wrapper_start = start.clone();
        }
        if let Some(end) = matches.get_one::<String>("code-wrapper-end") {
            wrappers.code_wrapper_end = end.clone();
        }
    }

    Ok(config)
}

async fn convert(matches: &ArgMatches, pipeline: &Pipeline) -> Result<PathBuf, PipelineError> {
    let source_path = matches
        .get_one::<String>("source")
        .map(PathBuf::from)
        .unwrap_or_default();
    let annotation_paths: Vec<PathBuf> = matches
        .get_many::<String>("annotations")
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default();

    let format = pipeline.config().output.format.clone();
    let formatter = pipeline.registry().require(&format)?;
    let extension = formatter.file_extension().to_string();

    let source = tokio::fs::read_to_string(&source_path)
        .await
        .map_err(|source| PipelineError::Io {
            path: source_path.clone(),
            source,
        })?;
    let annotations = load_annotation_files(&annotation_paths, pipeline.comment_style()).await?;
    debug!(
        files = annotation_paths.len(),
        tokens = annotations.tokens.len(),
        comments = annotations.comments.len(),
        "annotations loaded"
    );

    let output = pipeline.run(&source, annotations, &format)?;

    let output_path = match matches.get_one::<String>("output") {
        Some(path) => PathBuf::from(path),
        None => {
            let absolute =
                std::fs::canonicalize(&source_path).unwrap_or_else(|_| source_path.clone());
            pipeline.config().output.resolve_path(
                &absolute,
                &extension,
                chrono::Local::now().date_naive(),
            )
        }
    };

    write_output(&output_path, &output).await?;
    Ok(output_path)
}

async fn write_output(path: &Path, contents: &str) -> Result<(), PipelineError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Handle the list-formats command
fn handle_list_formats_command(pipeline: &Pipeline) {
    println!("Available output formats:\n");

    let registry = pipeline.registry();
    for name in registry.list_formats() {
        if let Some(formatter) = registry.get(&name) {
            println!("  {} (.{})", name, formatter.file_extension());
            println!("    {}", formatter.description());
            println!();
        }
    }
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let pipeline = Pipeline::new(config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&pipeline);
        return;
    }

    match convert(&matches, &pipeline).await {
        Ok(path) => println!("Wrote {}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let PipelineError::Format(_) = e {
                eprintln!(
                    "Available formats: {}",
                    pipeline.registry().list_formats().join(", ")
                );
            }
            std::process::exit(1);
        }
    }
}
