//! `agent-studio`: pick a task, give it text or a file, get text or images back.

mod output;

use std::io::Read as _;
use std::path::PathBuf;
use std::process::ExitCode;

use agent_studio_core::observability::init_observability;
use agent_studio_core::{Orchestrator, StudioConfig, TASKS, TaskId, UploadedFile, Workbench};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::output::{OutputOptions, emit};

#[derive(Parser)]
#[command(name = "agent-studio")]
#[command(about = "Run AI analysis and image generation tasks from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available tasks
    Tasks,

    /// Run a task and print or save its result
    Run(RunArgs),

    /// Show the input hint for a task
    Placeholder {
        /// Task slug (see `agent-studio tasks`)
        task: TaskId,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Task slug (see `agent-studio tasks`)
    task: TaskId,

    /// Input text
    #[arg(short, long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read input text from a file (`-` for stdin)
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Image or video to analyze
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// MIME type of --file (guessed from the extension if omitted)
    #[arg(long, requires = "file")]
    mime: Option<String>,

    /// Directory for generated images
    #[arg(long, default_value = "./out")]
    out_dir: PathBuf,

    /// Print images as data URIs instead of writing files
    #[arg(long)]
    print_data_uri: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_observability();
    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Tasks => {
            print!("{}", render_task_list());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Placeholder { task } => {
            println!("{}", task.task().placeholder);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run(args) => run(args).await,
    }
}

async fn run(args: RunArgs) -> Result<ExitCode> {
    let text = read_text(&args)?;
    let config = StudioConfig::from_env();
    let orchestrator = Orchestrator::from_config(&config).context("setting up the AI client")?;

    let mut bench = Workbench::new(args.task);
    bench.set_text(text);
    bench.set_file(args.file.map(|path| match args.mime {
        Some(mime) => UploadedFile::new(path, mime),
        None => UploadedFile::from_path(path),
    }));

    let phase = bench.submit(&orchestrator).await;
    debug!(
        event = "cli.run_finished",
        domain = "cli",
        task = args.task.slug(),
        configured = orchestrator.is_configured(),
        phase = ?phase
    );
    if let Some(message) = bench.error() {
        eprintln!("{message}");
        return Ok(ExitCode::FAILURE);
    }
    if let Some(result) = bench.output() {
        let options = OutputOptions {
            out_dir: args.out_dir,
            print_data_uri: args.print_data_uri,
        };
        emit(result, &options, &mut std::io::stdout().lock())?;
    }
    Ok(ExitCode::SUCCESS)
}

fn read_text(args: &RunArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    match &args.text_file {
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading text from stdin")?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading text from {}", path.display())),
        None => Ok(String::new()),
    }
}

fn render_task_list() -> String {
    let mut out = String::new();
    for task in &TASKS {
        out.push_str(&format!(
            "{:<20} {:<6} {}\n{:27}{}\n",
            task.id.slug(),
            task.accepts.as_str(),
            task.title,
            "",
            task.description
        ));
    }
    out
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
    fn run_parses_task_slug_and_flags() {
        let cli = Cli::try_parse_from([
            "agent-studio",
            "run",
            "image_analysis",
            "--file",
            "cat.png",
            "--text",
            "what breed?",
        ])
        .expect("parse");
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.task, TaskId::ImageAnalysis);
        assert_eq!(args.file, Some(PathBuf::from("cat.png")));
        assert_eq!(args.out_dir, PathBuf::from("./out"));
        assert_eq!(read_text(&args).expect("text"), "what breed?");
    }

    #[test]
    fn unknown_task_and_conflicting_text_sources_are_rejected() {
        assert!(Cli::try_parse_from(["agent-studio", "run", "poetry"]).is_err());
        assert!(
            Cli::try_parse_from([
                "agent-studio",
                "run",
                "swot",
                "--text",
                "a",
                "--text-file",
                "b.txt"
            ])
            .is_err()
        );
        assert!(
            Cli::try_parse_from(["agent-studio", "run", "swot", "--mime", "image/png"]).is_err()
        );
    }

    #[test]
    fn text_file_is_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "quarterly notes").expect("write");
        let path_arg = path.to_str().expect("utf-8 temp path");
        let cli = Cli::try_parse_from([
            "agent-studio",
            "run",
            "key-insights",
            "--text-file",
            path_arg,
        ])
        .expect("parse");
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(read_text(&args).expect("text"), "quarterly notes");
    }

    #[test]
    fn task_list_names_every_task() {
        let listing = render_task_list();
        for id in TaskId::ALL {
            assert!(listing.contains(id.slug()), "missing {id}");
        }
    }
}
