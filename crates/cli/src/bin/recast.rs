use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;

use recast_engine::{run_chunked, ChunkedRequest, EngineError};

#[derive(Parser)]
#[command(name = "recast")]
#[command(about = "Rewrite source files chunk by chunk with an LLM", long_about = None)]
#[command(version)]
struct Cli {
    /// Files offered for modification
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Override the relevance-selection model
    #[arg(long, value_name = "MODEL")]
    model_select: Option<String>,

    /// Override the rewrite model
    #[arg(long, value_name = "MODEL")]
    model_rewrite: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    recast_cli::init_logging(cli.verbose, cli.quiet);

    let change_request = recast_cli::input::read_change_request("Enter the desired code change")?;
    if let Err(err) = recast_cli::history::append(&change_request) {
        log::warn!("could not update prompt history: {err}");
    }

    let generator = recast_llm::generator_from_env()
        .context("Failed to initialize the generation backend")?;

    let mut request = ChunkedRequest::new(cli.files, change_request);
    if let Some(model) = cli.model_select {
        request.selector_config = request.selector_config.with_model(model);
    }
    if let Some(model) = cli.model_rewrite {
        request.rewriter_config = request.rewriter_config.with_model(model);
    }

    let outcome = run_chunked(generator.as_ref(), &request, &mut |fragment| {
        print!("{fragment}");
        let _ = std::io::stdout().flush();
    });
    println!();

    match outcome {
        Ok(outcome) => {
            for path in &outcome.written {
                println!("{} {}", style("updated").green().bold(), path.display());
            }
            Ok(())
        }
        Err(EngineError::NoRelevantChunks) => {
            bail!("No relevant chunks found for modification")
        }
        Err(err) => Err(err).context("Rewrite failed"),
    }
}
