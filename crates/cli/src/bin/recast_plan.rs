use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use recast_engine::{PlanRequest, PlanSession};

#[derive(Parser)]
#[command(name = "recast-plan")]
#[command(about = "Plan a change, then rewrite entire files with an LLM", long_about = None)]
#[command(version)]
struct Cli {
    /// Files offered for modification
    #[arg(required = true)]
    include_files: Vec<String>,

    /// Additional files provided as read-only context (never rewritten)
    #[arg(short = 'c', long = "context", value_name = "FILE")]
    context_files: Vec<String>,

    /// Skip the clarifications prompt
    #[arg(short = 'y', long = "yes")]
    skip_clarifications: bool,

    /// Override the model used for both calls
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

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

    let mut change_request = recast_cli::input::read_change_request("What to change?")?;
    let mut skip_clarifications = cli.skip_clarifications;

    // A trailing "yes"/"y" on the request doubles as the --yes flag.
    if let Some(last) = change_request.split_whitespace().last() {
        if last.eq_ignore_ascii_case("yes") || last.eq_ignore_ascii_case("y") {
            let stripped = change_request[..change_request.len() - last.len()].trim();
            if !stripped.is_empty() {
                change_request = stripped.to_string();
                skip_clarifications = true;
            }
        }
    }

    if let Err(err) = recast_cli::history::append(&change_request) {
        log::warn!("could not update prompt history: {err}");
    }

    let generator = recast_llm::generator_from_env()
        .context("Failed to initialize the generation backend")?;

    let mut request = PlanRequest::new(cli.include_files, cli.context_files, change_request);
    if let Some(model) = &cli.model {
        request.planner_config = request.planner_config.with_model(model.clone());
        request.rewrite_config = request.rewrite_config.with_model(model.clone());
    }

    eprintln!("Generating plan...");
    let session = PlanSession::generate(generator.as_ref(), &request, &mut stream_fragment)?;
    println!();
    println!("{}\n", style(session.plan()).green().bold());

    let clarifications = if skip_clarifications {
        "None.".to_string()
    } else {
        recast_cli::input::read_optional("Any clarifications?")?
            .unwrap_or_else(|| "None.".to_string())
    };

    let written = session.apply(generator.as_ref(), &clarifications, &mut stream_fragment)?;
    println!();
    for path in &written {
        println!("{} {}", style("updated").green().bold(), path.display());
    }

    Ok(())
}

fn stream_fragment(fragment: &str) {
    print!("{fragment}");
    let _ = std::io::stdout().flush();
}
