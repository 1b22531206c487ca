// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load credentials and the organization list (fails fast, no network yet)
// 3. Create the timestamped output directory
// 4. Run the selected reports one after another
// 5. Exit with proper code (0 = success, 1 = configuration error, 2 = run failed)
//
// Progress is narrated on stdout as we go, so when a run dies halfway the
// last lines show which organization/member/repository it was working on.
// Diagnostic logs (every API request with --verbose) go to stderr via tracing.
// =============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use github_org_scraper::cli::{Cli, Commands, RunArgs};
use github_org_scraper::github::GithubClient;
use github_org_scraper::reports::ReportKind;
use github_org_scraper::scrape::{scrape, Outcome};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins when set; otherwise warnings only, or debug with --verbose
fn init_tracing(verbose: bool) {
    let default = if verbose { "github_org_scraper=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::List => {
            print_menu();
            Ok(0)
        }
        Commands::Run(args) => handle_run(&args).await,
    }
}

async fn handle_run(args: &RunArgs) -> Result<i32> {
    let outcome = scrape(args, |settings| {
        GithubClient::new(&settings.api_url, settings.credentials.clone())
            .context("Failed to create GitHub client")
    })
    .await?;

    match &outcome {
        Outcome::Finished(path) => println!("\n✅ Done. Files saved in {}", path.display()),
        Outcome::Rejected(e) => eprintln!("Error: {}", e),
    }
    Ok(outcome.exit_code())
}

// Prints the available reports, numbered like the --reports flag expects
fn print_menu() {
    println!("Available reports (select with --reports 1,2,... or --reports all):\n");
    for kind in ReportKind::ALL {
        let scope = if kind.needs_members() { "per member" } else { "per organization" };
        println!("  {:<18} {} [{}]", kind.to_string(), kind.description(), scope);
    }
}
