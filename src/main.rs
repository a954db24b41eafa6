use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(
    name = "depwalk",
    version,
    about = "Buildpack dependency metadata generator for Maven artifacts"
)]
struct Cli {
    /// Increase log verbosity (repeat for more)
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the compile-time dependencies of an artifact
    #[command(visible_aliases = ["a", "analyse"])]
    Analyze {
        /// groupId of the root artifact
        #[arg(short = 'g', long = "groupId", value_parser = NonEmptyStringValueParser::new())]
        group_id: String,
        /// artifactId of the root artifact
        #[arg(short = 'a', long = "artifactId", value_parser = NonEmptyStringValueParser::new())]
        artifact_id: String,
        /// version of the root artifact
        #[arg(short = 'v', long = "version", value_parser = NonEmptyStringValueParser::new())]
        version: String,
        /// Repository base URL, tried in the order given (repeatable)
        #[arg(short = 'r', long = "repository", value_name = "URL")]
        repositories: Vec<String>,
        /// Settings file (default: $DEPWALK_CONFIG)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Abort the run after this many seconds
        #[arg(long, value_name = "SECS")]
        deadline: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();
    depwalk::logging::init(cli.verbose);

    match cli.command {
        Command::Analyze {
            group_id,
            artifact_id,
            version,
            repositories,
            config,
            deadline,
        } => cli::analyze::cmd_analyze(cli::analyze::AnalyzeRequest {
            group_id,
            artifact_id,
            version,
            repositories,
            config,
            deadline,
        }),
    }
}
