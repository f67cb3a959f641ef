use crate::assess::{run_assessment, AssessArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use carbon_construct::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "CarbonConstruct",
    about = "Score construction projects against the Green Star Responsible Products credits",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Green Star Responsible Products tooling
    Greenstar {
        #[command(subcommand)]
        command: GreenstarCommand,
    },
    /// Score a built-in sample project and print the summary
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum GreenstarCommand {
    /// Assess a project JSON file and print the compliance summary
    Assess(AssessArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Greenstar {
            command: GreenstarCommand::Assess(args),
        } => run_assessment(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_assess_subcommand() {
        let cli = Cli::try_parse_from([
            "carbon-construct-api",
            "greenstar",
            "assess",
            "--project",
            "project.json",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Greenstar {
                command: GreenstarCommand::Assess(args),
            }) => {
                assert_eq!(args.project, PathBuf::from("project.json"));
                assert!(args.initiatives.is_none());
                assert!(args.json);
            }
            other => panic!("expected assess command, got {other:?}"),
        }
    }

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["carbon-construct-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
