use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gradebook-cli", version, about = "Gradebook CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Semester management
    Semester {
        #[command(subcommand)]
        action: commands::semester::SemesterAction,
    },
    /// Subject management
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Grade management
    Grade {
        #[command(subcommand)]
        action: commands::grade::GradeAction,
    },
    /// Averages and plus-points
    Report(commands::report::ReportArgs),
    /// Grade needed next to reach a target average
    Target(commands::target::TargetArgs),
    /// Export or import the whole grade tree
    Snapshot {
        #[command(subcommand)]
        action: commands::snapshot::SnapshotAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GRADEBOOK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Semester { action } => commands::semester::run(action),
        Commands::Subject { action } => commands::subject::run(action),
        Commands::Grade { action } => commands::grade::run(action),
        Commands::Report(args) => commands::report::run(args),
        Commands::Target(args) => commands::target::run(args),
        Commands::Snapshot { action } => commands::snapshot::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
