use clap::{Parser, Subcommand};
use transform_sandbox::cmd::{RunArgs, ServeArgs, run, serve};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the HTTP transformation service.
    Serve(ServeArgs),
    /// Evaluates one script against one JSON input and prints the result.
    Run(RunArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so `run` keeps stdout for its report.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::execute(args).await?,
        Commands::Run(args) => run::execute(args).await?,
    }

    Ok(())
}
