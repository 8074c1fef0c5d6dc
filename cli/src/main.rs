//! CHAINKV CLI - Command Line Interface

use clap::{Args, Parser, Subcommand};
use chainkv_cli::{
    build_request, execute, initialize, render, render_state, resolve_config, Mode, Preset,
};
use chainkv_kvstore::KvChaincode;
use chainkv_state::PersistentStateStore;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chainkv")]
#[command(about = "CHAINKV - key-value handler developer host")]
#[command(version)]
struct Cli {
    /// State directory
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,
    
    /// Handler configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
    
    /// Built-in handler configuration
    #[arg(long, value_enum, conflicts_with = "config")]
    preset: Option<Preset>,
    
    /// Log filter, e.g. `info` or `chainkv_kvstore=debug`
    #[arg(long, default_value = "info")]
    log_level: String,
    
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the deployment-time initializer
    Init,
    
    /// Submit a transaction and commit its writes
    Invoke(InvocationArgs),
    
    /// Evaluate a transaction without committing
    Query(InvocationArgs),
    
    /// Print all committed state
    State,
}

#[derive(Args)]
struct InvocationArgs {
    /// Request file, e.g. {"fcn": "write", "args": ["color", "blue"]}
    #[arg(short = 'f', long, conflicts_with_all = ["fcn", "args"])]
    request: Option<PathBuf>,
    
    /// Function name
    fcn: Option<String>,
    
    /// Function arguments
    args: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level)?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    
    let config = resolve_config(cli.config.as_deref(), cli.preset)?;
    let chaincode = KvChaincode::new(&config)?;
    let store = PersistentStateStore::open(&cli.data_dir)?;
    info!("Opened state at {}", cli.data_dir.display());
    
    match cli.command {
        Commands::Init => {
            let response = initialize(&chaincode, &store);
            if response.is_error() {
                eprintln!("Error: {}", response.message);
                std::process::exit(1);
            }
            println!("Initialized");
        }
        
        Commands::Invoke(args) => run(&chaincode, &store, args, Mode::Invoke)?,
        
        Commands::Query(args) => run(&chaincode, &store, args, Mode::Query)?,
        
        Commands::State => {
            print!("{}", render_state(&store)?);
        }
    }
    
    Ok(())
}

fn run(
    chaincode: &KvChaincode,
    store: &PersistentStateStore,
    args: InvocationArgs,
    mode: Mode,
) -> anyhow::Result<()> {
    let request = build_request(args.request.as_ref(), args.fcn, args.args)?;
    let outcome = execute(chaincode, store, request, mode)?;
    
    print!("{}", render(&outcome));
    if outcome.response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
