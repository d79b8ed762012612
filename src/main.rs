use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use sx_dispatch::cli::{self, CheckOptions, CliError, TranslateOptions};

#[derive(ClapParser)]
#[command(name = "sxq")]
#[command(about = "sxq - translate func-adl queries into the wire text a ServiceX backend receives")]
#[command(version)]
struct Cli {
    /// Log at debug level (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a query and print it in normalized form
    Check {
        /// Wire text of the query (reads from stdin if not provided)
        query: Option<String>,

        /// Indent the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show the wire text a backend would receive for a query
    Translate {
        /// Wire text of the query (reads from stdin if not provided)
        query: Option<String>,

        /// Backend preset: xaod, cms_run1_aod or uproot (needs --tree)
        #[arg(short, long, env = "SX_BACKEND", default_value = "xaod")]
        backend: String,

        /// Tree name for the uproot backend
        #[arg(short, long)]
        tree: Option<String>,

        /// Comma separated transfer formats the backend produces
        #[arg(short, long, env = "SX_FORMATS", default_value = "parquet,root")]
        formats: String,

        /// Indent the wire text
        #[arg(short, long)]
        pretty: bool,

        /// Print a JSON report instead of the bare wire text
        #[arg(long)]
        json: bool,
    },

    /// Print the dataset source node for a backend
    Source {
        /// Backend preset: xaod, cms_run1_aod or uproot (needs --tree)
        #[arg(short, long, env = "SX_BACKEND")]
        backend: String,

        /// Tree name for the uproot backend
        #[arg(short, long)]
        tree: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env_filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("sx_dispatch=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check { query, pretty } => run_check(query, pretty),
        Commands::Translate {
            query,
            backend,
            tree,
            formats,
            pretty,
            json,
        } => run_translate(query, backend, tree, formats, pretty, json).await,
        Commands::Source { backend, tree } => {
            cli::source_text(&backend, tree.as_deref()).map(|text| println!("{}", text))
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(query: Option<String>, pretty: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_query(query)?,
        pretty,
    };

    println!("{}", cli::execute_check(&options)?);
    Ok(())
}

async fn run_translate(
    query: Option<String>,
    backend: String,
    tree: Option<String>,
    formats: String,
    pretty: bool,
    json: bool,
) -> Result<(), CliError> {
    let options = TranslateOptions {
        query: read_query(query)?,
        backend,
        tree,
        formats: cli::parse_formats(&formats)?,
        pretty,
    };

    let report = cli::execute_translate(&options).await?;
    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.wire);
    }
    Ok(())
}
