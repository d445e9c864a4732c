use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mbird::{api, config::ConsoleConfig, data::MbirdData, tree_render};

#[derive(Parser)]
#[command(name = "mbird")]
#[command(about = "Project tree console backed by .mbird directories")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the console API server
    Serve {
        /// Address to bind (overrides MBIRD_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP API (overrides MBIRD_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Create a new project with a single root node and save it
    Init {
        /// Project directory (.mbird is appended if missing)
        path: PathBuf,
    },
    /// Print a project's tree
    Show {
        /// Project directory ending in .mbird
        path: PathBuf,
    },
    /// Mark every node of a project as up to date and save it
    Regenerate {
        /// Project directory ending in .mbird
        path: PathBuf,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "mbird=debug,tower_http=debug".into()),
    );

    // Logs go to stderr so `show` output stays clean on stdout
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = ConsoleConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting mbird console on {}", addr);

    let app = api::create_router(api::AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("mbird console listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(host, port).await?,
        Some(Commands::Init { path }) => {
            let written = MbirdData::create().save(&path)?;
            println!("Created project at {}", written.display());
        }
        Some(Commands::Show { path }) => {
            let data = MbirdData::open(&path)?;
            if let Some(root) = data.root() {
                print!("{}", tree_render::render_tree(root));
                println!(
                    "\n{} nodes, {} stale",
                    root.node_count(),
                    root.stale_count()
                );
            }
        }
        Some(Commands::Regenerate { path }) => {
            let mut data = MbirdData::open(&path)?;
            data.regenerate()?;
            let written = data.save(&path)?;
            println!("Regenerated {}", written.display());
        }
        None => serve(None, None).await?,
    }

    Ok(())
}
