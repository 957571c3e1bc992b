mod catalog;
mod context;
mod product;
mod publish;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::context::Credentials;
use crate::product::ProductCommands;
use crate::publish::SizeFiles;

#[derive(Debug, Parser)]
#[command(name = "arenza-cli")]
#[command(about = "Arenza storefront and catalog admin")]
struct Cli {
    /// Site hosting the config relay; falls back to SUPABASE_* env vars
    #[arg(long, global = true, env = "ARENZA_SITE_URL")]
    site_url: Option<String>,

    /// Account email for signup and admin commands
    #[arg(long, global = true, env = "ARENZA_EMAIL")]
    email: Option<String>,

    /// Account password for signup and admin commands
    #[arg(long, global = true, env = "ARENZA_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show every product card
    Catalog {
        /// Show prints for this size instead of each product's first size
        #[arg(long)]
        size: Option<String>,
    },
    /// Create an account with the given email and password
    Signup,
    /// Manage catalog products (admin only)
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Upload per-size images and publish a new product (admin only)
    Publish {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Model photo URL
        #[arg(long)]
        model_url: Option<String>,
        /// Size and its image files, e.g. `GG=front.jpg,back.jpg`; repeatable
        #[arg(long = "size", required = true, value_parser = publish::parse_size_files)]
        sizes: Vec<SizeFiles>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = arenza_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("arenza-cli ready; run with --help for commands");
        return Ok(());
    };
    let credentials = Credentials {
        email: cli.email,
        password: cli.password,
    };

    let site_url = cli.site_url.as_deref().or(config.site_url.as_deref());
    match command {
        Commands::Catalog { size } => {
            let mut store = context::connect(&config, site_url).await?;
            catalog::run(&mut store, size.as_deref()).await
        }
        Commands::Signup => {
            let store = context::connect(&config, site_url).await?;
            context::sign_up(&store, &credentials).await
        }
        Commands::Product { command } => {
            // Text-format input is checked before any network call.
            let action = command.prepare()?;
            let mut store = context::connect(&config, site_url).await?;
            product::run(&mut store, &credentials, action).await
        }
        Commands::Publish {
            name,
            price,
            description,
            model_url,
            sizes,
        } => {
            let request = publish::PublishRequest {
                name,
                price,
                description,
                model_url: model_url.unwrap_or_default(),
                sizes,
            };
            // Bad fields or unreadable files fail before any upload.
            let prepared = publish::prepare(request).await?;
            let mut store = context::connect(&config, site_url).await?;
            publish::run(&mut store, &credentials, prepared).await
        }
    }
}
