//! CLI entry point for devblog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "devblog")]
#[command(version)]
#[command(about = "Markdown devblog with password-gated private posts", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Mark the post private
        #[arg(long)]
        private: bool,
    },

    /// List site content
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, slug, tag, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a post by slug
    Show {
        slug: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Render the body to HTML
        #[arg(long)]
        html: bool,
    },

    /// Read a post, entering the secret if it is private
    Unlock {
        slug: String,

        /// Render the body to HTML
        #[arg(long)]
        html: bool,
    },

    /// Start the JSON API server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "devblog=debug,info"
    } else {
        "devblog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            devblog::commands::init::init_site(&target_dir)?;
            println!("Initialized devblog site in {:?}", target_dir);
        }

        Commands::New { title, private } => {
            let blog = devblog::Blog::new(&base_dir)?;
            let path = blog.new_post(&title, private)?;
            println!("Created: {:?}", path);
        }

        Commands::List { r#type, json } => {
            let blog = devblog::Blog::new(&base_dir)?;
            devblog::commands::list::run(&blog, &r#type, json)?;
        }

        Commands::Show { slug, json, html } => {
            let blog = devblog::Blog::new(&base_dir)?;
            devblog::commands::show::run(&blog, &slug, json, html)?;
        }

        Commands::Unlock { slug, html } => {
            let blog = devblog::Blog::new(&base_dir)?;
            devblog::commands::unlock::run(&blog, &slug, html)?;
        }

        Commands::Serve { port, ip } => {
            let blog = devblog::Blog::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| blog.config.server.ip.clone());
            let port = port.unwrap_or(blog.config.server.port);

            tracing::info!("Serving {:?} at http://{}:{}", blog.content_dir, ip, port);
            devblog::server::start(&blog, &ip, port).await?;
        }

        Commands::Version => {
            println!("devblog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
