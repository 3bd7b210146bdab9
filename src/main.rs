use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: WikiCommand,
}

#[derive(Parser)]
struct RenderArgs {
    /// Markdown file to render (reads stdin when omitted)
    input: Option<PathBuf>,

    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct SlugArgs {
    /// The page title to slugify
    title: String,
}

#[derive(Parser)]
struct TagsArgs {
    /// The raw tag string, e.g. "rust, wiki"
    raw: String,
}

#[derive(Parser)]
struct PageArgs {
    /// JSON file holding a stored page record
    page: PathBuf,

    /// JSON file holding the categories to resolve against
    #[arg(long)]
    categories: Option<PathBuf>,

    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct ServeArgs {
    /// The address to bind to (overrides the config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// The port to bind to (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// The path to the configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum WikiCommand {
    /// Render markdown to sanitized HTML
    Render(RenderArgs),

    /// Print the URL slug for a page title
    Slug(SlugArgs),

    /// Print the tags parsed from a raw tag string, one per line
    Tags(TagsArgs),

    /// Print the enriched JSON representation of a stored page
    Page(PageArgs),

    /// Serve the rendering pipeline over HTTP
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        WikiCommand::Render(args) => {
            commands::render::run(&args).await?;
        }
        WikiCommand::Slug(args) => {
            commands::metadata::slug(&args);
        }
        WikiCommand::Tags(args) => {
            commands::metadata::tags(&args);
        }
        WikiCommand::Page(args) => {
            commands::metadata::page(&args).await?;
        }
        WikiCommand::Serve(args) => {
            commands::serve::run(&args).await?;
        }
    }

    Ok(())
}
