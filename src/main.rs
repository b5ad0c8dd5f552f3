//! CLI entry point for ordered-sitemap

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ordered_sitemap::commands::{self, render::OutputFormat};
use ordered_sitemap::sitemap::SortStrategy;
use ordered_sitemap::Sitemap;

#[derive(Parser)]
#[command(name = "ordered-sitemap")]
#[command(author = "Yukang Chen")]
#[command(version = "0.1.0")]
#[command(about = "Categorized, hand-ordered sitemaps for static sites", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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

    /// Render the sitemap
    #[command(alias = "r")]
    Render {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,

        /// Tag attribute override, e.g. `post_order=date_asc`
        #[arg(short, long = "attr", value_parser = commands::render::parse_attr)]
        attrs: Vec<(String, String)>,
    },

    /// Replace sitemap tags inside a document
    Expand {
        /// Document to read
        input: PathBuf,

        /// Where to write (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List site content in sitemap order
    List {
        /// Type of content to list (all, page, post, category)
        #[arg(default_value = "all")]
        r#type: String,
    },

    /// Manage hand-made orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },

    /// Show or change sort strategies
    Strategy {
        /// Strategy for pages
        #[arg(long)]
        pages: Option<SortStrategy>,

        /// Strategy for posts
        #[arg(long)]
        posts: Option<SortStrategy>,
    },

    /// Manage category buckets
    Bucket {
        #[command(subcommand)]
        action: BucketAction,
    },

    /// List categories with their ids
    Terms,

    /// Display version information
    Version,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Show stored orders
    Show {
        /// Section (pages or posts)
        section: Option<String>,
    },

    /// Replace a section's order with a comma separated id list
    Set { section: String, ids: String },

    /// Move one item to a position (1 is first); in bucketed posts the item
    /// moves within its own group
    Move {
        section: String,
        id: u64,
        position: usize,
    },

    /// Drop a section's order
    Reset { section: String },
}

#[derive(Subcommand)]
enum BucketAction {
    /// List buckets
    List,

    /// Add a bucket for a category (id, name, or slug)
    Add {
        label: String,
        term: String,

        /// Position to insert at (1 is first)
        #[arg(short, long)]
        position: Option<usize>,
    },

    /// Remove the bucket at a position
    Remove { index: usize },

    /// Move a bucket to another position
    Move { from: usize, to: usize },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "ordered_sitemap=debug,info"
    } else {
        "ordered_sitemap=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
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
            commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Render { format, attrs } => {
            let sitemap = Sitemap::new(&base_dir)?;
            let attrs: HashMap<String, String> = attrs.into_iter().collect();
            commands::render::run(&sitemap, format, &attrs)?;
        }

        Commands::Expand { input, output } => {
            let sitemap = Sitemap::new(&base_dir)?;
            commands::expand::run(&sitemap, &input, output.as_deref())?;
        }

        Commands::List { r#type } => {
            let sitemap = Sitemap::new(&base_dir)?;
            commands::list::run(&sitemap, &r#type)?;
        }

        Commands::Order { action } => {
            let sitemap = Sitemap::new(&base_dir)?;
            match action {
                OrderAction::Show { section } => {
                    print!("{}", commands::order::show(&sitemap, section.as_deref())?);
                }
                OrderAction::Set { section, ids } => {
                    let ids = commands::order::set(&sitemap, &section, &ids)?;
                    println!("{}: {:?}", section, ids);
                }
                OrderAction::Move {
                    section,
                    id,
                    position,
                } => {
                    let ids = commands::order::move_item(&sitemap, &section, id, position)?;
                    println!("{}: {:?}", section, ids);
                }
                OrderAction::Reset { section } => {
                    if commands::order::reset(&sitemap, &section)? {
                        println!("Cleared {} order", section);
                    } else {
                        println!("No order stored for {}", section);
                    }
                }
            }
        }

        Commands::Strategy { pages, posts } => {
            let sitemap = Sitemap::new(&base_dir)?;
            commands::strategy::run(&sitemap, pages, posts)?;
        }

        Commands::Bucket { action } => {
            let sitemap = Sitemap::new(&base_dir)?;
            match action {
                BucketAction::List => print!("{}", commands::bucket::list(&sitemap)?),
                BucketAction::Add {
                    label,
                    term,
                    position,
                } => {
                    let bucket = commands::bucket::add(&sitemap, &label, &term, position)?;
                    println!("Added bucket {:?} (term {})", bucket.label, bucket.term);
                }
                BucketAction::Remove { index } => {
                    let bucket = commands::bucket::remove(&sitemap, index)?;
                    println!("Removed bucket {:?}", bucket.label);
                }
                BucketAction::Move { from, to } => {
                    commands::bucket::move_bucket(&sitemap, from, to)?;
                    print!("{}", commands::bucket::list(&sitemap)?);
                }
            }
        }

        Commands::Terms => {
            let sitemap = Sitemap::new(&base_dir)?;
            commands::terms::run(&sitemap)?;
        }

        Commands::Version => {
            println!("ordered-sitemap version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
