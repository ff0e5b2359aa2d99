use clap::{Parser, Subcommand};
use folio::config::{self, SiteConfig};
use folio::contact::ContactForm;
use folio::content::{ContentSource, ContentStore};
use folio::page::Page;
use folio::{generate, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio page renderer")]
#[command(long_about = "\
Portfolio page renderer

A single JSON content document drives the whole page: hero slider, category
cards, featured-work gallery with lightbox, about and contact sections.

Content document (every key optional):

  {
    \"slider-images\":   [\"hero-1.jpg\", ...],
    \"slider-content\":  { \"heading\": ..., \"description\": ..., \"show-heading\": true, ... },
    \"categories\":      [{ \"title\": ..., \"description\": ..., \"image\": ..., \"url\": ... }],
    \"gallery-images\":  [\"g1.jpg\", ...],
    \"settings\":        { \"logo-url\": ..., \"navbar-title\": ..., \"email\": ..., ... },
    \"about\":           { \"title\": ..., \"description\": ..., \"card\": { ... } }
  }

A document that fails to load still renders: every section falls back to its
static default.

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Content document path or URL (overrides [content] location)
    #[arg(long, global = true)]
    content: Option<String>,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the page and its script to the output directory
    Render {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Load the content document and print what the page would show
    Check,
    /// Compose the mailto: link the contact form would open
    Mailto(MailtoArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct MailtoArgs {
    /// Recipient (defaults to [contact] default_email)
    #[arg(long)]
    to: Option<String>,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render { output: ref output_dir } => {
            let site_config = config::load_config(&cli.config_dir)?;
            let store = content_store(&cli, &site_config)?;
            let document = store.document().await;
            let page = Page::mount(document, &site_config);
            let summary = generate::generate(&page, output_dir)?;
            output::print_generate_output(&summary);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.config_dir)?;
            let store = content_store(&cli, &site_config)?;
            let document = store.document().await;
            output::print_check_output(store.source(), document.as_deref(), &site_config);
        }
        Command::Mailto(ref args) => {
            let site_config = config::load_config(&cli.config_dir)?;
            let recipient = args
                .to
                .as_deref()
                .unwrap_or(&site_config.contact.default_email);
            let form = ContactForm {
                name: args.name.clone(),
                email: args.email.clone(),
                subject: args.subject.clone(),
                message: args.message.clone(),
            };
            println!("{}", form.mailto_uri(recipient));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "folio=debug" } else { "folio=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn content_store(cli: &Cli, site_config: &SiteConfig) -> Result<ContentStore, reqwest::Error> {
    let source = match &cli.content {
        Some(location) => ContentSource::parse(location),
        None => resolve_source(&cli.config_dir, &site_config.content.location),
    };
    let client = reqwest::Client::builder()
        .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(ContentStore::new(source, client))
}

/// A relative path in `config.toml` is relative to the config directory.
fn resolve_source(config_dir: &Path, location: &str) -> ContentSource {
    match ContentSource::parse(location) {
        ContentSource::File(path) if path.is_relative() => {
            ContentSource::File(config_dir.join(path))
        }
        source => source,
    }
}
