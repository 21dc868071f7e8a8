use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use unagi::{NotificationRecord, Settings, Store, Viewer};

#[derive(Parser, Debug)]
#[command(name = "unagi", version, about = "Admin notification center")]
struct Cli {
    /// settings file, json
    #[arg(long, env = "UNAGI_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the admin bar title, with the count badge
    Badge {
        #[arg(long)]
        user: u64,
        #[arg(long = "cap")]
        capabilities: Vec<String>,
    },
    /// Print the notifications page
    Page {
        #[arg(long)]
        user: u64,
        #[arg(long = "cap")]
        capabilities: Vec<String>,
    },
    /// Extract notices from a file, or stdin
    Extract { file: Option<PathBuf> },
    /// Store buffered notices for a user
    Push {
        #[arg(long)]
        user: u64,
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => path,
        None => unagi::settings::config_dir()?.join("config.json"),
    };
    let mut settings = Settings::load(&config)?;
    if let Some(database) = cli.database {
        settings.database = Some(database);
    }
    tracing::debug!("{:?}", settings);

    match cli.command {
        Command::Extract { file } => {
            let raw = read_input(file)?;
            let info = unagi::Extractor::from_filters(
                &unagi::Filters::default(),
                settings.selector.as_deref(),
            )
            .extract_bytes(&raw);
            println!("{}", info.count);
            if !info.content.is_empty() {
                println!("{}", info.content);
            }
        }
        Command::Push { user, file } => {
            let raw = read_input(file)?;
            let record = NotificationRecord::new(unagi::extractor::normalize(&raw));
            let store = Store::open(settings.database_path()?, settings)?;
            store.push(user, &record)?;
        }
        Command::Badge { user, capabilities } => {
            let store = Store::open(settings.database_path()?, settings)?;
            if let Some(menu) = store.admin_bar_menu(&Viewer::new(user, capabilities))? {
                println!("{}", menu.title);
            }
        }
        Command::Page { user, capabilities } => {
            let store = Store::open(settings.database_path()?, settings)?;
            let viewer = Viewer::new(user, capabilities);
            match store.notification_screen(&viewer, Some(unagi::page::PAGE_SLUG))? {
                Some(html) => print!("{html}"),
                None => tracing::warn!("user {user} may not view notifications"),
            }
        }
    }

    Ok(())
}

fn read_input(file: Option<PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(path) => fs::read(&path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
