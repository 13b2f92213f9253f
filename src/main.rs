//! RBF Admin command-line front end.
//!
//! One subcommand per collection, each driving a resource manager.

use std::error::Error;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rbf_admin::config::parse_url;
use rbf_admin::{
    ApiClient, Boxer, Config, Event, FieldInput, Match, News, Post, ProfileUpdate, Resource,
    ResourceManager, Upload,
};

type CliResult<T = ()> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "rbf-admin", version, about = "Manage the federation site content")]
struct Cli {
    /// Base URL of the content API (overrides RBF_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
    /// Base URL for attachments (overrides RBF_ASSET_URL)
    #[arg(long, value_name = "URL")]
    asset_url: Option<String>,
    /// Bearer token (overrides RBF_API_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Posts {
        #[command(subcommand)]
        action: Action,
    },
    Matches {
        #[command(subcommand)]
        action: Action,
    },
    Boxers {
        #[command(subcommand)]
        action: Action,
    },
    Events {
        #[command(subcommand)]
        action: Action,
    },
    News {
        #[command(subcommand)]
        action: Action,
    },
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Debug, Subcommand)]
enum Action {
    /// List the collection
    List {
        /// Print the raw items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new item
    Create {
        /// Field assignment, e.g. --set title="Fight night"
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        /// File for the attachment field
        #[arg(long, value_name = "PATH")]
        attach: Option<PathBuf>,
    },
    /// Update an existing item
    Update {
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        #[arg(long, value_name = "PATH", conflicts_with = "clear_attachment")]
        attach: Option<PathBuf>,
        /// Remove the stored attachment
        #[arg(long)]
        clear_attachment: bool,
    },
    /// Delete an item
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ProfileAction {
    Show,
    Update {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got {:?}", raw)),
    }
}

#[tokio::main]
async fn main() -> CliResult {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(raw) = &cli.api_url {
        config.api_url = parse_url("--api-url", raw)?;
        if cli.asset_url.is_none() && std::env::var("RBF_ASSET_URL").is_err() {
            config.asset_url = config.api_url.clone();
        }
    }
    if let Some(raw) = &cli.asset_url {
        config.asset_url = parse_url("--asset-url", raw)?;
    }
    if let Some(token) = &cli.token {
        config.api_token = Some(token.clone());
    }

    // Initialize logging
    let level = match cli.verbose {
        0 => config.log_level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("API base URL: {}", config.api_url);
    tracing::debug!("Asset base URL: {}", config.asset_url);

    let client = ApiClient::from_config(&config)?;

    match cli.command {
        Command::Posts { action } => run::<Post>(client, action).await,
        Command::Matches { action } => run::<Match>(client, action).await,
        Command::Boxers { action } => run::<Boxer>(client, action).await,
        Command::Events { action } => run::<Event>(client, action).await,
        Command::News { action } => run::<News>(client, action).await,
        Command::Profile { action } => run_profile(client, action).await,
    }
}

async fn run<T: Resource>(client: ApiClient, action: Action) -> CliResult {
    let mut manager = ResourceManager::<T>::new(client);
    let collection = T::schema().collection;

    match action {
        Action::List { json } => {
            manager.load().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(manager.items())?);
            } else if manager.items().is_empty() {
                println!("No {} available.", collection);
            } else {
                for item in manager.items() {
                    println!("{}", describe(manager.client(), item));
                }
            }
        }
        Action::Create { set, attach } => {
            manager.begin_create();
            apply_edits(&mut manager, set)?;
            if let Some(path) = attach {
                attach_file(&mut manager, FieldInput::Upload(Upload::from_path(&path).await?))?;
            }
            let created = manager.submit_create().await?;
            println!("Created {}", describe(manager.client(), &created));
        }
        Action::Update {
            id,
            set,
            attach,
            clear_attachment,
        } => {
            manager.load().await?;
            if manager.begin_edit_by_id(&id).is_none() {
                return Err(format!("no {} with id {}", collection, id).into());
            }
            apply_edits(&mut manager, set)?;
            if let Some(path) = attach {
                attach_file(&mut manager, FieldInput::Upload(Upload::from_path(&path).await?))?;
            } else if clear_attachment {
                attach_file(&mut manager, FieldInput::Clear)?;
            }
            let updated = manager.submit_update().await?;
            println!("Updated {}", describe(manager.client(), &updated));
        }
        Action::Delete { id, yes } => {
            let pending = manager.request_delete(id);
            let prompt = format!("Delete {} {}? [y/N] ", collection, pending.id());
            if !yes && !confirm(&prompt).await? {
                println!("Aborted.");
                return Ok(());
            }
            let confirmed = pending.confirm();
            let id = confirmed.id().to_string();
            manager.delete(confirmed).await?;
            println!("Deleted {} {}", collection, id);
        }
    }

    Ok(())
}

fn apply_edits<T: Resource>(
    manager: &mut ResourceManager<T>,
    edits: Vec<(String, String)>,
) -> CliResult {
    for (field, value) in edits {
        manager.update_draft_field(&field, value)?;
    }
    Ok(())
}

fn attach_file<T: Resource>(manager: &mut ResourceManager<T>, input: FieldInput) -> CliResult {
    let schema = T::schema();
    let attachment = schema
        .attachment
        .ok_or_else(|| format!("{} have no attachment field", schema.collection))?;
    manager.update_draft_field(attachment.name, input)?;
    Ok(())
}

/// One line per item: id, scalar fields, resolved attachment URL.
fn describe<T: Resource>(client: &ApiClient, item: &T) -> String {
    let schema = T::schema();
    let mut line = item.id().to_string();
    for spec in schema.fields {
        if let Some(value) = item.field(spec.name) {
            let value = value.to_string();
            if !value.is_empty() {
                line.push_str(&format!("  {}={:?}", spec.name, value));
            }
        }
    }
    if let (Some(spec), Some(url)) = (
        schema.attachment,
        item.attachment().and_then(|r| client.resolve_asset(r)),
    ) {
        line.push_str(&format!("  {}={}", spec.name, url));
    }
    line
}

async fn confirm(prompt: &str) -> CliResult<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

async fn run_profile(client: ApiClient, action: ProfileAction) -> CliResult {
    match action {
        ProfileAction::Show => {
            let profile = client.fetch_profile().await?;
            println!("{}", profile.email);
        }
        ProfileAction::Update { email, password } => {
            let profile = client
                .update_profile(&ProfileUpdate::new(email, password))
                .await?;
            println!("Updated profile for {}", profile.email);
        }
    }
    Ok(())
}
