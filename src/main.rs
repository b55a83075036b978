//! Actionflow - turn meeting notes into tracked action items and tickets.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use actionflow::{
    ApiClient, ClientConfig, ExtractInput, HttpExtractionService, HttpNotificationService,
    HttpSettingsService, HttpTicketingService, NewTeamMember, NotificationCenter, SettingsStore,
    TicketConfig, UploadFile, WorkflowStore,
};

/// Turn meeting notes into tracked action items and issue-tracker tickets
#[derive(Parser)]
#[command(name = "actionflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL
    #[arg(long, global = true, env = "ACTIONFLOW_API_URL")]
    api_url: Option<String>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract action items from meeting notes
    Extract {
        /// Meeting notes as raw text
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Meeting notes file to upload
        #[arg(long)]
        file: Option<PathBuf>,

        /// Create tickets for every extracted item and notify assignees
        #[arg(long)]
        create_tickets: bool,

        /// Tracker project key (overrides the configured default)
        #[arg(long)]
        project: Option<String>,

        /// Issue type for created tickets
        #[arg(long)]
        issue_type: Option<String>,

        /// Label applied to created tickets
        #[arg(long)]
        label: Option<String>,
    },

    /// Show or edit persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Manage the team roster
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },

    /// Show backend health and integration status
    Status,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the persisted settings
    Show,

    /// Set a settings field, e.g. `set reminders.frequency Daily`
    Set {
        /// Dotted field path (reminders.*, notifications.*, defaults.*)
        key: String,
        /// New value
        value: String,
    },
}

#[derive(Subcommand)]
enum TeamAction {
    /// List team members
    List,

    /// Add a team member
    Add {
        /// Display name
        name: String,

        /// Initials (derived from the name when omitted)
        #[arg(long)]
        initials: Option<String>,
    },

    /// Remove a team member by id
    Remove {
        /// Member id
        id: String,
    },

    /// Send reminder notifications to the whole roster
    Remind,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };
    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    match cli.command {
        Commands::Extract { text, file, create_tickets, project, issue_type, label } => {
            cmd_extract(&config, text, file, create_tickets, project, issue_type, label).await
        }
        Commands::Settings { action } => cmd_settings(&config, action).await,
        Commands::Team { action } => cmd_team(&config, action).await,
        Commands::Status => cmd_status(&config).await,
    }
}

fn workflow_store(config: &ClientConfig) -> Result<WorkflowStore> {
    let client = ApiClient::new(config.api_url.clone())?;
    let center = NotificationCenter::new(config.timing.display_duration());
    Ok(WorkflowStore::new(
        Arc::new(HttpExtractionService::new(client.clone())),
        Arc::new(HttpTicketingService::new(client.clone())),
        Arc::new(HttpNotificationService::new(client)),
        center,
        config.timing,
    ))
}

fn settings_store(config: &ClientConfig) -> Result<SettingsStore> {
    let client = ApiClient::new(config.api_url.clone())?;
    Ok(SettingsStore::new(
        Arc::new(HttpSettingsService::new(client)),
        config.timing.save_debounce(),
    ))
}

#[allow(clippy::fn_params_excessive_bools)]
async fn cmd_extract(
    config: &ClientConfig,
    text: Option<String>,
    file: Option<PathBuf>,
    create_tickets: bool,
    project: Option<String>,
    issue_type: Option<String>,
    label: Option<String>,
) -> Result<()> {
    let input = match (text, file) {
        (Some(content), None) => ExtractInput::Text { content },
        (None, Some(path)) => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let name = path
                .file_name()
                .map_or_else(|| "notes.txt".to_string(), |n| n.to_string_lossy().to_string());
            ExtractInput::File { file: UploadFile::new(name, bytes) }
        }
        _ => bail!("Provide meeting notes with --text or --file"),
    };

    let store = workflow_store(config)?;

    let defaults = TicketConfig::default();
    store.set_config(TicketConfig {
        project: project.unwrap_or(defaults.project),
        issue_type: issue_type.unwrap_or(defaults.issue_type),
        label: label.unwrap_or(defaults.label),
    });

    store.extract_actions(input).await;
    if let Some(err) = store.error() {
        bail!(err);
    }

    let actions = store.actions();
    if actions.is_empty() {
        println!("No action items found.");
        return Ok(());
    }

    println!("Extracted {} action item(s):", actions.len());
    for (i, item) in actions.iter().enumerate() {
        let assignee = item.assignee.as_deref().unwrap_or("unassigned");
        let overdue = if item.overdue { " (overdue)" } else { "" };
        println!("  {}. {} — {} — due {}{}", i + 1, item.title, assignee, item.due_date, overdue);
    }

    if !create_tickets {
        return Ok(());
    }

    store.create_tickets().await;
    if let Some(err) = store.error() {
        bail!(err);
    }

    println!("\nCreated tickets:");
    for ticket in store.created_tickets() {
        let assignee = ticket.assignee.as_deref().unwrap_or("unassigned");
        match &ticket.url {
            Some(url) => println!("  {} — {} — {}", ticket.key, assignee, url),
            None => println!("  {} — {}", ticket.key, assignee),
        }
    }

    // Let the staggered assignee notifications finish before exiting.
    store.wait_for_notifications().await;

    Ok(())
}

async fn cmd_settings(config: &ClientConfig, action: SettingsAction) -> Result<()> {
    let store = settings_store(config)?;
    store.load_settings().await;
    if let Some(err) = store.error() {
        bail!(err);
    }

    match action {
        SettingsAction::Show => {
            let doc = store.document();
            println!("reminders.enabled            = {}", doc.reminders.enabled);
            println!("reminders.frequency          = {}", doc.reminders.frequency);
            println!("reminders.day                = {}", doc.reminders.day);
            println!("reminders.time               = {}", doc.reminders.time);
            println!("notifications.on_create      = {}", doc.notifications.on_create);
            println!("notifications.overdue_warnings = {}", doc.notifications.overdue_warnings);
            println!("defaults.project             = {}", doc.defaults.project);
            println!("defaults.issue_type          = {}", doc.defaults.issue_type);
        }
        SettingsAction::Set { key, value } => {
            apply_setting(&store, &key, &value)?;
            store.save_settings().await;
            if let Some(err) = store.error() {
                bail!(err);
            }
            println!("Saved {key} = {value}");
        }
    }

    Ok(())
}

fn apply_setting(store: &SettingsStore, key: &str, value: &str) -> Result<()> {
    let parse_bool = |v: &str| -> Result<bool> {
        v.parse::<bool>().with_context(|| format!("Expected true/false, got '{v}'"))
    };

    match key {
        "reminders.enabled" => {
            let parsed = parse_bool(value)?;
            store.update(|d| d.reminders.enabled = parsed);
        }
        "reminders.frequency" => store.update(|d| d.reminders.frequency = value.to_string()),
        "reminders.day" => store.update(|d| d.reminders.day = value.to_string()),
        "reminders.time" => store.update(|d| d.reminders.time = value.to_string()),
        "notifications.on_create" => {
            let parsed = parse_bool(value)?;
            store.update(|d| d.notifications.on_create = parsed);
        }
        "notifications.overdue_warnings" => {
            let parsed = parse_bool(value)?;
            store.update(|d| d.notifications.overdue_warnings = parsed);
        }
        "defaults.project" => store.update(|d| d.defaults.project = value.to_string()),
        "defaults.issue_type" => store.update(|d| d.defaults.issue_type = value.to_string()),
        other => bail!("Unknown settings key: {other}"),
    }

    Ok(())
}

async fn cmd_team(config: &ClientConfig, action: TeamAction) -> Result<()> {
    let store = settings_store(config)?;

    match action {
        TeamAction::List => {
            store.load_team_members().await;
            let members = store.team_members();
            if members.is_empty() {
                println!("No team members.");
            }
            for member in members {
                println!("  {} [{}] {}", member.id, member.initials, member.name);
            }
        }
        TeamAction::Add { name, initials } => {
            let member = match initials {
                Some(initials) => NewTeamMember { name, initials },
                None => NewTeamMember::from_name(name),
            };
            let created = store.add_team_member(member).await?;
            println!("Added {} [{}] {}", created.id, created.initials, created.name);
        }
        TeamAction::Remove { id } => {
            store.delete_team_member(&id).await?;
            println!("Removed {id}");
        }
        TeamAction::Remind => {
            store.load_team_members().await;
            let names: Vec<String> =
                store.team_members().into_iter().map(|m| m.name).collect();
            if names.is_empty() {
                println!("No team members to remind.");
                return Ok(());
            }
            let workflow = workflow_store(config)?;
            workflow.send_reminders(&names).await?;
            println!("Reminders sent to {} team member(s)", names.len());
        }
    }

    Ok(())
}

async fn cmd_status(config: &ClientConfig) -> Result<()> {
    let client = ApiClient::new(config.api_url.clone())?;

    match client.health().await {
        Ok(()) => println!("Backend:  ok ({})", config.api_url),
        Err(err) => println!("Backend:  unreachable ({err})"),
    }

    let store = settings_store(config)?;
    store.load_integration_status().await;
    match store.integration_status() {
        Some(status) => {
            let tracker = if status.tracker_connected { "connected" } else { "not connected" };
            let chat = if status.chat_connected { "connected" } else { "not connected" };
            match status.tracker_project {
                Some(project) => println!("Tracker:  {tracker} (project {project})"),
                None => println!("Tracker:  {tracker}"),
            }
            match status.chat_workspace {
                Some(workspace) => println!("Chat:     {chat} (workspace {workspace})"),
                None => println!("Chat:     {chat}"),
            }
        }
        None => println!("Integrations: status unavailable"),
    }

    Ok(())
}
