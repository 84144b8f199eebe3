//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use daybrief_briefing::BlockKind;
use daybrief_core::dashboard::{build_dashboard, filter_sources, source_tags};
use daybrief_core::refresh::{RefreshConfig, refresh};
use daybrief_fetch::cache;
use daybrief_shared::{
    AppConfig, cache_path, config_file_path, db_path, init_config, load_config,
    resolve_briefing_url,
};
use daybrief_storage::Storage;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// daybrief — your morning briefing in the terminal.
#[derive(Parser)]
#[command(
    name = "daybrief",
    version,
    about = "Fetch and render a pre-generated morning briefing, with local to-dos and notes.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch the briefing document and update the local cache.
    Fetch {
        /// Briefing URL (overrides the configured one).
        #[arg(long)]
        url: Option<String>,
    },

    /// Render the cached briefing as text.
    Show {
        /// Only show sections whose title contains this text.
        #[arg(short, long)]
        section: Option<String>,
    },

    /// List the briefing's source links.
    Sources {
        /// Only show sources with this origin tag.
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Manage the local to-do list.
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },

    /// Show or replace the local notes text.
    Notes {
        /// Replace the notes with this text.
        #[arg(long)]
        set: Option<String>,
    },

    /// Launch the interactive dashboard.
    Tui,

    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// To-do list subcommands.
#[derive(Subcommand)]
pub(crate) enum TodoAction {
    /// Add a new action item.
    Add {
        /// Item text (joined with spaces).
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List all action items.
    List,
    /// Toggle an item's completed state by its list number.
    Done {
        /// 1-based item number from `todo list`.
        index: usize,
    },
    /// Remove an item by its list number.
    Rm {
        /// 1-based item number from `todo list`.
        index: usize,
    },
    /// Remove all completed items.
    Clear,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
    /// Print the config file path.
    Path,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "daybrief=info",
        1 => "daybrief=debug",
        _ => "daybrief=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Fetch { url } => cmd_fetch(url.as_deref()).await,
        Command::Show { section } => cmd_show(section.as_deref()),
        Command::Sources { tag } => cmd_sources(tag.as_deref()),
        Command::Todo { action } => cmd_todo(action).await,
        Command::Notes { set } => cmd_notes(set.as_deref()).await,
        Command::Tui => cmd_tui(),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Path => cmd_config_path(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_fetch(url_flag: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let url = resolve_briefing_url(&config, url_flag)?;

    info!(%url, "fetching briefing");

    let spinner = fetch_spinner();
    spinner.set_message(format!("Fetching {url}"));

    let outcome = refresh(&RefreshConfig {
        url,
        timeout_secs: config.briefing.timeout_secs,
        cache_path: cache_path()?,
    })
    .await;

    spinner.finish_and_clear();
    let outcome = outcome?;

    let dash = build_dashboard(&outcome.briefing);

    println!();
    if outcome.stale {
        println!("  Fetch failed — keeping the previously cached briefing.");
    } else if outcome.changed {
        println!("  Briefing updated.");
    } else {
        println!("  Briefing unchanged since last fetch.");
    }
    println!(
        "  Generated: {}",
        outcome.briefing.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("  Sections:  {}", dash.sections.len());
    println!("  Sources:   {}", dash.sources.len());
    println!();

    Ok(())
}

fn cmd_show(section_filter: Option<&str>) -> Result<()> {
    let Some(briefing) = cache::load_cached()? else {
        println!("No briefing cached yet. Run `daybrief fetch` first.");
        return Ok(());
    };

    let dash = build_dashboard(&briefing);

    if dash.sections.is_empty() {
        println!("Briefing contains no recognized sections.");
        return Ok(());
    }

    println!(
        "Morning briefing — generated {}",
        dash.generated_at.format("%A, %B %-d at %H:%M UTC")
    );
    println!();

    let wanted = section_filter.map(str::to_lowercase);
    let mut shown = 0usize;

    for section in &dash.sections {
        if let Some(ref needle) = wanted {
            if !section.title.to_lowercase().contains(needle) {
                continue;
            }
        }
        shown += 1;

        println!("{} {}", section.category.icon(), section.title);
        for block in &section.blocks {
            match block.kind {
                BlockKind::Bullet => println!("  • {}", block.plain_text()),
                BlockKind::Paragraph => println!("  {}", block.plain_text()),
            }
        }
        println!();
    }

    if shown == 0 {
        if let Some(filter) = section_filter {
            println!("No section matching '{filter}'.");
        }
    }

    Ok(())
}

fn cmd_sources(tag: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let Some(briefing) = cache::load_cached()? else {
        println!("No briefing cached yet. Run `daybrief fetch` first.");
        return Ok(());
    };

    let filtered = filter_sources(&briefing.sources, tag);
    if filtered.is_empty() {
        match tag {
            Some(t) => println!("No sources tagged '{t}'."),
            None => println!("Briefing has no source links."),
        }
        return Ok(());
    }

    let tags = source_tags(&briefing.sources);
    println!(
        "Sources ({} shown, tags: {})",
        filtered.len().min(config.ui.max_sources),
        if tags.is_empty() {
            "none".to_string()
        } else {
            tags.join(", ")
        }
    );
    println!();

    for link in filtered.iter().take(config.ui.max_sources) {
        println!("  [{}] {}", link.source, link.title);
        println!(
            "      {} points · {} comments · {}",
            link.score, link.comments, link.url
        );
    }

    Ok(())
}

async fn cmd_todo(action: TodoAction) -> Result<()> {
    let storage = Storage::open(&db_path()?).await?;

    match action {
        TodoAction::Add { text } => {
            let text = text.join(" ");
            let item = storage.insert_action(&text).await?;
            println!("Added: {}", item.text);
        }
        TodoAction::List => {
            let items = storage.list_actions().await?;
            if items.is_empty() {
                println!("No action items.");
                return Ok(());
            }
            for (i, item) in items.iter().enumerate() {
                let mark = if item.completed { "x" } else { " " };
                println!("  {}. [{mark}] {}", i + 1, item.text);
            }
        }
        TodoAction::Done { index } => {
            let item = nth_action(&storage, index).await?;
            storage
                .set_action_completed(&item.id, !item.completed)
                .await?;
            let state = if item.completed { "open" } else { "done" };
            println!("Marked {state}: {}", item.text);
        }
        TodoAction::Rm { index } => {
            let item = nth_action(&storage, index).await?;
            storage.delete_action(&item.id).await?;
            println!("Removed: {}", item.text);
        }
        TodoAction::Clear => {
            let removed = storage.clear_completed().await?;
            println!("Removed {removed} completed item(s).");
        }
    }

    Ok(())
}

/// Resolve a 1-based list number to an action item.
async fn nth_action(storage: &Storage, index: usize) -> Result<daybrief_shared::ActionItem> {
    let items = storage.list_actions().await?;
    items
        .into_iter()
        .nth(index.wrapping_sub(1))
        .ok_or_else(|| eyre!("no action item #{index} — run `daybrief todo list`"))
}

async fn cmd_notes(set: Option<&str>) -> Result<()> {
    let storage = Storage::open(&db_path()?).await?;

    match set {
        Some(text) => {
            storage.set_notes(text).await?;
            println!("Notes saved.");
        }
        None => match storage.get_notes().await? {
            Some(content) if !content.is_empty() => println!("{content}"),
            _ => println!("No notes yet. Use `daybrief notes --set \"...\"` or the TUI."),
        },
    }

    Ok(())
}

fn cmd_tui() -> Result<()> {
    info!("launching TUI");

    let status = std::process::Command::new("daybrief-tui")
        .status()
        .map_err(|e| {
            eyre!("could not launch daybrief-tui: {e}. Is the binary on your PATH?")
        })?;

    if !status.success() {
        return Err(eyre!(
            "daybrief-tui exited with status: {}",
            status.code().unwrap_or(-1)
        ));
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

fn cmd_config_path() -> Result<()> {
    println!("{}", config_file_path()?.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Spinner
// ---------------------------------------------------------------------------

/// Spinner shown while the fetch is in flight.
fn fetch_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
