use std::borrow::Cow::{self, Borrowed, Owned};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use classlock_application::DashboardService;
use classlock_core::settings::SettingValue;
use classlock_infrastructure::{ConfigService, SimulatedSyncBackend};

mod command;
mod logging;
mod render;

use command::{COMMAND_WORDS, Command};

#[derive(Parser)]
#[command(name = "classlock")]
#[command(about = "Classlock - class schedules and app restrictions", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/classlock/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the default config file if it does not exist, then exit
    #[arg(long)]
    init_config: bool,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper;

impl CliHelper {
    fn first_word(line: &str) -> Option<&str> {
        (!line.contains(char::is_whitespace)).then_some(line)
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let Some(prefix) = Self::first_word(&line[..pos]) else {
            return Ok((0, vec![]));
        };
        let candidates = COMMAND_WORDS
            .iter()
            .filter(|word| word.starts_with(prefix))
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let word = line.split(char::is_whitespace).next().unwrap_or_default();
        if COMMAND_WORDS.contains(&word) {
            Owned(format!("{}{}", word.bright_cyan(), &line[word.len()..]))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let prefix = Self::first_word(&line[..pos]).filter(|p| !p.is_empty())?;
        COMMAND_WORDS
            .iter()
            .find(|word| word.starts_with(prefix) && word.len() > prefix.len())
            .map(|word| word[prefix.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// Runs one REPL command. Returns `false` when the REPL should exit.
async fn execute(service: &DashboardService, command: Command) -> Result<bool> {
    match command {
        Command::Help => render::help(),
        Command::Catalog(query) => render::apps(&service.filter_catalog(&query).await),
        Command::Groups => render::groups(&service.list_groups().await),
        Command::GroupShow(group_id) => render::apps(&service.group_apps(&group_id).await?),
        Command::GroupAdd(name) => {
            let group = service.create_group(&name).await?;
            println!("{}", format!("id: {}", group.id).bright_black());
        }
        Command::GroupEdit(group_id) => {
            service.open_group_editor(&group_id).await?;
            render::editor(&service.editor_view().await?);
        }
        Command::GroupDelete(group_id) => {
            let group = service.delete_group(&group_id).await?;
            println!("Deleted {}", group.name.bold());
        }
        Command::Pick(app_id) => {
            service.toggle_staged_app(&app_id).await?;
            render::editor(&service.editor_view().await?);
        }
        Command::Search(query) => {
            service.set_editor_query(&query).await?;
            render::editor(&service.editor_view().await?);
        }
        Command::Editor => render::editor(&service.editor_view().await?),
        Command::Save => {
            service.save_group_editor().await?;
        }
        Command::Cancel => {
            if service.cancel_group_editor().await {
                println!("{}", "Changes discarded".bright_black());
            } else {
                println!("{}", "No editor is open".bright_black());
            }
        }
        Command::Locks => render::locks(&service.list_locks().await, service.locked_count().await),
        Command::Lock(app_id) => {
            service.toggle_lock(&app_id).await?;
        }
        Command::Classes { query, filters } => {
            render::classes(&service.search_classes(&query, &filters).await)
        }
        Command::ClassToggle(class_id) => {
            let class = service.toggle_class(&class_id).await?;
            render::classes(std::slice::from_ref(&class));
        }
        Command::ClassAdd(request) => {
            service.create_class(request).await?;
        }
        Command::Import(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            render::classes(&service.import_schedule(&text).await?);
        }
        Command::Ics {
            input,
            output,
            week_of,
        } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let week_of = week_of.unwrap_or_else(|| chrono::Local::now().date_naive());
            let ics = service.schedule_ics(&text, week_of)?;
            fs::write(&output, ics)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote {}", output.display().to_string().bold());
        }
        Command::Settings => render::settings(&service.settings().await),
        Command::Set {
            section,
            setting,
            value,
        } => {
            let updated = service
                .update_setting(&section, &setting, SettingValue::from_input(&value))
                .await?;
            println!("{} = {}", updated.label, updated.value());
        }
        Command::Sync => {
            println!("{}", "Syncing...".yellow());
            // The report arrives while the prompt stays usable.
            let service = service.clone();
            tokio::spawn(async move {
                match service.sync().await {
                    Ok(report) => render::sync_report(&report),
                    Err(e) => render::error(e),
                }
            });
        }
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    if cli.init_config {
        if config_service.write_default_if_missing()? {
            println!("Wrote {}", config_service.path().display());
        } else {
            println!("{} already exists", config_service.path().display());
        }
        return Ok(());
    }
    let config = config_service
        .load()
        .with_context(|| format!("Invalid config at {}", config_service.path().display()))?;

    let mut activity_rx = logging::init(&config.log.level)?;
    tracing::debug!("[CLI] Using config {:?}", config_service.path());

    // ===== Backend Initialization =====
    let groups = config.build_group_store()?;
    let backend = Arc::new(SimulatedSyncBackend::new(config.sync_delay()));
    let service = DashboardService::with_defaults(groups, backend);

    let activity_printer = tokio::spawn(async move {
        while let Some(event) = activity_rx.recv().await {
            render::activity(&event);
        }
    });

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== Classlock ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands or 'quit' to exit.".bright_black());
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match Command::parse(trimmed) {
                    Ok(command) => command,
                    Err(message) => {
                        render::error(message);
                        continue;
                    }
                };
                match execute(&service, command).await {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Err(e) => render::error(format!("{:#}", e)),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                render::error(format!("{:?}", err));
                break;
            }
        }
    }

    activity_printer.abort();
    Ok(())
}
