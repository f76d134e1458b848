//! Terminal output for the REPL.

use classlock_application::{ActivityEvent, EditorView};
use classlock_core::app_group::{App, AppGroup};
use classlock_core::app_lock::AppLockItem;
use classlock_core::class_schedule::ClassEntry;
use classlock_core::settings::{SettingKind, SettingsSection};
use classlock_core::sync::SyncReport;
use colored::Colorize;

pub fn help() {
    let rows = [
        ("catalog [query]", "List installed apps, optionally filtered"),
        ("groups", "List app groups"),
        ("group show <id>", "Show the apps in a group"),
        ("group add <name>", "Create an empty group"),
        ("group edit <id>", "Open the app editor for a group"),
        ("group delete <id>", "Delete a group"),
        ("pick <app-id>", "Check or uncheck an app in the editor"),
        ("search [query]", "Filter the editor's app list"),
        ("editor", "Show the open editor"),
        ("save | cancel", "Apply or discard the editor's changes"),
        ("locks", "List app locks"),
        ("lock <app-id>", "Lock or unlock an app"),
        ("classes [query] [--active] [--inactive]", "Search classes"),
        ("class toggle <id>", "Activate or deactivate a class"),
        ("class add <name> | <start> | <end> [| <group-id>]", "Add a class"),
        ("import <file>", "Add classes from schedule text"),
        ("ics <file> <out.ics> [YYYY-MM-DD]", "Export schedule text as a calendar"),
        ("settings", "Show settings"),
        ("set <section> <setting> <value>", "Change a setting"),
        ("sync", "Sync in the background"),
        ("quit", "Exit"),
    ];
    for (usage, what) in rows {
        println!("  {:<52} {}", usage.bright_cyan(), what.bright_black());
    }
}

pub fn apps(apps: &[App]) {
    if apps.is_empty() {
        println!("{}", "No apps found".bright_black());
        return;
    }
    for app in apps {
        println!(
            "  {:>4}  {:<16} {}",
            app.id.bright_black(),
            app.name,
            app.category.bright_black()
        );
    }
}

pub fn groups(groups: &[AppGroup]) {
    if groups.is_empty() {
        println!("{}", "No app groups yet. Create one with 'group add <name>'.".bright_black());
        return;
    }
    for group in groups {
        println!(
            "  {}  {} {}",
            group.id.bright_black(),
            group.name.bold(),
            format!("({} apps)", group.members.len()).bright_black()
        );
    }
}

pub fn editor(view: &EditorView) {
    println!(
        "{} {}",
        "Edit Apps:".bright_magenta().bold(),
        view.group_name.bold()
    );
    if !view.query.is_empty() {
        println!("{}", format!("Filter: \"{}\"", view.query).bright_black());
    }
    if view.categories.is_empty() {
        println!("{}", "No apps match the filter".bright_black());
    }
    for category in &view.categories {
        println!("  {}", category.category.yellow());
        for row in &category.apps {
            let mark = if row.checked {
                "[x]".green()
            } else {
                "[ ]".normal()
            };
            println!("    {} {:>4}  {}", mark, row.app.id.bright_black(), row.app.name);
        }
    }
    println!(
        "{}",
        format!("{} app(s) selected. 'save' to apply, 'cancel' to discard.", view.staged_count)
            .bright_black()
    );
}

pub fn locks(items: &[AppLockItem], locked: usize) {
    for item in items {
        let state = if item.is_locked {
            "locked".red()
        } else {
            "open".green()
        };
        println!(
            "  {:>4}  {:<12} {:<16} {}",
            item.id.bright_black(),
            item.name,
            item.category.bright_black(),
            state
        );
    }
    println!("{}", format!("{} of {} locked", locked, items.len()).bright_black());
}

pub fn classes(classes: &[ClassEntry]) {
    if classes.is_empty() {
        println!("{}", "No classes found".bright_black());
        return;
    }
    for class in classes {
        let status = if class.is_active {
            "Active".green()
        } else {
            "Inactive".bright_black()
        };
        let blocking = match &class.app_group_id {
            Some(group_id) => format!(" blocks {}", group_id),
            None => String::new(),
        };
        println!(
            "  {}  {:<20} {}  {:<8} {} students{}",
            class.id.bright_black(),
            class.name.bold(),
            class.time_range(),
            status,
            class.students,
            blocking.bright_black()
        );
    }
}

pub fn settings(sections: &[SettingsSection]) {
    for section in sections {
        println!(
            "{} {}",
            section.title.bold(),
            format!("[{}] {}", section.id, section.description).bright_black()
        );
        for setting in &section.settings {
            let value = match &setting.kind {
                SettingKind::Switch { value: true } => "on".green().to_string(),
                SettingKind::Switch { value: false } => "off".bright_black().to_string(),
                SettingKind::Select { value, options } => {
                    let label = options
                        .iter()
                        .find(|o| &o.value == value)
                        .map_or(value.as_str(), |o| o.label.as_str());
                    format!("{} ({})", value.cyan(), label)
                }
            };
            let badge = setting
                .badge
                .as_deref()
                .map(|b| format!(" [{}]", b).yellow().to_string())
                .unwrap_or_default();
            println!("  {:<18} {:<24} {}{}", setting.id, setting.label, value, badge);
        }
    }
}

pub fn sync_report(report: &SyncReport) {
    let elapsed = report.finished_at - report.started_at;
    println!(
        "{}",
        format!(
            "Synced {} group(s) and {} class(es) in {} ms",
            report.groups_synced,
            report.classes_synced,
            elapsed.num_milliseconds()
        )
        .bright_green()
    );
}

/// Prints an activity notice the way the dashboard shows a toast.
pub fn activity(event: &ActivityEvent) {
    let title = if event.level == "WARN" {
        event.message.yellow().bold()
    } else {
        event.message.bright_green().bold()
    };
    match event.detail() {
        Some(detail) => println!("{} {}", title, detail.bright_black()),
        None => println!("{}", title),
    }
}

pub fn error(message: impl std::fmt::Display) {
    eprintln!("{}", format!("Error: {}", message).red());
}
