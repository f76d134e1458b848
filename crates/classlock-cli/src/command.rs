//! REPL command parsing.

use std::path::PathBuf;

use chrono::NaiveDate;
use classlock_core::class_schedule::{ClassFilter, CreateClassRequest};

/// Command words offered by completion and hints.
pub const COMMAND_WORDS: &[&str] = &[
    "help", "catalog", "groups", "group", "pick", "search", "editor", "save", "cancel", "locks",
    "lock", "classes", "class", "import", "ics", "settings", "set", "sync", "quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Catalog(String),
    Groups,
    GroupShow(String),
    GroupAdd(String),
    GroupEdit(String),
    GroupDelete(String),
    /// Toggle an app in the open editor
    Pick(String),
    Search(String),
    Editor,
    Save,
    Cancel,
    Locks,
    Lock(String),
    Classes {
        query: String,
        filters: Vec<ClassFilter>,
    },
    ClassToggle(String),
    ClassAdd(CreateClassRequest),
    Import(PathBuf),
    Ics {
        input: PathBuf,
        output: PathBuf,
        week_of: Option<NaiveDate>,
    },
    Settings,
    Set {
        section: String,
        setting: String,
        value: String,
    },
    Sync,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "help" | "?" => Ok(Command::Help),
            "catalog" => Ok(Command::Catalog(rest.to_string())),
            "groups" => Ok(Command::Groups),
            "group" => parse_group(rest),
            "pick" => Ok(Command::Pick(required(rest, "pick <app-id>")?)),
            "search" => Ok(Command::Search(rest.to_string())),
            "editor" => Ok(Command::Editor),
            "save" => Ok(Command::Save),
            "cancel" => Ok(Command::Cancel),
            "locks" => Ok(Command::Locks),
            "lock" => Ok(Command::Lock(required(rest, "lock <app-id>")?)),
            "classes" => parse_classes(rest),
            "class" => parse_class(rest),
            "import" => Ok(Command::Import(PathBuf::from(required(
                rest,
                "import <schedule-file>",
            )?))),
            "ics" => parse_ics(rest),
            "settings" => Ok(Command::Settings),
            "set" => parse_set(rest),
            "sync" => Ok(Command::Sync),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("Empty command".to_string()),
            other => Err(format!("Unknown command '{}'. Type 'help'.", other)),
        }
    }
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("Usage: {}", usage))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_group(rest: &str) -> Result<Command, String> {
    let (action, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let arg = arg.trim();
    match action {
        "show" => Ok(Command::GroupShow(required(arg, "group show <group-id>")?)),
        // Blank names are rejected by the store, not here.
        "add" => Ok(Command::GroupAdd(arg.to_string())),
        "edit" => Ok(Command::GroupEdit(required(arg, "group edit <group-id>")?)),
        "delete" => Ok(Command::GroupDelete(required(arg, "group delete <group-id>")?)),
        _ => Err("Usage: group show|add|edit|delete <arg>".to_string()),
    }
}

fn parse_classes(rest: &str) -> Result<Command, String> {
    let mut query = Vec::new();
    let mut filters = Vec::new();
    for token in rest.split_whitespace() {
        match token.strip_prefix("--") {
            Some(flag) => filters.push(flag.parse::<ClassFilter>().map_err(|e| e.to_string())?),
            None => query.push(token),
        }
    }
    Ok(Command::Classes {
        query: query.join(" "),
        filters,
    })
}

fn parse_class(rest: &str) -> Result<Command, String> {
    const ADD_USAGE: &str = "class add <name> | <start> | <end> [| <group-id>]";

    let (action, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let arg = arg.trim();
    match action {
        "toggle" => Ok(Command::ClassToggle(required(arg, "class toggle <class-id>")?)),
        "add" => {
            let parts: Vec<&str> = arg.split('|').map(str::trim).collect();
            let request = match parts.as_slice() {
                [name, start, end] => CreateClassRequest::new(*name, *start, *end),
                [name, start, end, group] => {
                    CreateClassRequest::new(*name, *start, *end).with_app_group(*group)
                }
                _ => return Err(format!("Usage: {}", ADD_USAGE)),
            };
            Ok(Command::ClassAdd(request))
        }
        _ => Err("Usage: class toggle|add <arg>".to_string()),
    }
}

fn parse_ics(rest: &str) -> Result<Command, String> {
    const USAGE: &str = "Usage: ics <schedule-file> <output.ics> [YYYY-MM-DD]";

    let args: Vec<&str> = rest.split_whitespace().collect();
    let (input, output, week_of) = match args.as_slice() {
        [input, output] => (input, output, None),
        [input, output, date] => {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| format!("Invalid date '{}'. {}", date, USAGE))?;
            (input, output, Some(date))
        }
        _ => return Err(USAGE.to_string()),
    };
    Ok(Command::Ics {
        input: PathBuf::from(input),
        output: PathBuf::from(output),
        week_of,
    })
}

fn parse_set(rest: &str) -> Result<Command, String> {
    let mut parts = rest.splitn(3, char::is_whitespace);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(section), Some(setting), Some(value)) if !section.is_empty() => Ok(Command::Set {
            section: section.to_string(),
            setting: setting.to_string(),
            value: value.trim().to_string(),
        }),
        _ => Err("Usage: set <section-id> <setting-id> <value>".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("groups").unwrap(), Command::Groups);
        assert_eq!(Command::parse("  save ").unwrap(), Command::Save);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("catalog").unwrap(), Command::Catalog(String::new()));
        assert_eq!(
            Command::parse("catalog you tube").unwrap(),
            Command::Catalog("you tube".to_string())
        );
    }

    #[test]
    fn test_parse_group_commands() {
        assert_eq!(
            Command::parse("group add Focus Time").unwrap(),
            Command::GroupAdd("Focus Time".to_string())
        );
        assert_eq!(Command::parse("group add").unwrap(), Command::GroupAdd(String::new()));
        assert_eq!(
            Command::parse("group edit abc").unwrap(),
            Command::GroupEdit("abc".to_string())
        );
        assert!(Command::parse("group edit").is_err());
        assert!(Command::parse("group rename x").is_err());
    }

    #[test]
    fn test_parse_classes_with_filters() {
        assert_eq!(
            Command::parse("classes math --active").unwrap(),
            Command::Classes {
                query: "math".to_string(),
                filters: vec![ClassFilter::Active],
            }
        );
        assert!(Command::parse("classes --archived").is_err());
    }

    #[test]
    fn test_parse_class_add() {
        let command = Command::parse("class add Biology | 8:00 AM | 9:15 AM | g1").unwrap();
        assert_eq!(
            command,
            Command::ClassAdd(CreateClassRequest::new("Biology", "8:00 AM", "9:15 AM").with_app_group("g1"))
        );
        assert!(Command::parse("class add Biology | 8:00 AM").is_err());
    }

    #[test]
    fn test_parse_ics_and_set() {
        assert_eq!(
            Command::parse("ics week.txt week.ics 2024-01-01").unwrap(),
            Command::Ics {
                input: PathBuf::from("week.txt"),
                output: PathBuf::from("week.ics"),
                week_of: NaiveDate::from_ymd_opt(2024, 1, 1),
            }
        );
        assert!(Command::parse("ics week.txt").is_err());

        assert_eq!(
            Command::parse("set app-control block-mode always").unwrap(),
            Command::Set {
                section: "app-control".to_string(),
                setting: "block-mode".to_string(),
                value: "always".to_string(),
            }
        );
        assert!(Command::parse("set app-control").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
