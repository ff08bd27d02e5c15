// Terminal command dispatcher.
// A flat, replaceable table from normalized command text to either a view
// activation or a local handler. No history, piping or expansion.

use chrono::{DateTime, Local};
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::config::{NavigationConfig, Variant};
use crate::modules::forms::FormStatus;
use crate::modules::indicators::terminal_path;
use crate::modules::navigation::NavigationController;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Output,
    /// Reveals the page's hero block.
    Hero,
    Help,
    Path,
    Date,
    Echo,
    Error,
    Status,
    Success,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutputLine {
    pub kind: OutputKind,
    pub text: String,
}

/// Everything a handler may touch while it runs.
pub struct CommandContext<'a> {
    pub nav: &'a mut NavigationController,
    pub output: &'a mut Vec<OutputLine>,
    pub table: &'a CommandTable,
    pub now: DateTime<Local>,
}

impl CommandContext<'_> {
    pub fn print(&mut self, kind: OutputKind, text: impl Into<String>) {
        self.output.push(OutputLine {
            kind,
            text: text.into(),
        });
    }
}

pub type CommandHandler = Arc<dyn Fn(&mut CommandContext<'_>, &str) + Send + Sync>;

#[derive(Clone)]
pub enum CommandAction {
    ActivateView(String),
    Run(CommandHandler),
}

impl fmt::Debug for CommandAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActivateView(id) => f.debug_tuple("ActivateView").field(id).finish(),
            Self::Run(_) => f.write_str("Run(..)"),
        }
    }
}

#[derive(Clone, Debug)]
struct CommandEntry {
    action: CommandAction,
    summary: String,
}

#[derive(Clone, Debug, Default)]
pub struct CommandTable {
    entries: BTreeMap<String, CommandEntry>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in handlers plus the configured navigation aliases.
    pub fn from_config(config: &NavigationConfig) -> Self {
        let mut table = Self::new();

        table.insert_handler("help", "Show this help message", |ctx, _| {
            let lines = ctx.table.help_lines();
            ctx.print(OutputKind::Help, "Available commands:");
            for line in lines {
                ctx.print(OutputKind::Help, line);
            }
        });
        table.insert_handler("clear", "Clear terminal", |ctx, _| {
            ctx.output.clear();
            let default_view = ctx.nav.default_view().to_string();
            let _ = ctx.nav.activate(&default_view);
        });
        table.insert_handler("pwd", "Show current path", |ctx, _| {
            let path = terminal_path(ctx.nav.active_view(), ctx.nav.default_view());
            ctx.print(OutputKind::Path, path);
        });
        table.insert_handler("date", "Show current date", |ctx, _| {
            let stamp = ctx.now.format("%a %b %d %Y %H:%M:%S %z").to_string();
            ctx.print(OutputKind::Date, stamp);
        });
        table.insert_handler("echo", "Echo text to terminal", |ctx, args| {
            ctx.print(OutputKind::Echo, args);
        });
        if config.variant == Variant::Terminal {
            table.insert_handler("whoami", "Display current user information", |ctx, _| {
                ctx.print(OutputKind::Hero, "whoami");
            });
        }

        for (command, view) in &config.commands {
            let title = config
                .views
                .iter()
                .find(|v| &v.id == view)
                .map(|v| v.title.as_str())
                .unwrap_or(view.as_str());
            table.insert(
                command,
                CommandAction::ActivateView(view.clone()),
                format!("Open {}", title),
            );
        }

        table
    }

    pub fn insert(&mut self, command: &str, action: CommandAction, summary: impl Into<String>) {
        self.entries.insert(
            normalize(command),
            CommandEntry {
                action,
                summary: summary.into(),
            },
        );
    }

    pub fn insert_handler<F>(&mut self, command: &str, summary: &str, handler: F)
    where
        F: Fn(&mut CommandContext<'_>, &str) + Send + Sync + 'static,
    {
        self.insert(command, CommandAction::Run(Arc::new(handler)), summary);
    }

    pub fn remove(&mut self, command: &str) -> Option<CommandAction> {
        self.entries.remove(&normalize(command)).map(|e| e.action)
    }

    /// Single lookup for a normalized line: first token, then the whole line.
    /// Returns the action and the argument text handed to handlers.
    pub fn resolve<'a>(&self, line: &'a str) -> Option<(&CommandAction, &'a str)> {
        let (first, args) = split_first(line);
        if let Some(entry) = self.entries.get(first) {
            return Some((&entry.action, args));
        }
        self.entries.get(line).map(|entry| (&entry.action, ""))
    }

    pub fn help_lines(&self) -> Vec<String> {
        let width = self.entries.keys().map(|k| k.len()).max().unwrap_or(0);
        self.entries
            .iter()
            .map(|(command, entry)| format!("  {:<width$} - {}", command, entry.summary, width = width))
            .collect()
    }
}

/// Terminal session: the command table plus the output buffer it writes to.
pub struct Terminal {
    table: CommandTable,
    output: Vec<OutputLine>,
}

impl Terminal {
    pub fn new(config: &NavigationConfig) -> Self {
        Self::with_table(CommandTable::from_config(config))
    }

    pub fn with_table(table: CommandTable) -> Self {
        Self {
            table,
            output: Vec::new(),
        }
    }

    pub fn table_mut(&mut self) -> &mut CommandTable {
        &mut self.table
    }

    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    pub fn print(&mut self, kind: OutputKind, text: impl Into<String>) {
        self.output.push(OutputLine {
            kind,
            text: text.into(),
        });
    }

    /// Mirrors contact form progress into the output buffer.
    pub fn print_form_status(&mut self, status: &FormStatus) {
        let (kind, text) = match status {
            FormStatus::Invalid(text) => (OutputKind::Error, text),
            FormStatus::Sending(text) => (OutputKind::Status, text),
            FormStatus::Sent(text) => (OutputKind::Success, text),
        };
        self.print(kind, text.as_str());
    }

    pub fn dispatch(&mut self, input: &str, nav: &mut NavigationController) {
        self.dispatch_at(input, nav, Local::now());
    }

    /// Runs one input line. Returns how many lines were appended (zero when
    /// the command cleared the buffer).
    pub fn dispatch_at(
        &mut self,
        input: &str,
        nav: &mut NavigationController,
        now: DateTime<Local>,
    ) -> usize {
        let line = normalize(input);
        if line.is_empty() {
            return 0;
        }
        let before = self.output.len();

        match self.table.resolve(&line) {
            Some((CommandAction::ActivateView(view), _)) => {
                debug!("[Terminal] '{}' -> view '{}'", line, view);
                if let Err(e) = nav.activate(view) {
                    warn!("[Terminal] Alias '{}' failed: {}", line, e);
                }
            }
            Some((CommandAction::Run(handler), args)) => {
                debug!("[Terminal] '{}' -> handler", line);
                let handler = handler.clone();
                let mut ctx = CommandContext {
                    nav,
                    output: &mut self.output,
                    table: &self.table,
                    now,
                };
                handler(&mut ctx, args);
            }
            None => {
                let (first, _) = split_first(&line);
                self.output.push(OutputLine {
                    kind: OutputKind::Error,
                    text: format!("Error: Command not found: {}", first),
                });
            }
        }

        self.output.len().saturating_sub(before)
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

fn split_first(line: &str) -> (&str, &str) {
    match line.split_once(' ') {
        Some((first, rest)) => (first, rest.trim_start()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::forms::{SENDING_MESSAGE, SENT_MESSAGE};
    use chrono::TimeZone;
    use rstest::rstest;

    fn terminal() -> (Terminal, NavigationController) {
        let config = NavigationConfig::preset(Variant::Terminal);
        (Terminal::new(&config), NavigationController::new(&config).unwrap())
    }

    fn texts(terminal: &Terminal) -> Vec<&str> {
        terminal.output().iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn unknown_command_reports_first_token() {
        let (mut term, mut nav) = terminal();
        term.dispatch("foo", &mut nav);
        term.dispatch("  Rm -rf / ", &mut nav);
        assert_eq!(
            texts(&term),
            vec!["Error: Command not found: foo", "Error: Command not found: rm"]
        );
        assert_eq!(term.output()[0].kind, OutputKind::Error);
        assert_eq!(nav.active_view(), "home");
    }

    #[test]
    fn minimal_table_scenario() {
        let config = NavigationConfig::preset(Variant::Terminal);
        let mut table = CommandTable::new();
        table.insert("ls", CommandAction::ActivateView("skills".into()), "List skills");
        table.insert_handler("pwd", "Show current path", |ctx, _| {
            let path = terminal_path(ctx.nav.active_view(), ctx.nav.default_view());
            ctx.print(OutputKind::Path, path);
        });
        let mut term = Terminal::with_table(table);
        let mut nav = NavigationController::new(&config).unwrap();

        term.dispatch("foo", &mut nav);
        assert_eq!(texts(&term), vec!["Error: Command not found: foo"]);

        term.dispatch("ls", &mut nav);
        assert_eq!(nav.active_view(), "skills");

        term.dispatch("pwd", &mut nav);
        assert_eq!(texts(&term).last(), Some(&"~/portfolio/skills"));
    }

    #[rstest]
    #[case("ls", "skills")]
    #[case("LS -la", "skills")]
    #[case("cat about.txt", "about")]
    #[case("  Cd Projects ", "projects")]
    #[case("ping contact", "contact")]
    fn aliases_activate_views(#[case] input: &str, #[case] expected: &str) {
        let (mut term, mut nav) = terminal();
        nav.activate("contact").unwrap();
        if expected == "contact" {
            nav.activate("home").unwrap();
        }

        let appended = term.dispatch_at(input, &mut nav, Local::now());

        assert_eq!(nav.active_view(), expected);
        assert_eq!(appended, 0);
    }

    #[test]
    fn whoami_reveals_hero_without_navigating() {
        let (mut term, mut nav) = terminal();
        term.dispatch("cd projects", &mut nav);
        term.dispatch("whoami", &mut nav);

        assert_eq!(nav.active_view(), "projects");
        assert_eq!(term.output()[0].kind, OutputKind::Hero);
    }

    #[test]
    fn whoami_is_terminal_only() {
        let config = NavigationConfig::preset(Variant::Portfolio);
        let mut term = Terminal::new(&config);
        let mut nav = NavigationController::new(&config).unwrap();
        term.dispatch("whoami", &mut nav);
        assert_eq!(texts(&term), vec!["Error: Command not found: whoami"]);
    }

    #[test]
    fn form_status_lands_in_output() {
        let (mut term, _) = terminal();
        term.print_form_status(&FormStatus::Sending(SENDING_MESSAGE.into()));
        term.print_form_status(&FormStatus::Sent(SENT_MESSAGE.into()));
        term.print_form_status(&FormStatus::Invalid("Please fill in all fields.".into()));

        let kinds: Vec<OutputKind> = term.output().iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![OutputKind::Status, OutputKind::Success, OutputKind::Error]);
        assert_eq!(
            texts(&term),
            vec!["Sending message...", "Message sent successfully! ✓", "Please fill in all fields."]
        );
    }

    #[test]
    fn echo_keeps_arguments() {
        let (mut term, mut nav) = terminal();
        term.dispatch("echo Hello   World", &mut nav);
        term.dispatch("echo", &mut nav);
        assert_eq!(texts(&term), vec!["hello   world", ""]);
        assert_eq!(term.output()[0].kind, OutputKind::Echo);
    }

    #[test]
    fn pwd_tracks_active_view() {
        let (mut term, mut nav) = terminal();
        term.dispatch("pwd", &mut nav);
        term.dispatch("cd projects", &mut nav);
        term.dispatch("pwd", &mut nav);
        assert_eq!(texts(&term), vec!["~/portfolio", "~/portfolio/projects"]);
    }

    #[test]
    fn date_uses_supplied_clock() {
        let (mut term, mut nav) = terminal();
        let now = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        term.dispatch_at("date", &mut nav, now);

        let line = &term.output()[0];
        assert_eq!(line.kind, OutputKind::Date);
        assert!(line.text.starts_with("Tue Mar 05 2024 14:07:09"), "{}", line.text);
    }

    #[test]
    fn clear_empties_buffer_and_returns_home() {
        let (mut term, mut nav) = terminal();
        term.dispatch("ls", &mut nav);
        term.dispatch("foo", &mut nav);
        term.dispatch("clear", &mut nav);
        assert!(term.output().is_empty());
        assert_eq!(nav.active_view(), "home");
    }

    #[test]
    fn help_lists_every_command() {
        let (mut term, mut nav) = terminal();
        term.dispatch("help", &mut nav);

        let out = texts(&term);
        assert_eq!(out[0], "Available commands:");
        for command in ["help", "clear", "pwd", "date", "echo", "ls", "cat about.txt", "whoami"] {
            assert!(
                out.iter().any(|l| l.trim_start().starts_with(command)),
                "missing {} in {:?}",
                command,
                out
            );
        }
        assert!(out.iter().any(|l| l.contains("Open skills/")));
    }

    #[test]
    fn empty_input_is_ignored() {
        let (mut term, mut nav) = terminal();
        assert_eq!(term.dispatch_at("   ", &mut nav, Local::now()), 0);
        assert!(term.output().is_empty());
    }

    #[test]
    fn table_is_replaceable() {
        let (mut term, mut nav) = terminal();
        assert!(term.table_mut().remove("LS").is_some());
        term.table_mut().insert_handler("ls", "List files", |ctx, _| {
            ctx.print(OutputKind::Output, "about.txt  skills/  projects/");
        });

        term.dispatch("ls", &mut nav);
        assert_eq!(texts(&term), vec!["about.txt  skills/  projects/"]);
        assert_eq!(nav.active_view(), "home");
    }

    #[test]
    fn alias_to_missing_view_is_absorbed() {
        let (mut term, mut nav) = terminal();
        term.table_mut()
            .insert("warp", CommandAction::ActivateView("hyperspace".into()), "Warp");
        term.dispatch("warp", &mut nav);
        assert!(term.output().is_empty());
        assert_eq!(nav.active_view(), "home");
    }
}
