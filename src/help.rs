//! Help rendering
//!
//! Formats a resolved command's description, usage line, subcommand list,
//! local and inherited flags, examples, and feedback link into titled text
//! blocks. Section titles are bold when stdout is a terminal; bodies are
//! indented by two spaces. Names and descriptions across all display-line
//! groups of one rendering pass share a single alignment column.

use std::fmt;
use std::io::{self, IsTerminal, Write};

use anstyle::{Reset, Style};

use crate::command::node::Command;
use crate::command::resolve::Resolution;
use crate::exec::{ExecError, Invocation};
use crate::suggest;

const BOLD: Style = Style::new().bold();

/// Annotation key holding the feedback link shown at the bottom of help.
pub const FEEDBACK_ANNOTATION: &str = "help:feedback";

const LEARN_MORE: &str =
    "Use 'profviz <command> <subcommand> --help' for more information about a command.";

/// ANSI styling toggle, decided once per invocation.
///
/// Escape codes are only emitted when stdout is a terminal, the same gate the
/// rest of the output pipeline uses.
#[derive(Debug, Clone, Copy)]
pub struct Styles {
    color: bool,
}

impl Styles {
    #[must_use]
    pub fn detect() -> Self {
        Styles {
            color: io::stdout().is_terminal(),
        }
    }

    #[must_use]
    pub fn plain() -> Self {
        Styles { color: false }
    }

    #[must_use]
    pub fn bold(&self, s: &str) -> String {
        if self.color {
            format!("{BOLD}{s}{Reset}")
        } else {
            s.to_string()
        }
    }
}

/// One `<name> <desc>` output line, padded so that descriptions align.
#[derive(Debug, Clone)]
struct DisplayLine {
    name: String,
    desc: String,
    pad: usize,
}

impl DisplayLine {
    fn new(name: String, desc: String) -> Self {
        DisplayLine { name, desc, pad: 0 }
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<pad$} {}", self.name, self.desc, pad = self.pad)
    }
}

fn join_lines(lines: &[DisplayLine]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Set every line's padding to the maximum name width across all groups,
/// counted in characters rather than bytes.
fn adjust_padding(groups: &mut [&mut Vec<DisplayLine>]) {
    let max = groups
        .iter()
        .flat_map(|g| g.iter())
        .map(|l| l.name.chars().count())
        .max()
        .unwrap_or(0);
    for group in groups.iter_mut() {
        for line in group.iter_mut() {
            line.pad = max;
        }
    }
}

/// Uppercase the first character of a string, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Indent every line of `text` by `spaces` spaces. Text ending in a newline
/// gains no trailing indentation.
fn indent(text: &str, spaces: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    let indentation = " ".repeat(spaces);
    let mut out = String::with_capacity(text.len() + spaces);
    let mut last = '\n';
    for c in text.chars() {
        if last == '\n' {
            out.push_str(&indentation);
        }
        out.push(c);
        last = c;
    }
    out
}

struct HelpEntry {
    title: &'static str,
    body: String,
}

fn flag_lines<'a>(flags: impl IntoIterator<Item = &'a crate::command::flag::Flag>) -> Vec<DisplayLine> {
    flags
        .into_iter()
        .map(|f| DisplayLine::new(format!("--{}", f.name), capitalize(&f.usage)))
        .collect()
}

/// Render the full help text for a resolved command.
///
/// `args` are the argument tokens the help request arrived with: when help
/// was asked for a non-root command together with a second token that is not
/// a help flag, that token is treated as a mistyped subcommand and handed to
/// the suggestion matcher instead of rendering help.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn render_help(
    res: &Resolution,
    args: &[String],
    styles: &Styles,
    out: &mut dyn Write,
) -> io::Result<()> {
    if !res.is_root() && args.len() >= 2 && args[1] != "--help" && args[1] != "-h" {
        return suggest::print_suggestions(res, &args[1], out);
    }

    let node = res.node();

    let mut commands: Vec<DisplayLine> = node
        .visible_children()
        .filter(|c| !c.short.is_empty() && c.name != "help")
        .map(|c| DisplayLine::new(format!("{}:", c.name), capitalize(&c.short)))
        .collect();
    let mut local = flag_lines(res.local_flags());
    let mut inherited = flag_lines(res.inherited_flags());
    adjust_padding(&mut [&mut commands, &mut local, &mut inherited]);

    let mut entries: Vec<HelpEntry> = Vec::new();
    let desc = if node.long.is_empty() {
        &node.short
    } else {
        &node.long
    };
    if !desc.is_empty() {
        entries.push(HelpEntry {
            title: "",
            body: desc.clone(),
        });
    }
    entries.push(HelpEntry {
        title: "USAGE",
        body: res.use_line(),
    });
    if !commands.is_empty() {
        entries.push(HelpEntry {
            title: "COMMANDS",
            body: join_lines(&commands),
        });
    }
    if !local.is_empty() {
        entries.push(HelpEntry {
            title: "FLAGS",
            body: join_lines(&local),
        });
    }
    if !inherited.is_empty() {
        entries.push(HelpEntry {
            title: "INHERITED FLAGS",
            body: join_lines(&inherited),
        });
    }
    if !node.example.is_empty() {
        entries.push(HelpEntry {
            title: "EXAMPLES",
            body: node.example.clone(),
        });
    }
    entries.push(HelpEntry {
        title: "LEARN MORE",
        body: LEARN_MORE.to_string(),
    });
    if let Some(feedback) = node.annotations.get(FEEDBACK_ANNOTATION) {
        entries.push(HelpEntry {
            title: "FEEDBACK",
            body: feedback.clone(),
        });
    }

    for entry in &entries {
        if entry.title.is_empty() {
            writeln!(out, "{}", entry.body)?;
        } else {
            writeln!(out, "{}", styles.bold(entry.title))?;
            writeln!(out, "{}", indent(&entry.body, 2))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render the short usage block: use line, available commands, local flags.
/// Reused by the suggestion matcher after an unknown-command report.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn render_usage(res: &Resolution, out: &mut dyn Write) -> io::Result<()> {
    let node = res.node();
    write!(out, "Usage: {}", res.use_line())?;

    let visible: Vec<&Command> = node.visible_children().collect();
    if !visible.is_empty() {
        write!(out, "\n\nAvailable commands:\n")?;
        for child in &visible {
            writeln!(out, "  {}", child.name)?;
        }
    }

    let mut local = flag_lines(res.local_flags());
    if !local.is_empty() {
        adjust_padding(&mut [&mut local]);
        write!(out, "\n\nFlags:\n")?;
        for line in &local {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}

/// The builtin `help` subcommand: `profviz help [command ...]`.
#[must_use]
pub fn command() -> Command {
    Command {
        name: "help".to_string(),
        short: "Help about any command".to_string(),
        long: "Help provides help for any command in the application.".to_string(),
        run: Some(run),
        ..Default::default()
    }
}

fn run(inv: &mut Invocation) -> Result<(), ExecError> {
    let res = Resolution::find(inv.root, &inv.args);
    render_help(&res, &inv.args, inv.styles, inv.out)?;
    Ok(())
}
