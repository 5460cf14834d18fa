//! Argument walking and dispatch
//!
//! One invocation is a single pass over the argument tokens: bare words
//! descend into the command tree, flag tokens are parsed against the
//! resolved node's local and inherited declarations, and `--help`/`-h`
//! request help for whatever has been resolved so far. The walk ends in one
//! of three places: a run function, the help renderer, or the suggestion
//! matcher.

use std::io::Write;

use log::debug;
use thiserror::Error;

use crate::command::flag::FlagValues;
use crate::command::node::Command;
use crate::command::resolve::Resolution;
use crate::help::{self, Styles};
use crate::{suggest, version};

/// Errors surfaced to the top-level invocation point, which prints the
/// message and exits non-zero. An unknown subcommand is not among them: that
/// path prints its own suggestion listing and reports failure through the
/// exit code.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("unknown flag: {flag}")]
    UnknownFlag { flag: String },

    #[error("flag needs an argument: {flag}")]
    MissingFlagValue { flag: String },

    #[error("invalid command tree: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Everything a run function gets to see about its invocation.
pub struct Invocation<'a> {
    pub root: &'a Command,
    pub node: &'a Command,
    /// Positional arguments left over after tree descent and flag parsing.
    pub args: Vec<String>,
    pub flags: FlagValues,
    pub styles: &'a Styles,
    pub out: &'a mut dyn Write,
}

/// Resolve `args` against `root` and dispatch.
///
/// Returns the process exit code: 0 on success (including help rendering),
/// 1 when an unknown subcommand was reported.
///
/// # Errors
///
/// Returns [`ExecError`] for unparseable flags and for failed writes to
/// `out`.
pub fn execute(
    root: &Command,
    args: &[String],
    styles: &Styles,
    out: &mut dyn Write,
) -> Result<i32, ExecError> {
    let mut res = Resolution::root(root);
    let mut positional: Vec<String> = Vec::new();
    let mut flags = FlagValues::new();
    let mut help_requested = false;

    let mut i = 0;
    while i < args.len() {
        let token = args[i].as_str();
        if token == "--help" || token == "-h" {
            help_requested = true;
        } else if let Some(body) = token.strip_prefix("--") {
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            let Some(flag) = res.lookup_flag(name) else {
                return Err(ExecError::UnknownFlag {
                    flag: format!("--{name}"),
                });
            };
            let value = if let Some(value) = inline {
                value.to_string()
            } else if flag.takes_value {
                i += 1;
                args.get(i)
                    .cloned()
                    .ok_or_else(|| ExecError::MissingFlagValue {
                        flag: format!("--{}", flag.name),
                    })?
            } else {
                "true".to_string()
            };
            flags.set(&flag.name, value);
        } else if token.len() > 1 && token.starts_with('-') {
            let mut chars = token[1..].chars();
            let (Some(shorthand), None) = (chars.next(), chars.next()) else {
                return Err(ExecError::UnknownFlag {
                    flag: token.to_string(),
                });
            };
            let Some(flag) = res.lookup_shorthand(shorthand) else {
                return Err(ExecError::UnknownFlag {
                    flag: format!("-{shorthand}"),
                });
            };
            let value = if flag.takes_value {
                i += 1;
                args.get(i)
                    .cloned()
                    .ok_or_else(|| ExecError::MissingFlagValue {
                        flag: format!("-{shorthand}"),
                    })?
            } else {
                "true".to_string()
            };
            flags.set(&flag.name, value);
        } else if positional.is_empty()
            && let Some(child) = res.node().find_child(token)
        {
            res.descend(child);
        } else if positional.is_empty() && res.node().has_children() {
            suggest::print_suggestions(&res, token, out)?;
            return Ok(1);
        } else {
            positional.push(token.to_string());
        }
        i += 1;
    }

    debug!(
        "resolved {:?} with {} positional arg(s)",
        res.command_path(),
        positional.len()
    );

    if help_requested {
        help::render_help(&res, &positional, styles, out)?;
        return Ok(0);
    }
    if res.is_root() && flags.is_set("version") {
        version::print(root, out)?;
        return Ok(0);
    }

    match res.node().run {
        Some(run) => {
            let mut inv = Invocation {
                root,
                node: res.node(),
                args: positional,
                flags,
                styles,
                out,
            };
            run(&mut inv)?;
            Ok(0)
        }
        None => {
            help::render_help(&res, &positional, styles, out)?;
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::flag::Flag;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    fn run_capture(root: &Command, tokens: &[&str]) -> (Result<i32, ExecError>, String) {
        let mut out = Vec::new();
        let code = execute(root, &args(tokens), &Styles::plain(), &mut out);
        (code, String::from_utf8(out).unwrap())
    }

    fn tree() -> Command {
        Command {
            name: "profviz".to_string(),
            usage: "profviz <command> <subcommand> [flags]".to_string(),
            flags: vec![
                Flag::bool("help", "Show help for command").shorthand('h'),
                Flag::bool("version", "Show profviz version"),
            ],
            children: vec![
                Command {
                    name: "report".to_string(),
                    aliases: vec!["rep".to_string()],
                    short: "Render a report".to_string(),
                    flags: vec![Flag::value("output", "", "Write the report here")],
                    children: vec![Command {
                        name: "cpu".to_string(),
                        short: "Render a cpu report".to_string(),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                crate::help::command(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_descends_by_name_and_alias() {
        let root = tree();
        let (code, text) = run_capture(&root, &["rep", "cpu"]);
        assert_eq!(code.unwrap(), 0);
        // cpu has no run function, so its help is rendered.
        assert!(text.contains("USAGE\n  profviz report cpu"));
    }

    #[test]
    fn test_unknown_subcommand_reports_and_fails() {
        let root = tree();
        let (code, text) = run_capture(&root, &["reprot"]);
        assert_eq!(code.unwrap(), 1);
        assert!(text.starts_with("unknown command \"reprot\" for \"profviz\""));
        assert!(text.contains("Did you mean this?\n\treport"));
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        let root = tree();
        let (code, _) = run_capture(&root, &["--bogus"]);
        match code.unwrap_err() {
            ExecError::UnknownFlag { flag } => assert_eq!(flag, "--bogus"),
            other => panic!("Expected UnknownFlag, got: {other:?}"),
        }
    }

    #[test]
    fn test_value_flag_inline_and_separate() {
        let root = tree();
        let mut out = Vec::new();
        // No run function on report, but flag parsing must succeed and the
        // leftover token becomes positional.
        let code = execute(
            &root,
            &args(&["report", "--output=prof.svg", "extra"]),
            &Styles::plain(),
            &mut out,
        )
        .unwrap();
        assert_eq!(code, 0);

        let code = execute(
            &root,
            &args(&["report", "--output", "prof.svg"]),
            &Styles::plain(),
            &mut out,
        )
        .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_value_flag_missing_argument() {
        let root = tree();
        let (code, _) = run_capture(&root, &["report", "--output"]);
        match code.unwrap_err() {
            ExecError::MissingFlagValue { flag } => assert_eq!(flag, "--output"),
            other => panic!("Expected MissingFlagValue, got: {other:?}"),
        }
    }

    #[test]
    fn test_help_flag_renders_help_for_resolved_node() {
        let root = tree();
        for tokens in [&["report", "--help"][..], &["report", "-h"][..]] {
            let (code, text) = run_capture(&root, tokens);
            assert_eq!(code.unwrap(), 0);
            assert!(text.contains("USAGE\n  profviz report"));
            assert!(text.contains("INHERITED FLAGS"));
        }
    }

    #[test]
    fn test_inherited_flag_parses_on_child() {
        let root = tree();
        // --version is declared on the root but parses fine on a child; it
        // only takes effect at the root, so the child renders help instead.
        let (code, text) = run_capture(&root, &["report", "cpu", "--version"]);
        assert_eq!(code.unwrap(), 0);
        assert!(text.contains("USAGE\n  profviz report cpu"));
    }

    #[test]
    fn test_positional_args_collect_at_leaf() {
        let root = tree();
        // cpu accepts a positional; with no run function it falls back to help.
        let (code, text) = run_capture(&root, &["report", "cpu", "in.prof"]);
        assert_eq!(code.unwrap(), 0);
        assert!(text.contains("USAGE\n  profviz report cpu"));

        // A second positional on a non-root node reads as a mistyped
        // subcommand and is handed to the suggestion matcher.
        let (code, text) = run_capture(&root, &["report", "cpu", "in.prof", "out.svg"]);
        assert_eq!(code.unwrap(), 0);
        assert!(text.starts_with("unknown command \"out.svg\" for \"profviz report cpu\""));
    }

    fn echo_run(inv: &mut Invocation) -> Result<(), ExecError> {
        writeln!(
            inv.out,
            "{} output={} args={}",
            inv.node.name,
            inv.flags.value_or(inv.node.flags.first().unwrap()),
            inv.args.join(",")
        )?;
        Ok(())
    }

    #[test]
    fn test_run_function_sees_flags_and_args() {
        let mut root = tree();
        root.children.push(Command {
            name: "echo".to_string(),
            short: "Echo the invocation".to_string(),
            flags: vec![Flag::value("output", "report.txt", "Write the report here")],
            run: Some(echo_run),
            ..Default::default()
        });

        let (code, text) = run_capture(&root, &["echo", "a.prof", "--output=x.svg", "b.prof"]);
        assert_eq!(code.unwrap(), 0);
        assert_eq!(text, "echo output=x.svg args=a.prof,b.prof\n");

        let (code, text) = run_capture(&root, &["echo"]);
        assert_eq!(code.unwrap(), 0);
        assert_eq!(text, "echo output=report.txt args=\n");
    }

    #[test]
    fn test_tokens_after_first_positional_do_not_descend() {
        let root = tree();
        // "report" after a positional is an argument, not a subcommand.
        let (code, text) = run_capture(&root, &["help", "bogus-word", "report"]);
        assert_eq!(code.unwrap(), 0);
        assert!(!text.contains("unknown command"));
    }
}
