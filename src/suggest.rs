//! "Did you mean" suggestions for mistyped subcommands
//!
//! Matching is case-insensitive Levenshtein distance over characters, with a
//! lowercase prefix match as a shortcut, against the names and aliases of a
//! node's visible children. Candidates are reported alphabetically.

use std::io::{self, Write};
use std::iter;

use crate::command::node::Command;
use crate::command::resolve::Resolution;
use crate::help;

/// Threshold applied when a node's configured minimum distance is not
/// positive.
const DEFAULT_MIN_DISTANCE: usize = 2;

/// Edit distance between two strings, computed over characters with the
/// two-row dynamic program.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, a_ch) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// The threshold to use for a node's configured value: anything `<= 0`
/// falls back to the default of 2.
#[must_use]
pub fn effective_min_distance(configured: i32) -> usize {
    if configured <= 0 {
        DEFAULT_MIN_DISTANCE
    } else {
        usize::try_from(configured).unwrap_or(DEFAULT_MIN_DISTANCE)
    }
}

/// Candidate subcommand names for a mistyped token, sorted alphabetically
/// and deduplicated. Hidden children and the builtin `help` command never
/// appear; aliases are matched and suggested as typed.
#[must_use]
pub fn suggestions_for(node: &Command, arg: &str, min_distance: usize) -> Vec<String> {
    let typed = arg.to_lowercase();
    let mut candidates: Vec<String> = Vec::new();
    for child in node.visible_children().filter(|c| c.name != "help") {
        for candidate in iter::once(&child.name).chain(child.aliases.iter()) {
            let lower = candidate.to_lowercase();
            if levenshtein(&typed, &lower) <= min_distance || lower.starts_with(&typed) {
                candidates.push(candidate.clone());
            }
        }
    }
    candidates.sort();
    candidates.dedup();
    candidates
}

/// Report an unknown subcommand: the error line, any nearby candidates, and
/// the node's usage block.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn print_suggestions(res: &Resolution, arg: &str, out: &mut dyn Write) -> io::Result<()> {
    let node = res.node();
    writeln!(out, "unknown command {:?} for {:?}", arg, res.command_path())?;

    let threshold = effective_min_distance(node.suggestions_min_distance);
    let candidates = suggestions_for(node, arg, threshold);
    if !candidates.is_empty() {
        write!(out, "\nDid you mean this?\n")?;
        for candidate in &candidates {
            writeln!(out, "\t{candidate}")?;
        }
    }
    writeln!(out)?;
    help::render_usage(res, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_cmd(name: &str) -> Command {
        Command {
            name: name.to_string(),
            short: format!("{name} things"),
            ..Default::default()
        }
    }

    fn tree() -> Command {
        let mut run = make_cmd("run");
        run.aliases = vec!["r".to_string()];
        Command {
            name: "profviz".to_string(),
            children: vec![make_cmd("build"), run, crate::help::command()],
            ..Default::default()
        }
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "hello"), 5);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("biuld", "build"), 2);
    }

    #[test]
    fn test_effective_min_distance_defaults() {
        assert_eq!(effective_min_distance(0), 2);
        assert_eq!(effective_min_distance(-1), 2);
        assert_eq!(effective_min_distance(5), 5);
    }

    #[test]
    fn test_mistyped_subcommand_finds_single_candidate() {
        let root = tree();
        assert_eq!(suggestions_for(&root, "biuld", 2), vec!["build"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let root = tree();
        assert_eq!(suggestions_for(&root, "BIULD", 2), vec!["build"]);
    }

    #[test]
    fn test_prefix_matches_regardless_of_distance() {
        let root = tree();
        assert_eq!(suggestions_for(&root, "bui", 2), vec!["build"]);
    }

    #[test]
    fn test_aliases_match_and_are_suggested() {
        let root = tree();
        // One edit away from both the alias "r" and the name "run".
        assert_eq!(suggestions_for(&root, "rn", 2), vec!["r", "run"]);
    }

    #[test]
    fn test_hidden_and_help_children_are_never_suggested() {
        let mut root = tree();
        root.children.push(Command {
            name: "hidden-build".to_string(),
            hidden: true,
            ..Default::default()
        });
        assert!(suggestions_for(&root, "helb", 2).is_empty());
        assert_eq!(suggestions_for(&root, "build", 2), vec!["build"]);
    }

    #[test]
    fn test_candidates_are_sorted_alphabetically() {
        let root = Command {
            name: "profviz".to_string(),
            children: vec![make_cmd("serve"), make_cmd("search"), make_cmd("set")],
            ..Default::default()
        };
        assert_eq!(
            suggestions_for(&root, "se", 2),
            vec!["search", "serve", "set"]
        );
    }

    #[test]
    fn test_print_suggestions_transcript() {
        let root = tree();
        let res = Resolution::root(&root);
        let mut out = Vec::new();
        print_suggestions(&res, "biuld", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "unknown command \"biuld\" for \"profviz\"\n\n\
             Did you mean this?\n\tbuild\n\n\
             Usage: profviz\n\n\
             Available commands:\n  build\n  run\n  help\n"
        );
    }
}
