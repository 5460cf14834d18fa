//! Command-line shell for profviz
//!
//! The crate models a CLI as an explicit command tree: [`cli::root_command`]
//! builds the tree, [`validate_tree`] checks it for wiring mistakes, and
//! [`execute`] walks one invocation's arguments through it. Help rendering,
//! subcommand suggestions, and the version reporter hang off that walk.

use std::collections::HashSet;
use std::iter;

use log::warn;

use crate::command::node::Command;

pub mod cli;
pub mod command;
pub mod exec;
pub mod help;
pub mod logger;
pub mod suggest;
pub mod version;

pub use exec::{ExecError, Invocation, execute};

/// Validate the command tree before execution: empty names and duplicate
/// sibling names or aliases are errors; a visible command without a short
/// description only warns, since the help renderer will skip it.
///
/// # Errors
///
/// Returns `ExecError::Validation` describing the first problem found.
pub fn validate_tree(root: &Command) -> Result<(), ExecError> {
    check_names(root)?;
    warn_missing_short(root);
    Ok(())
}

fn check_names(node: &Command) -> Result<(), ExecError> {
    if node.name.trim().is_empty() {
        return Err(ExecError::Validation(
            "command with an empty name".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for child in &node.children {
        for name in iter::once(&child.name).chain(child.aliases.iter()) {
            if !seen.insert(name.as_str()) {
                return Err(ExecError::Validation(format!(
                    "duplicate command name or alias '{name}' under '{}'",
                    node.name
                )));
            }
        }
    }
    for child in &node.children {
        check_names(child)?;
    }
    Ok(())
}

fn warn_missing_short(node: &Command) {
    for child in &node.children {
        if !child.hidden && child.short.is_empty() {
            warn!(
                "command '{}' has no short description and will not be listed in help",
                child.name
            );
        }
        warn_missing_short(child);
    }
}
