use std::collections::HashMap;

use crate::command::flag::Flag;
use crate::command::node::Command;
use crate::help::FEEDBACK_ANNOTATION;
use crate::{help, version};

/// Build the `profviz` command tree.
///
/// The tree is an ordinary value: construct it, validate it, pass it to
/// [`crate::execute`]. Nothing here is registered globally.
#[must_use]
pub fn root_command() -> Command {
    Command {
        name: "profviz".to_string(),
        usage: "profviz <command> <subcommand> [flags]".to_string(),
        aliases: vec!["pvz".to_string()],
        short: "Explore recorded program profiles".to_string(),
        long: "Render and explore recorded program profiles without leaving the terminal."
            .to_string(),
        annotations: HashMap::from([(
            FEEDBACK_ANNOTATION.to_string(),
            "Open an issue at https://github.com/WaltCuller/profviz/issues/new/choose".to_string(),
        )]),
        flags: vec![
            Flag::bool("help", "Show help for command").shorthand('h'),
            Flag::bool("version", "Show profviz version"),
        ],
        children: vec![version::command(), help::command()],
        ..Default::default()
    }
}
