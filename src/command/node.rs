use std::collections::HashMap;

use crate::command::flag::Flag;
use crate::exec::{ExecError, Invocation};

/// Run function attached to a leaf command.
pub type RunFn = fn(&mut Invocation) -> Result<(), ExecError>;

/// A single node in the command tree.
///
/// `usage` is the use-line template for this node; when empty, the node's
/// name is used and prefixed with its ancestors' names during rendering.
/// A node without a run function renders its own help when invoked.
#[derive(Debug, Clone, Default)]
pub struct Command {
    pub name: String,
    pub aliases: Vec<String>,
    pub short: String,
    pub long: String,
    pub usage: String,
    pub example: String,
    pub hidden: bool,
    pub annotations: HashMap<String, String>,
    pub flags: Vec<Flag>,
    pub children: Vec<Command>,
    /// Maximum edit distance for subcommand suggestions; values `<= 0` fall
    /// back to the built-in default of 2.
    pub suggestions_min_distance: i32,
    pub run: Option<RunFn>,
}

impl Command {
    /// Look up a direct child by name or alias. Matching is exact; hidden
    /// children are found too, so `profviz version` works while `version`
    /// stays out of the listings.
    #[must_use]
    pub fn find_child(&self, token: &str) -> Option<&Command> {
        self.children
            .iter()
            .find(|c| c.name == token || c.aliases.iter().any(|a| a == token))
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Children that appear in listings: everything not marked hidden.
    pub fn visible_children(&self) -> impl Iterator<Item = &Command> {
        self.children.iter().filter(|c| !c.hidden)
    }
}
