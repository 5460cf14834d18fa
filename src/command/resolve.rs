use crate::command::flag::Flag;
use crate::command::node::Command;

/// The chain of commands from the tree root to a resolved node.
///
/// A resolution always contains at least the root. Everything the renderer
/// needs about a node's position in the tree (command path, use line,
/// inherited flags) is derived from this chain instead of from parent
/// pointers.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    path: Vec<&'a Command>,
}

impl<'a> Resolution<'a> {
    #[must_use]
    pub fn root(root: &'a Command) -> Self {
        Resolution { path: vec![root] }
    }

    /// Extend the chain with a child of the current node.
    pub fn descend(&mut self, child: &'a Command) {
        self.path.push(child);
    }

    /// Walk `tokens` from `root` as far as they name children, stopping at
    /// the first token that does not match. Used by the builtin `help`
    /// command, which resolves its arguments without flag parsing.
    #[must_use]
    pub fn find(root: &'a Command, tokens: &[String]) -> Self {
        let mut res = Resolution::root(root);
        for token in tokens {
            match res.node().find_child(token) {
                Some(child) => res.descend(child),
                None => break,
            }
        }
        res
    }

    #[must_use]
    pub fn node(&self) -> &'a Command {
        self.path[self.path.len() - 1]
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path.len() == 1
    }

    /// Names from root to node, joined by spaces: `profviz version`.
    #[must_use]
    pub fn command_path(&self) -> String {
        self.path
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The usage line for this node: ancestor names followed by the node's
    /// usage template, or its plain name when no template is set.
    #[must_use]
    pub fn use_line(&self) -> String {
        let node = self.node();
        let tail = if node.usage.is_empty() {
            node.name.as_str()
        } else {
            node.usage.as_str()
        };
        let mut parts: Vec<&str> = self.path[..self.path.len() - 1]
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        parts.push(tail);
        parts.join(" ")
    }

    #[must_use]
    pub fn local_flags(&self) -> &'a [Flag] {
        &self.node().flags
    }

    /// Flags declared on ancestors, root-first.
    #[must_use]
    pub fn inherited_flags(&self) -> Vec<&'a Flag> {
        self.path[..self.path.len() - 1]
            .iter()
            .flat_map(|c| c.flags.iter())
            .collect()
    }

    /// Find a flag by name, preferring the deepest declaration.
    #[must_use]
    pub fn lookup_flag(&self, name: &str) -> Option<&'a Flag> {
        self.path
            .iter()
            .rev()
            .flat_map(|c| c.flags.iter())
            .find(|f| f.name == name)
    }

    /// Find a flag by shorthand, preferring the deepest declaration.
    #[must_use]
    pub fn lookup_shorthand(&self, shorthand: char) -> Option<&'a Flag> {
        self.path
            .iter()
            .rev()
            .flat_map(|c| c.flags.iter())
            .find(|f| f.shorthand == Some(shorthand))
    }
}
