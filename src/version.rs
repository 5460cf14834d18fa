use std::io::{self, Write};

use crate::command::node::Command;
use crate::exec::{ExecError, Invocation};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The hidden `version` subcommand.
#[must_use]
pub fn command() -> Command {
    Command {
        name: "version".to_string(),
        hidden: true,
        run: Some(run),
        ..Default::default()
    }
}

fn run(inv: &mut Invocation) -> Result<(), ExecError> {
    print(inv.root, inv.out)?;
    Ok(())
}

/// Write the version line, shared by the subcommand and the root
/// `--version` flag.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn print(root: &Command, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{} version @ v{VERSION}", root.name)
}
