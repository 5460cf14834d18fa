use std::io::Write;
use std::process::ExitCode;

use profviz::help::Styles;
use profviz::{ExecError, cli};

fn main() -> ExitCode {
    profviz::logger::init();
    match run() {
        Ok(code) => code,
        Err(e) => {
            // Execution errors go to stdout, like the rest of the output.
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, ExecError> {
    let root = cli::root_command();
    profviz::validate_tree(&root)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let styles = Styles::detect();
    let mut stdout = std::io::stdout().lock();
    let code = profviz::execute(&root, &args, &styles, &mut stdout)?;
    stdout.flush()?;

    Ok(if code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
