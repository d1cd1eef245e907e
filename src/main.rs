use pyjs::config::{CodegenConfig, Indent};
use pyjs::driver::{self, Outcome, Target};
use pyjs::{diagnostics, logger};

use anyhow::Result;
use clap::Parser;
use tracing::error;
use yansi::Paint;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pyjs", version, about = "Transpile a small Python subset to JavaScript")]
struct Cli {
    /// Source files, or directories to scan for `.py` files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Where generated `.js` files are written
    #[arg(short, long, default_value = "outputs")]
    out_dir: PathBuf,

    /// Print generated code instead of writing files
    #[arg(long)]
    stdout: bool,

    #[arg(long, default_value_t = 4)]
    indent_width: usize,

    /// Indent generated code with tabs
    #[arg(long)]
    tabs: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let indent = if cli.tabs {
        Indent::Tab
    } else {
        Indent::Spaces(cli.indent_width)
    };
    let config = CodegenConfig::with_indent(indent);

    let target = if cli.stdout {
        Target::Stdout
    } else {
        Target::Dir(cli.out_dir.clone())
    };

    let sources = match plan(&cli.inputs, &target) {
        Ok(sources) => sources,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let summary = driver::run(&sources, &target, &config, report);
    if !summary.succeeded() {
        error!("{} of {} inputs failed", summary.failed, summary.total);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn plan(inputs: &[PathBuf], target: &Target) -> Result<Vec<PathBuf>> {
    let sources = driver::collect_sources(inputs)?;
    if let Target::Dir(out_dir) = target {
        driver::check_targets(&sources, out_dir)?;
    }
    Ok(sources)
}

fn report(source: &Path, outcome: &Result<Outcome>) {
    match outcome {
        Ok(Outcome::Printed(code)) => print!("{}", code),
        Ok(Outcome::Written(_)) => {}
        Ok(Outcome::Failed { error, source: text }) => {
            let file = source.display().to_string();
            if let Err(e) = diagnostics::eprint(error, &file, text) {
                eprintln!("{} {}", "error:".red().bold(), e);
            }
        }
        Err(e) => eprintln!("{} {:#}", "error:".red().bold(), e),
    }
}
