use crate::config::CodegenConfig;
use crate::{TranspileError, transpile_with};

use anyhow::{Context, Result, bail};
use tracing::info;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};


pub const SOURCE_EXTENSION: &str = "py";

/// Where generated code goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Stdout,
    /// `<stem>.js` files inside this directory, created on first write.
    Dir(PathBuf),
}

#[derive(Debug)]
pub enum Outcome {
    /// Code meant for stdout; printing is left to the caller.
    Printed(String),
    Written(PathBuf),
    Failed {
        error: TranspileError,
        source: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub failed: usize,
}

impl Summary {
    pub fn succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Expands directories into their `.py` files, sorted by path. Plain files
/// are taken as given, in argument order.
pub fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut sources = vec![];
    for input in inputs {
        if !input.is_dir() {
            sources.push(input.clone());
            continue;
        }

        let mut found = vec![];
        let entries = fs::read_dir(input)
            .with_context(|| format!("could not read directory {}", input.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
                found.push(path);
            }
        }
        found.sort();
        info!("found {} sources in {}", found.len(), input.display());
        sources.extend(found);
    }
    Ok(sources)
}

pub fn target_path(source: &Path, out_dir: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    out_dir.join(format!("{}.js", stem))
}

/// Provenance lines written above the generated code, ending in a blank line.
pub fn header(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    format!(
        "// Generated JavaScript from {}\n// Description: Transpiled from {}\n\n",
        name,
        source.display()
    )
}

/// Fails when two sources would write the same output file.
pub fn check_targets(sources: &[PathBuf], out_dir: &Path) -> Result<()> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    for source in sources {
        let target = target_path(source, out_dir);
        if let Some(first) = claimed.get(&target) {
            bail!(
                "{} and {} would both be written to {}",
                first.display(),
                source.display(),
                target.display()
            );
        }
        claimed.insert(target, source);
    }
    Ok(())
}

pub fn transpile_file(source: &Path, target: &Target, config: &CodegenConfig) -> Result<Outcome> {
    let text = fs::read_to_string(source)
        .with_context(|| format!("could not read {}", source.display()))?;

    let code = match transpile_with(&text, config) {
        Ok(code) => code,
        Err(error) => {
            return Ok(Outcome::Failed {
                error,
                source: text,
            });
        }
    };

    let out_dir = match target {
        Target::Stdout => return Ok(Outcome::Printed(code)),
        Target::Dir(dir) => dir,
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("could not create {}", out_dir.display()))?;
    let path = target_path(source, out_dir);
    fs::write(&path, header(source) + &code)
        .with_context(|| format!("could not write {}", path.display()))?;

    info!("transpiled {} -> {}", source.display(), path.display());
    Ok(Outcome::Written(path))
}

/// Transpiles every source, handing each result to `report`. A failing input
/// never stops the ones after it.
pub fn run(
    sources: &[PathBuf],
    target: &Target,
    config: &CodegenConfig,
    mut report: impl FnMut(&Path, &Result<Outcome>),
) -> Summary {
    let mut summary = Summary {
        total: sources.len(),
        failed: 0,
    };
    for source in sources {
        let outcome = transpile_file(source, target, config);
        if matches!(outcome, Err(_) | Ok(Outcome::Failed { .. })) {
            summary.failed += 1;
        }
        report(source, &outcome);
    }
    summary
}
