//! Loading extraction output and sort rules.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Args;
use patentsort_core::{PatentRecord, SortRules, parse_records};
use tracing::info;

/// Where the extracted records and sort rules come from.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// JSON file of extracted records (array or single object), or `-` for stdin.
    pub input: Option<PathBuf>,

    /// Extracted records as an inline JSON string.
    #[arg(long, conflicts_with = "input")]
    pub data: Option<String>,

    /// JSON file overriding the patent-type rank table and date formats.
    #[arg(long, env = "PATENTSORT_RULES")]
    pub rules: Option<PathBuf>,
}

impl InputArgs {
    /// The input file, unless records come from stdin or `--data`.
    pub fn input_file(&self) -> Option<&Path> {
        self.input.as_deref().filter(|p| *p != Path::new("-"))
    }

    pub fn load_rules(&self) -> anyhow::Result<SortRules> {
        match &self.rules {
            Some(path) => SortRules::load(path)
                .with_context(|| format!("loading sort rules from {}", path.display())),
            None => Ok(SortRules::default()),
        }
    }

    pub fn load_records(&self) -> anyhow::Result<Vec<PatentRecord>> {
        let json = self.read_json()?;
        let records = parse_records(&json).context("parsing extracted patent records")?;
        info!(count = records.len(), "loaded patent records");
        Ok(records)
    }

    fn read_json(&self) -> anyhow::Result<String> {
        if let Some(data) = &self.data {
            return Ok(data.clone());
        }
        match self.input.as_deref() {
            None => bail!("no input: pass a JSON file, `-` for stdin, or --data"),
            Some(p) if p == Path::new("-") => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading records from stdin")?;
                Ok(buf)
            }
            Some(p) => {
                std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
            }
        }
    }
}
