//! Rules command implementation

use miette::{IntoDiagnostic, Result};
use prdlint_core::{Linter, RuleMeta};

use super::load_config;
use crate::cli::{Cli, OutputFormat};

/// Lists the rules the current configuration would run.
pub fn run_rules(cli: &Cli, format: OutputFormat) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let linter = Linter::new(config).into_diagnostic()?;

    let metas: Vec<&RuleMeta> = linter.rules().entries().iter().map(|e| e.meta()).collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&metas).into_diagnostic()?);
        }
        OutputFormat::Text => {
            let width = metas.iter().map(|m| m.id.len()).max().unwrap_or(0);
            for entry in linter.rules().entries() {
                let meta = entry.meta();
                let severity = entry.severity_override().unwrap_or(meta.severity);
                println!(
                    "{:<width$}  {:<12}  {:<10}  {}",
                    meta.id,
                    meta.category,
                    severity,
                    meta.description,
                    width = width
                );
            }
            println!("\n{} rules enabled", metas.len());
        }
    }

    Ok(())
}
