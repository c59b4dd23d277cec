//! # prdlint_core
//!
//! Diagnostics engine for product requirement documents.
//!
//! This crate provides:
//! - A heuristic parser extracting user stories, boundaries, flows and edge cases
//! - The `Rule` abstraction and the built-in rules
//! - Report aggregation with a weighted 0-100 score
//! - Configuration loading and the `Linter` facade
//! - Mechanical application of auto-fixes
//!
//! ## Example
//!
//! ```rust,ignore
//! use prdlint_core::{Linter, LinterConfig};
//!
//! let linter = Linter::new(LinterConfig::default())?;
//! let report = linter.analyze("# Overview\nBuild a thing.");
//! println!("score {} with {} issues", report.score, report.issues.len());
//! ```

mod config;
mod diagnostic;
mod document;
mod error;
mod fixer;
mod linter;
mod parser;
mod report;
mod result;
mod rule;
pub mod rules;

pub use config::{LinterConfig, RuleOption};
pub use diagnostic::{Category, Fix, LintIssue, Severity};
pub use document::{Boundaries, Facet, ItemSpans, ParsedPrd, Section};
pub use error::LinterError;
pub use fixer::{FixOutcome, apply_fixes};
pub use linter::{LintFilesResult, Linter};
pub use parser::parse;
pub use report::{LintReport, ScoreWeights, SeverityStats, analyze, analyze_with};
pub use result::FileReport;
pub use rule::{FnRule, Rule, RuleEntry, RuleMeta, RuleSet};

pub use prdlint_text::TextSpan;
