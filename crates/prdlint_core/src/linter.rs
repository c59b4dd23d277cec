//! Configured linter facade and file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::RuleOption;
use crate::report::analyze_with;
use crate::rule::RuleSet;
use crate::rules::{BUILTIN_RULE_IDS, create_builtin};
use crate::{Category, FileReport, LintReport, LinterConfig, LinterError, ScoreWeights};

/// Extensions picked up when a directory is linted without include globs.
const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Result type for `lint_patterns`.
///
/// Contains a tuple of:
/// - Reports for files that were read successfully
/// - Files that could not be read, with their errors
pub type LintFilesResult = Result<(Vec<FileReport>, Vec<(PathBuf, LinterError)>), LinterError>;

/// A rule set bound to scoring weights and execution settings.
///
/// Built from a [`LinterConfig`], or directly from a [`RuleSet`] for
/// callers that assemble their own rules.
#[derive(Debug)]
pub struct Linter {
    rules: RuleSet,
    weights: ScoreWeights,
    parallel: bool,
    /// Include glob patterns.
    include_globs: Option<GlobSet>,
    /// Exclude glob patterns.
    exclude_globs: Option<GlobSet>,
}

impl Linter {
    /// Creates a linter with the built-in rules configured by `config`.
    ///
    /// Fails on unknown rule ids or categories, invalid severities, invalid
    /// rule options and invalid glob patterns.
    pub fn new(config: LinterConfig) -> Result<Self, LinterError> {
        let rules = Self::build_rules(&config)?;
        let include_globs = Self::build_globset(&config.include)?;
        let exclude_globs = Self::build_globset(&config.exclude)?;

        info!("Loaded {} rules", rules.len());

        Ok(Self {
            rules,
            weights: config.weights,
            parallel: config.parallel,
            include_globs,
            exclude_globs,
        })
    }

    /// Creates a linter over an explicit rule set with default weights.
    pub fn from_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            weights: ScoreWeights::default(),
            parallel: false,
            include_globs: None,
            exclude_globs: None,
        }
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Analyzes one document.
    pub fn analyze(&self, raw: &str) -> LintReport {
        analyze_with(raw, &self.rules, &self.weights, self.parallel)
    }

    fn build_rules(config: &LinterConfig) -> Result<RuleSet, LinterError> {
        if let Some(unknown) = config
            .rules
            .keys()
            .find(|id| !BUILTIN_RULE_IDS.contains(&id.as_str()))
        {
            return Err(LinterError::config(format!("Unknown rule '{}'", unknown)));
        }

        let disabled_categories = config
            .disabled_categories
            .iter()
            .map(|c| c.parse::<Category>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut rules = RuleSet::default();
        for id in BUILTIN_RULE_IDS {
            let option = config.rules.get(*id);
            if option.is_some_and(|o| !o.is_enabled()) {
                debug!(rule = %id, "Rule disabled by configuration");
                continue;
            }

            let options = option.map(RuleOption::options).unwrap_or(Value::Null);
            let Some(rule) = create_builtin(id, &options)? else {
                continue;
            };
            if disabled_categories.contains(&rule.meta().category) {
                debug!(rule = %id, category = %rule.meta().category, "Rule category disabled");
                continue;
            }
            rules.register(rule)?;

            if let Some(severity) = option.map(RuleOption::severity).transpose()?.flatten() {
                rules.set_severity(id, severity)?;
            }
        }
        Ok(rules)
    }

    /// Builds a GlobSet from patterns.
    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, LinterError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| LinterError::config(format!("Invalid glob pattern: {}", e)))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Lints files matching the given patterns.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_patterns(&self, patterns: &[String]) -> LintFilesResult {
        self.lint_patterns_in(Path::new("."), patterns)
    }

    /// Like [`Linter::lint_patterns`], resolving globs relative to `root`.
    pub fn lint_patterns_in(&self, root: &Path, patterns: &[String]) -> LintFilesResult {
        let files = self.discover_files(root, patterns)?;
        Ok(self.lint_files(&files))
    }

    /// Discovers files matching the given patterns.
    ///
    /// A pattern naming an existing file is taken as is. A directory expands
    /// to the documents below it, and anything else is a glob matched against
    /// paths relative to `root`. Both are filtered by the configured include
    /// and exclude globs.
    fn discover_files(&self, root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, LinterError> {
        let mut files = Vec::new();

        for pattern in patterns {
            let direct = root.join(pattern);
            if direct.is_file() {
                files.push(direct);
                continue;
            }

            let before = files.len();
            if direct.is_dir() {
                self.walk_filtered(root, &direct, &mut files, |relative| {
                    self.include_globs.is_some() || is_document(relative)
                });
            } else {
                let glob = Glob::new(pattern).map_err(|e| {
                    LinterError::config(format!("Invalid pattern '{}': {}", pattern, e))
                })?;
                let matcher = glob.compile_matcher();
                self.walk_filtered(root, root, &mut files, |relative| matcher.is_match(relative));
            }

            if files.len() == before {
                warn!("No files matched '{}'", pattern);
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }

    /// Collects files below `dir` accepted by `matches` and the configured
    /// include/exclude globs, all tested on paths relative to `root`.
    fn walk_filtered(
        &self,
        root: &Path,
        dir: &Path,
        files: &mut Vec<PathBuf>,
        matches: impl Fn(&Path) -> bool,
    ) {
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path);
            if !matches(relative) {
                continue;
            }

            // Check exclude patterns
            if let Some(ref excludes) = self.exclude_globs
                && excludes.is_match(relative)
            {
                continue;
            }

            // Check include patterns (if specified)
            if let Some(ref includes) = self.include_globs
                && !includes.is_match(relative)
            {
                continue;
            }

            files.push(path.to_path_buf());
        }
    }

    /// Lints a list of files in parallel using rayon.
    ///
    /// Results keep the order of `paths`. A file that cannot be read is
    /// reported as a failure and does not affect the others.
    pub fn lint_files(&self, paths: &[PathBuf]) -> (Vec<FileReport>, Vec<(PathBuf, LinterError)>) {
        let results: Vec<Result<FileReport, (PathBuf, LinterError)>> = paths
            .par_iter()
            .map(|path| self.lint_file(path).map_err(|e| (path.clone(), e)))
            .collect();

        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(report) => successes.push(report),
                Err((path, error)) => {
                    warn!("Failed to lint {}: {}", path.display(), error);
                    failures.push((path, error));
                }
            }
        }

        (successes, failures)
    }

    /// Reads and analyzes a single file.
    pub fn lint_file(&self, path: &Path) -> Result<FileReport, LinterError> {
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;
        let report = self.analyze(&content);
        debug!(path = %path.display(), score = report.score, "Linted file");
        Ok(FileReport::new(path.to_path_buf(), content, report))
    }
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn config(json: &str) -> LinterConfig {
        LinterConfig::from_json(json).unwrap()
    }

    #[test]
    fn test_default_config_enables_all_builtins() {
        let linter = Linter::new(LinterConfig::default()).unwrap();
        assert_eq!(linter.rules().len(), BUILTIN_RULE_IDS.len());
    }

    #[test]
    fn test_disable_rule_and_override_severity() {
        let linter = Linter::new(config(
            r#"{ "rules": { "no-vague-language": false, "requires-flows": "error" } }"#,
        ))
        .unwrap();

        assert!(linter.rules().get("no-vague-language").is_none());
        assert_eq!(
            linter.rules().get("requires-flows").unwrap().severity_override(),
            Some(Severity::Error)
        );
    }

    #[test]
    fn test_severity_inside_options_object() {
        let linter = Linter::new(config(
            r#"{ "rules": { "no-vague-language": { "severity": "info", "maxOccurrences": 1 } } }"#,
        ))
        .unwrap();
        let report = linter.analyze("A, B, etc. and C, D, and so on.");
        let vague: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.rule_id == "no-vague-language")
            .collect();
        assert_eq!(vague.len(), 2);
        assert!(vague.iter().all(|i| i.severity == Severity::Info));
    }

    #[test]
    fn test_unknown_rule_is_config_error() {
        let mut cfg = LinterConfig::default();
        cfg.rules.insert("no-such-rule".to_string(), RuleOption::Enabled(true));
        let err = Linter::new(cfg).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Unknown rule 'no-such-rule'");
    }

    #[test]
    fn test_unknown_category_is_config_error() {
        let cfg = LinterConfig {
            disabled_categories: vec!["performance".to_string()],
            ..Default::default()
        };
        assert!(Linter::new(cfg).is_err());
    }

    #[test]
    fn test_disabled_category_removes_rules() {
        let linter = Linter::new(config(r#"{ "disabledCategories": ["clarity"] }"#)).unwrap();
        assert!(
            linter
                .rules()
                .entries()
                .iter()
                .all(|e| e.meta().category != Category::Clarity)
        );
    }

    #[test]
    fn test_weights_from_config() {
        let linter = Linter::new(config(
            r#"{ "weights": { "error": 50 }, "rules": { "requires-boundaries": false,
                 "requires-flows": false, "requires-edge-cases": false } }"#,
        ))
        .unwrap();
        let report = linter.analyze("# Overview\nBuild a thing.");
        assert_eq!(report.score, 50);
    }

    #[test]
    fn test_lint_patterns_with_exclude() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("prd.md"), "# Overview\n").unwrap();
        fs::write(dir.path().join("drafts/old.md"), "# Old\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let linter = Linter::new(config(r#"{ "exclude": ["drafts/**"] }"#)).unwrap();
        let (reports, failures) = linter
            .lint_patterns_in(dir.path(), &["**/*.md".to_string()])
            .unwrap();

        assert!(failures.is_empty());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].path, dir.path().join("prd.md"));
        assert_eq!(reports[0].content, "# Overview\n");
    }

    #[test]
    fn test_directory_pattern_expands_to_documents() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("docs/archive")).unwrap();
        fs::write(dir.path().join("docs/prd.md"), "# Overview\n").unwrap();
        fs::write(dir.path().join("docs/archive/old.markdown"), "# Old\n").unwrap();
        fs::write(dir.path().join("docs/logo.png"), "binary").unwrap();

        let linter = Linter::new(config(r#"{ "exclude": ["docs/archive/**"] }"#)).unwrap();
        let (reports, failures) = linter
            .lint_patterns_in(dir.path(), &["docs".to_string()])
            .unwrap();

        assert!(failures.is_empty());
        let paths: Vec<_> = reports.iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec![dir.path().join("docs/prd.md")]);
    }

    #[test]
    fn test_directory_pattern_uses_include_globs() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/prd.md"), "# Overview\n").unwrap();
        fs::write(dir.path().join("docs/prd.rst"), "Overview\n").unwrap();

        let linter = Linter::new(config(r#"{ "include": ["**/*.rst"] }"#)).unwrap();
        let (reports, _) = linter
            .lint_patterns_in(dir.path(), &["docs".to_string()])
            .unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].path, dir.path().join("docs/prd.rst"));
    }

    #[test]
    fn test_unmatched_pattern_yields_nothing() {
        let dir = tempdir().unwrap();
        let linter = Linter::new(LinterConfig::default()).unwrap();
        let (reports, failures) = linter
            .lint_patterns_in(dir.path(), &["missing/*.md".to_string()])
            .unwrap();
        assert!(reports.is_empty());
        assert!(failures.is_empty());
    }

    #[test]
    fn test_lint_files_reports_unreadable_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.md");
        let linter = Linter::new(LinterConfig::default()).unwrap();
        let (reports, failures) = linter.lint_files(std::slice::from_ref(&missing));
        assert!(reports.is_empty());
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, missing);
    }

    #[test]
    fn test_invalid_glob_is_config_error() {
        let cfg = LinterConfig {
            include: vec!["[".to_string()],
            ..Default::default()
        };
        assert!(Linter::new(cfg).is_err());
    }
}
