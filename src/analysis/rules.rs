//! Secret-matching rule set loading.

use crate::types::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// One rule record as it appears in the YAML rule file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    /// Stable identifier (e.g. "aws-access-key", "generic-secret-1").
    pub id: String,
    /// Human-readable name shown in reports.
    pub name: String,
    /// Regex pattern applied to reformatted script bodies.
    pub regex: String,
    /// Free-form severity string carried through to findings.
    pub severity: String,
}

/// A rule whose pattern compiled successfully.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: Rule,
    pub pattern: Regex,
}

impl CompiledRule {
    /// Whether this rule extracts the secret from its second capture group
    /// rather than the whole match.
    ///
    /// Compound "generic secret" rules pair a key-name group with a value
    /// group; only the value is the secret. The policy applies to rules
    /// whose id marks them as generic and whose pattern actually has at
    /// least two capture groups.
    pub fn uses_value_group(&self) -> bool {
        self.rule.id.starts_with("generic-secret") && self.pattern.captures_len() >= 3
    }
}

/// Load and compile the rule set at `path`.
///
/// A missing, unreadable, or unparseable file yields an empty rule set with
/// a warning; the scan then simply produces no secret findings. A rule
/// whose pattern fails to compile is skipped, also with a warning, without
/// affecting the remaining rules.
pub fn load_rules(path: &Path) -> Vec<CompiledRule> {
    match load_rules_strict(path) {
        Ok(compiled) => compiled,
        Err(e) => {
            warn!("could not load rule file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Strict variant for rule-file validation: read and parse failures are
/// returned instead of degrading to an empty set. Individual bad patterns
/// are still skipped with a warning.
pub fn load_rules_strict(path: &Path) -> Result<Vec<CompiledRule>> {
    let content = std::fs::read_to_string(path)?;
    let rules: Vec<Rule> = serde_yaml::from_str(&content)?;
    Ok(compile_rules(rules))
}

/// Compile each rule's pattern, dropping the ones that fail.
pub fn compile_rules(rules: Vec<Rule>) -> Vec<CompiledRule> {
    let mut compiled = Vec::with_capacity(rules.len());

    for rule in rules {
        match Regex::new(&rule.regex) {
            Ok(pattern) => compiled.push(CompiledRule { rule, pattern }),
            Err(e) => warn!("skipping rule {}: invalid pattern: {}", rule.id, e),
        }
    }

    debug!("loaded {} rules", compiled.len());
    compiled
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn rule(id: &str, regex: &str) -> Rule {
        Rule {
            id: id.to_string(),
            name: id.to_string(),
            regex: regex.to_string(),
            severity: "high".to_string(),
        }
    }

    #[test]
    fn test_missing_rule_file_yields_empty_set() {
        let rules = load_rules(&PathBuf::from("/nonexistent/rules.yml"));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_strict_loader_surfaces_read_and_parse_errors() {
        use crate::types::HoundError;

        assert!(matches!(
            load_rules_strict(&PathBuf::from("/nonexistent/rules.yml")),
            Err(HoundError::IoError(_))
        ));

        let path = std::env::temp_dir().join("jshound-bad-rules-test.yml");
        std::fs::write(&path, "not: [a rule list").unwrap();
        assert!(matches!(
            load_rules_strict(&path),
            Err(HoundError::RuleError(_))
        ));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_bad_pattern_skipped_others_kept() {
        let compiled = compile_rules(vec![
            rule("good", r"ghp_[a-zA-Z0-9]{36}"),
            rule("bad", r"(unclosed"),
            rule("also-good", r"AKIA[A-Z0-9]{16}"),
        ]);

        let ids: Vec<_> = compiled.iter().map(|c| c.rule.id.as_str()).collect();
        assert_eq!(ids, vec!["good", "also-good"]);
    }

    #[test]
    fn test_generic_secret_needs_two_groups() {
        let compiled = compile_rules(vec![
            rule("generic-secret-1", r"(key)=([A-Za-z0-9]{20,})"),
            rule("generic-secret-2", r"secret=[A-Za-z0-9]+"),
            rule("aws-access-key", r"(AKIA)([A-Z0-9]{16})"),
        ]);

        assert!(compiled[0].uses_value_group());
        // Marked generic but only zero groups: falls back to whole match.
        assert!(!compiled[1].uses_value_group());
        // Two groups but not a generic rule.
        assert!(!compiled[2].uses_value_group());
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = r#"
- id: slack-webhook
  name: Slack Webhook
  regex: "https://hooks\\.slack\\.com/services/T[a-zA-Z0-9_]+/B[a-zA-Z0-9_]+/[a-zA-Z0-9_]+"
  severity: high
"#;
        let rules: Vec<Rule> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "slack-webhook");

        let compiled = compile_rules(rules);
        assert_eq!(compiled.len(), 1);
    }
}
