//! Non-fatal checks over filter rules
//!
//! Every rule string is accepted by the filter, but some are almost
//! certainly mistakes. `packfilter config validate` reports them.

use std::fmt;

use super::core::FilterConfig;
use crate::filter::{DELIMITER, is_tracer_path};

/// Which rule list a warning refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleList {
    Includes,
    Excludes,
    Jars,
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleList::Includes => "includes",
            RuleList::Excludes => "excludes",
            RuleList::Jars => "jars",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Empty string
    EmptyRule,
    /// Leading, trailing or doubled delimiter
    EmptySegment,
    /// Dots but no slashes, e.g. `com.example`
    DottedName,
    /// Same rule listed as include and exclude; the exclude wins
    IncludedAndExcluded,
    /// Rule at or under the tracer namespace, which is always excluded
    ShadowedByTracer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub list: RuleList,
    pub rule: String,
    pub kind: WarningKind,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = match self.kind {
            WarningKind::EmptyRule => "empty rule".to_string(),
            WarningKind::EmptySegment => {
                format!("contains an empty segment (stray '{DELIMITER}')")
            }
            WarningKind::DottedName => {
                format!("uses '.' separators; packages are separated by '{DELIMITER}'")
            }
            WarningKind::IncludedAndExcluded => {
                "listed in both includes and excludes; the exclude wins".to_string()
            }
            WarningKind::ShadowedByTracer => {
                "falls inside the tracer namespace, which is always excluded; rule ignored"
                    .to_string()
            }
        };
        write!(f, "{} '{}': {}", self.list, self.rule, detail)
    }
}

impl FilterConfig {
    /// Report suspicious rules, in list order
    pub fn lint(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for (list, rules) in [
            (RuleList::Includes, &self.includes),
            (RuleList::Excludes, &self.excludes),
        ] {
            for rule in rules {
                if let Some(kind) = path_rule_problem(rule) {
                    warnings.push(ConfigWarning {
                        list,
                        rule: rule.clone(),
                        kind,
                    });
                }
            }
        }

        for include in &self.includes {
            if self.excludes.contains(include) {
                warnings.push(ConfigWarning {
                    list: RuleList::Includes,
                    rule: include.clone(),
                    kind: WarningKind::IncludedAndExcluded,
                });
            }
        }

        for (list, rules) in [
            (RuleList::Includes, &self.includes),
            (RuleList::Excludes, &self.excludes),
        ] {
            for rule in rules.iter().filter(|rule| is_tracer_path(rule)) {
                warnings.push(ConfigWarning {
                    list,
                    rule: rule.clone(),
                    kind: WarningKind::ShadowedByTracer,
                });
            }
        }

        for jar in self.jars.iter().filter(|jar| jar.is_empty()) {
            warnings.push(ConfigWarning {
                list: RuleList::Jars,
                rule: jar.clone(),
                kind: WarningKind::EmptyRule,
            });
        }

        warnings
    }
}

fn path_rule_problem(rule: &str) -> Option<WarningKind> {
    if rule.is_empty() {
        Some(WarningKind::EmptyRule)
    } else if rule.split(DELIMITER).any(str::is_empty) {
        Some(WarningKind::EmptySegment)
    } else if rule.contains('.') && !rule.contains(DELIMITER) {
        Some(WarningKind::DottedName)
    } else {
        None
    }
}
