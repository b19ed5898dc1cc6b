//! Class filter built on the segment trie
//!
//! [`ClassList`] turns include/exclude rule strings into a [`PackTree`] and
//! answers whether a class (named with `/`-separated package segments, as in
//! `com/example/Main`) should be instrumented. It also carries an optional
//! allow-list of archive path prefixes, checked separately from the trie.
//!
//! ```
//! use packfilter::filter::ClassList;
//!
//! let list = ClassList::new(&["a", "a/a/a"], &["a/a"], true);
//! assert!(list.should_process("a/b"));
//! assert!(list.should_process("a/a/a/b"));
//! assert!(!list.should_process("a/a/b"));
//! assert!(!list.should_process("b"));
//! ```

pub mod shared;

pub use shared::SharedClassList;

use crate::config::FilterConfig;
use crate::trie::PackTree;

/// Separator between package segments in rules and class names
pub const DELIMITER: char = '/';

/// Package of the tracing agent itself; never instrumented
pub const TRACER_NAMESPACE: &str = "fr/inria/yajta";

/// Split `s` on every `delim`, keeping empty segments
pub fn split(s: &str, delim: char) -> Vec<&str> {
    s.split(delim).collect()
}

/// Whether `path` names the tracer namespace or something inside it
pub fn is_tracer_path(path: &str) -> bool {
    let tracer = split(TRACER_NAMESPACE, DELIMITER);
    let segments = split(path, DELIMITER);
    segments.len() >= tracer.len() && segments[..tracer.len()] == tracer[..]
}

/// Include/exclude filter over class names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassList {
    tree: PackTree,
    jars: Vec<String>,
}

impl ClassList {
    /// Build the filter from rule lists.
    ///
    /// With `strict_includes` anything not included is skipped; without it
    /// anything not excluded is processed. Includes are applied first, then
    /// excludes, then the tracer namespace exclusion. Rules at or under
    /// [`TRACER_NAMESPACE`] are dropped so nothing below it can differ.
    pub fn new<S: AsRef<str>>(includes: &[S], excludes: &[S], strict_includes: bool) -> Self {
        let mut tree = PackTree::new(!strict_includes);

        for (rules, decision) in [(includes, true), (excludes, false)] {
            for rule in rules {
                let rule = rule.as_ref();
                if is_tracer_path(rule) {
                    tracing::warn!(
                        "Ignoring {} '{}': {} is always excluded",
                        if decision { "include" } else { "exclude" },
                        rule,
                        TRACER_NAMESPACE
                    );
                    continue;
                }
                tree.insert(&split(rule, DELIMITER), decision);
            }
        }
        tree.insert(&split(TRACER_NAMESPACE, DELIMITER), false);

        tracing::debug!(
            "Built class filter: {} includes, {} excludes, strict_includes={}, {} nodes",
            includes.len(),
            excludes.len(),
            strict_includes,
            tree.node_count()
        );

        Self {
            tree,
            jars: Vec::new(),
        }
    }

    /// Filter that processes only `package` and what lies beneath it
    pub fn for_package(package: &str) -> Self {
        Self::new(&[package], &[], true)
    }

    /// Build from loaded configuration
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(&config.includes, &config.excludes, config.strict_includes)
            .with_jars(config.jars.iter().cloned())
    }

    /// Restrict eligible classes to locations starting with one of `prefixes`
    pub fn with_jars<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.jars = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Decide whether a class should be instrumented.
    ///
    /// A missing name and two-character array descriptors (`[I`, `[Z`, ...)
    /// are never processed.
    pub fn should_process<'a>(&self, class_name: impl Into<Option<&'a str>>) -> bool {
        let Some(class_name) = class_name.into() else {
            return false;
        };
        if is_primitive_array_descriptor(class_name) {
            tracing::trace!("{} -> skip (array descriptor)", class_name);
            return false;
        }

        let decision = self.tree.query(&split(class_name, DELIMITER));
        tracing::trace!(
            "{} -> {}",
            class_name,
            if decision { "process" } else { "skip" }
        );
        decision
    }

    /// Whether a class file location falls under a configured archive prefix.
    ///
    /// Always true when no prefixes are configured.
    pub fn is_in_jars(&self, class_file_path: &str) -> bool {
        self.jars.is_empty()
            || self
                .jars
                .iter()
                .any(|jar| class_file_path.starts_with(jar.as_str()))
    }

    /// Configured archive prefixes, in declaration order
    pub fn jars(&self) -> &[String] {
        &self.jars
    }

    pub fn tree(&self) -> &PackTree {
        &self.tree
    }

    /// Diagnostic listing of every rule node
    pub fn dump(&self) -> String {
        format!("ClassList:\n{}", self.tree)
    }
}

impl From<&FilterConfig> for ClassList {
    fn from(config: &FilterConfig) -> Self {
        Self::from_config(config)
    }
}

/// `[` plus one more UTF-16 unit, the length JVM tooling reports for a name
fn is_primitive_array_descriptor(name: &str) -> bool {
    name.starts_with('[') && name.encode_utf16().count() == 2
}
