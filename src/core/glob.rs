//! Glob-lite ignore patterns
//!
//! - `**` matches any run of characters, `/` included
//! - `*` matches any run of characters except `/`
//! - everything else is literal
//!
//! Patterns are anchored at both ends and matched against `/`-separated
//! vault-relative paths.

use regex::Regex;
use tracing::debug;

use crate::error::AppError;

fn glob_to_regex(glob: &str) -> String {
    let mut regex = String::with_capacity(glob.len() * 2 + 2);
    regex.push('^');

    let mut rest = glob;
    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("**") {
            regex.push_str(".*");
            rest = after;
        } else if let Some(after) = rest.strip_prefix('*') {
            regex.push_str("[^/]*");
            rest = after;
        } else {
            let mut buf = [0u8; 4];
            regex.push_str(&regex::escape(c.encode_utf8(&mut buf)));
            rest = &rest[c.len_utf8()..];
        }
    }

    regex.push('$');
    regex
}

/// A compiled ignore pattern
#[derive(Debug, Clone)]
pub(crate) struct GlobPattern {
    source: String,
    regex: Regex,
}

impl GlobPattern {
    pub(crate) fn new(pattern: &str) -> Result<Self, AppError> {
        let regex_str = glob_to_regex(pattern);
        let regex = Regex::new(&regex_str).map_err(|e| AppError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Ordered list of ignore patterns; a path is ignored if any of them matches
#[derive(Debug, Clone, Default)]
pub(crate) struct IgnoreSet {
    patterns: Vec<GlobPattern>,
}

impl IgnoreSet {
    pub(crate) fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, AppError> {
        let patterns = patterns
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .map(GlobPattern::new)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = patterns.len(), "compiled ignore patterns");
        Ok(Self { patterns })
    }

    /// First matching pattern, if any
    pub(crate) fn matching(&self, path: &str) -> Option<&GlobPattern> {
        self.patterns.iter().find(|p| p.matches(path))
    }

    pub(crate) fn is_ignored(&self, path: &str) -> bool {
        self.matching(path).is_some()
    }
}
