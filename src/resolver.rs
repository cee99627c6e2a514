// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Implicit tag resolution for plain scalars.
//!
//! The resolver is data, not code: an ordered list of `(tag, pattern)`
//! rules, first match wins. The default rule set implements the YAML
//! core schema plus timestamps. The grammar only ever calls
//! [`TagResolver::resolve`]; swapping the rule set changes which plain
//! scalars come out typed.

use regex::Regex;

/// One auto-detection rule.
#[derive(Debug, Clone)]
struct Rule {
    tag: String,
    pattern: Regex,
}

/// Pattern-based auto-detection of implicit tags for plain scalars.
#[derive(Debug, Clone)]
pub struct TagResolver {
    rules: Vec<Rule>,
}

impl TagResolver {
    /// A resolver with no rules: every plain scalar stays `!!str`.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The core schema: null, bool, int (decimal/octal/hex), float and
    /// timestamp.
    #[must_use]
    pub fn core_schema() -> Self {
        let rules = [
            ("tag:yaml.org,2002:null", r"^(~|null|Null|NULL|)$"),
            ("tag:yaml.org,2002:bool", r"^(true|True|TRUE|false|False|FALSE)$"),
            ("tag:yaml.org,2002:int", r"^[-+]?[0-9]+$"),
            ("tag:yaml.org,2002:int", r"^0o[0-7]+$"),
            ("tag:yaml.org,2002:int", r"^0x[0-9a-fA-F]+$"),
            (
                "tag:yaml.org,2002:float",
                r"^[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?$",
            ),
            (
                "tag:yaml.org,2002:float",
                r"^([-+]?\.(inf|Inf|INF)|\.(nan|NaN|NAN))$",
            ),
            (
                "tag:yaml.org,2002:timestamp",
                r"^\d{4}-\d{2}-\d{2}([Tt ]\d{1,2}:\d{2}:\d{2}(\.\d*)?( ?(Z|[-+]\d{1,2}(:?\d{2})?))?)?$",
            ),
        ];
        let mut resolver = Self::empty();
        for (tag, pattern) in rules {
            resolver.push_rule(tag, pattern).expect("built-in rule pattern");
        }
        resolver
    }

    /// Append a rule; later rules only apply when no earlier rule matched.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    pub fn with_rule(mut self, tag: &str, pattern: &str) -> Result<Self, regex::Error> {
        self.push_rule(tag, pattern)?;
        Ok(self)
    }

    fn push_rule(&mut self, tag: &str, pattern: &str) -> Result<(), regex::Error> {
        self.rules.push(Rule {
            tag: tag.to_owned(),
            pattern: Regex::new(pattern)?,
        });
        Ok(())
    }

    /// The tag of the first rule matching `value`, or `None`.
    #[must_use]
    pub fn resolve(&self, value: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(value))
            .map(|rule| rule.tag.as_str())
    }
}

impl Default for TagResolver {
    fn default() -> Self {
        Self::core_schema()
    }
}
