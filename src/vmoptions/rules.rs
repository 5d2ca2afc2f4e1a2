//! Line deletion rules
//!
//! Apply and clear differ only in which rule set they evaluate. A line is
//! deleted when any rule in the set matches its trimmed content.

use crate::config::{
    ADD_OPENS_PREFIX, AGENT_JAR, AGENT_MODE, JAVAAGENT_PREFIX, MANAGED_LINES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRule {
    /// Trimmed line equals the literal
    ExactLine(&'static str),
    /// Trimmed line starts with the prefix
    StartsWith(&'static str),
    /// Trimmed line starts with the prefix and contains every token
    ContainsAll {
        prefix: &'static str,
        tokens: &'static [&'static str],
    },
}

impl DeleteRule {
    pub fn matches(&self, trimmed: &str) -> bool {
        match *self {
            Self::ExactLine(literal) => trimmed == literal,
            Self::StartsWith(prefix) => trimmed.starts_with(prefix),
            Self::ContainsAll { prefix, tokens } => {
                trimmed.starts_with(prefix) && tokens.iter().all(|t| trimmed.contains(t))
            }
        }
    }
}

const AGENT_RULE: DeleteRule = DeleteRule::ContainsAll {
    prefix: JAVAAGENT_PREFIX,
    tokens: &[AGENT_JAR, AGENT_MODE],
};

const APPLY_RULES: [DeleteRule; 2] = [
    DeleteRule::StartsWith(ADD_OPENS_PREFIX),
    DeleteRule::StartsWith(JAVAAGENT_PREFIX),
];

const CLEAR_RULES: [DeleteRule; 3] = [
    DeleteRule::ExactLine(MANAGED_LINES[0]),
    DeleteRule::ExactLine(MANAGED_LINES[1]),
    AGENT_RULE,
];

/// A closed set of deletion rules
#[derive(Debug, Clone, Copy)]
pub struct RuleSet(&'static [DeleteRule]);

impl RuleSet {
    /// Broad stripping before re-appending: every add-opens and every agent line
    pub const APPLY: RuleSet = RuleSet(&APPLY_RULES);

    /// Narrow stripping: only lines this tool writes
    pub const CLEAR: RuleSet = RuleSet(&CLEAR_RULES);

    /// First rule matching `line`, trimming surrounding whitespace
    pub fn matching_rule(&self, line: &str) -> Option<&'static DeleteRule> {
        let trimmed = line.trim();
        self.0.iter().find(|rule| rule.matches(trimmed))
    }

    pub fn should_delete(&self, line: &str) -> bool {
        self.matching_rule(line).is_some()
    }
}

/// Whether `line` is an agent line written by this tool (quoted or not)
pub fn is_tool_agent_line(line: &str) -> bool {
    AGENT_RULE.matches(line.trim())
}

/// Configuration directory referenced by a tool agent line
///
/// Handles both `-javaagent:/cfg/ja-netfilter.jar=jetbrains` and
/// `-javaagent:"/cfg dir/ja-netfilter.jar"=jetbrains`.
pub fn agent_config_path(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if !is_tool_agent_line(trimmed) {
        return None;
    }

    let rest = trimmed.strip_prefix(JAVAAGENT_PREFIX)?;
    let jar_at = rest.find(AGENT_JAR)?;
    let dir = rest[..jar_at]
        .trim_start_matches('"')
        .trim_end_matches(['/', '\\']);

    Some(dir.to_string())
}
