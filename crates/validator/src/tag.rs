//! Annotation parsing
//!
//! Turns one field's annotation string into an ordered rule list.
//!
//! # Grammar
//!
//! ```text
//! rule1,rule2(param1|param2)~custom message,!rule3
//! ```
//!
//! - `,` separates rules (commas inside a parameter list do not split);
//! - `~` separates a rule token from its custom message;
//! - a leading `!` negates the rule;
//! - a trailing `( ... )` holds `|`-separated parameters;
//! - `-` alone disables every rule for the field.
//!
//! Tokens containing characters outside the allow-list are dropped without
//! error, so unrecognised decorations never break parsing.

use std::collections::HashMap;

use smallvec::SmallVec;

/// Annotation that disables all validation for a field.
pub const SKIP_ALL: &str = "-";

/// Punctuation allowed in a rule token besides letters and digits.
const TOKEN_PUNCTUATION: &str = "\\'\"!#$%&()*+-./:<=>?@[]^_{|}~ ";

// ============================================================================
// ANNOTATION
// ============================================================================

/// A field annotation after the first parsing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// No annotation, or an empty one. Subject to the required-by-default
    /// policy.
    Empty,
    /// The `-` sentinel. Never validated.
    Skip,
    /// A parsed rule list.
    Rules(ParsedTag),
}

impl Annotation {
    /// Parses an optional annotation string.
    pub fn parse(tag: Option<&str>) -> Self {
        match tag {
            None | Some("") => Annotation::Empty,
            Some(SKIP_ALL) => Annotation::Skip,
            Some(tag) => Annotation::Rules(ParsedTag::parse(tag)),
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Annotation::Skip)
    }
}

// ============================================================================
// RULE INVOCATION
// ============================================================================

/// One rule as written in an annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInvocation {
    token: String,
    name: String,
    params: SmallVec<[String; 2]>,
    parameterized: bool,
    negated: bool,
}

impl RuleInvocation {
    /// Parses a single rule token such as `!in(a|b)`.
    pub fn from_token(token: &str) -> Self {
        let (negated, body) = match token.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, token),
        };

        let (name, params, parameterized) = match body.find('(') {
            Some(open) if body.ends_with(')') && open < body.len() - 1 => {
                let inner = &body[open + 1..body.len() - 1];
                let params = inner.split('|').map(ToOwned::to_owned).collect();
                (&body[..open], params, true)
            }
            _ => (body, SmallVec::new(), false),
        };

        Self {
            token: token.to_owned(),
            name: name.to_owned(),
            params,
            parameterized,
            negated,
        }
    }

    /// The token exactly as written, including `!` and parameters.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Rule name with negation and parameters stripped.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The token without its negation prefix, e.g. `length(2|20)`.
    pub fn expression(&self) -> &str {
        if self.negated { &self.token[1..] } else { &self.token }
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Whether the token carried a `( ... )` parameter list.
    pub fn is_parameterized(&self) -> bool {
        self.parameterized
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }
}

// ============================================================================
// PARSED TAG
// ============================================================================

/// Ordered rule invocations plus the custom message of each token.
///
/// Repeating a token keeps every occurrence in the rule list, but the
/// message of the last occurrence wins for all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTag {
    rules: Vec<RuleInvocation>,
    messages: HashMap<String, String>,
}

impl ParsedTag {
    /// Parses a non-sentinel annotation string.
    pub fn parse(tag: &str) -> Self {
        let mut parsed = Self::default();

        for segment in split_top_level(tag) {
            let segment = segment.trim();
            let (token, message) = segment.split_once('~').unwrap_or((segment, ""));

            if !is_valid_rule_token(token) {
                tracing::trace!(token, "dropping malformed rule token");
                continue;
            }

            parsed.messages.insert(token.to_owned(), message.to_owned());
            parsed.rules.push(RuleInvocation::from_token(token));
        }

        parsed
    }

    pub fn rules(&self) -> &[RuleInvocation] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Custom message for a rule, `None` when absent or empty.
    pub fn message_for(&self, rule: &RuleInvocation) -> Option<&str> {
        self.messages
            .get(rule.token())
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    /// First invocation with the given name.
    pub fn find(&self, name: &str) -> Option<&RuleInvocation> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

/// Splits on commas that are not inside a parameter list.
fn split_top_level(tag: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;

    for (i, c) in tag.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&tag[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tag[start..]);
    parts
}

/// A rule token is non-empty and made of letters, digits, and the allowed
/// punctuation.
pub fn is_valid_rule_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_alphanumeric() || TOKEN_PUNCTUATION.contains(c))
}

// ============================================================================
// TESTS
// ============================================================================
