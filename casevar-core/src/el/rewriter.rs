//! Expression preprocessing.
//!
//! Rewrites shorthand alias calls inside raw expression text into the
//! canonical invocation form the evaluator expects. Stateless, no lookups,
//! idempotent; runs before the text is handed to the evaluator and has no
//! runtime dependency on the resolution side of the crate.

use crate::el::alias::{compile_rules, AliasRule, Arity, CompiledAlias};
use crate::error::AliasConfigError;
use std::borrow::Cow;

pub struct ExpressionRewriter {
    aliases: Vec<CompiledAlias>,
}

impl ExpressionRewriter {
    /// Compile and cross-check a rule set. Families are applied in
    /// declaration order; `compile_rules` guarantees no two of them can
    /// claim the same text, so the order never changes the result.
    pub fn new(rules: &[AliasRule]) -> Result<Self, AliasConfigError> {
        Ok(Self {
            aliases: compile_rules(rules)?,
        })
    }

    /// The rule families the engine ships by default.
    pub fn standard() -> Result<Self, AliasConfigError> {
        Self::new(&standard_rules())
    }

    /// Apply every family to the result of the previous application. Every
    /// occurrence of a matching family is rewritten; text without any alias
    /// comes back byte-identical.
    pub fn rewrite(&self, text: &str) -> String {
        let mut current = text.to_string();
        for alias in &self.aliases {
            if let Cow::Owned(rewritten) = alias.rewrite(&current) {
                current = rewritten;
            }
        }
        current
    }
}

const PREFIXES: &[&str] = &["variables", "vars", "var"];

/// Default alias families. Longer spellings precede shorter ones inside each
/// option list so the alternation prefers them.
pub fn standard_rules() -> Vec<AliasRule> {
    vec![
        AliasRule::new(PREFIXES, &["equals", "eq"], "variables", "equals", Arity::Variadic),
        AliasRule::new(PREFIXES, &["notEquals", "ne"], "variables", "notEquals", Arity::Variadic),
        AliasRule::new(PREFIXES, &["greaterThan", "gt"], "variables", "greaterThan", Arity::Variadic),
        AliasRule::new(
            PREFIXES,
            &["greaterThanOrEquals", "gte"],
            "variables",
            "greaterThanOrEquals",
            Arity::Variadic,
        ),
        AliasRule::new(
            PREFIXES,
            &["lowerThan", "lessThan", "lt"],
            "variables",
            "lowerThan",
            Arity::Variadic,
        ),
        AliasRule::new(
            PREFIXES,
            &["lowerThanOrEquals", "lessThanOrEquals", "lte"],
            "variables",
            "lowerThanOrEquals",
            Arity::Variadic,
        ),
        AliasRule::new(PREFIXES, &["getOrDefault"], "variables", "getOrDefault", Arity::Variadic),
        AliasRule::new(PREFIXES, &["get"], "variables", "get", Arity::Unary),
        AliasRule::new(PREFIXES, &["exists"], "variables", "exists", Arity::Unary),
        AliasRule::new(PREFIXES, &["isEmpty", "empty"], "variables", "isEmpty", Arity::Unary),
        AliasRule::new(
            PREFIXES,
            &["isNotEmpty", "notEmpty"],
            "variables",
            "isNotEmpty",
            Arity::Unary,
        ),
    ]
}
