//! Alias-family compilation.
//!
//! An alias family is a group of interchangeable shorthand spellings for one
//! canonical expression function call, e.g. `${vars:eq(myVar, 123)}` for
//! `${variables:equals(workItem,'myVar', 123)}`. Each family compiles into a
//! single matcher plus a canonical replacement head; the rewriter applies
//! them as a pure text transform before the expression text reaches the
//! evaluator.

use crate::error::AliasConfigError;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Positional token injected as the first argument of every canonical call:
/// the reference to the invoking work item.
pub const WORK_ITEM_REF: &str = "workItem";

/// How many arguments the canonical function takes after the injected
/// work-item reference and the variable name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// The variable name is the only argument; the call closes right after it.
    Unary,
    /// More arguments follow the variable name; they pass through untouched.
    Variadic,
}

/// Declarative configuration for one alias family. Immutable once built.
#[derive(Clone, Debug)]
pub struct AliasRule {
    /// Interchangeable leading tokens, e.g. `variables`, `vars`, `var`.
    /// Ordered: longer spellings must come first so alternation prefers them.
    pub prefix_options: Vec<String>,
    /// Interchangeable function-name tokens, e.g. `equals`, `eq`.
    pub name_options: Vec<String>,
    pub canonical_prefix: String,
    pub canonical_name: String,
    pub arity: Arity,
}

impl AliasRule {
    pub fn new(
        prefix_options: &[&str],
        name_options: &[&str],
        canonical_prefix: &str,
        canonical_name: &str,
        arity: Arity,
    ) -> Self {
        Self {
            prefix_options: prefix_options.iter().map(|s| s.to_string()).collect(),
            name_options: name_options.iter().map(|s| s.to_string()).collect(),
            canonical_prefix: canonical_prefix.to_string(),
            canonical_name: canonical_name.to_string(),
            arity,
        }
    }

    /// `prefix:name` label used in diagnostics.
    pub fn canonical(&self) -> String {
        format!("{}:{}", self.canonical_prefix, self.canonical_name)
    }
}

/// A compiled alias family: matcher plus canonical replacement head.
/// Immutable and `Send + Sync`, safe to share across threads.
#[derive(Clone, Debug)]
pub struct CompiledAlias {
    matcher: Regex,
    canonical_prefix: String,
    canonical_name: String,
    arity: Arity,
}

impl CompiledAlias {
    /// Compile one rule. Pure and deterministic: the same rule always yields
    /// an equivalent matcher/replacement pair.
    pub fn compile(rule: &AliasRule) -> Result<Self, AliasConfigError> {
        if rule.prefix_options.is_empty() {
            return Err(AliasConfigError::EmptyPrefixOptions {
                canonical: rule.canonical(),
            });
        }
        if rule.name_options.is_empty() {
            return Err(AliasConfigError::EmptyNameOptions {
                canonical: rule.canonical(),
            });
        }
        if rule.canonical_prefix.is_empty() || rule.canonical_name.is_empty() {
            return Err(AliasConfigError::EmptyCanonicalForm);
        }

        // Matches e.g. `vars:eq( 'myVar', 123)`:
        // - one of the prefix options, case-sensitive, followed by `:`
        // - one of the function name options
        // - 0+ whitespace, `(`, 0+ whitespace
        // - an optional single or double quote
        // - the first argument, captured non-greedily (group 3)
        // - optional quote, 0+ whitespace
        // - `,` for variadic functions, `)` for unary ones
        let pattern = format!(
            "{}:{}\\s*\\(\\s*'?\"?(.*?)'?\"?\\s*{}",
            or_group(&rule.prefix_options),
            or_group(&rule.name_options),
            match rule.arity {
                Arity::Unary => "\\)",
                Arity::Variadic => ",",
            }
        );
        let compiled = Self {
            matcher: Regex::new(&pattern)?,
            canonical_prefix: rule.canonical_prefix.clone(),
            canonical_name: rule.canonical_name.clone(),
            arity: rule.arity,
        };

        // The canonical output must survive a second rewrite byte-identical,
        // otherwise rewriting would not be idempotent.
        let probe = match rule.arity {
            Arity::Unary => compiled.replacement("x"),
            Arity::Variadic => format!("{} 'other')", compiled.replacement("x")),
        };
        if compiled.rewrite(&probe) != probe {
            return Err(AliasConfigError::CanonicalRematch {
                canonical: rule.canonical(),
            });
        }

        Ok(compiled)
    }

    /// `prefix:name` label used in diagnostics.
    pub fn canonical(&self) -> String {
        format!("{}:{}", self.canonical_prefix, self.canonical_name)
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// Rewrite every occurrence of this family in `text`. Returns the input
    /// borrowed and unchanged when nothing matches.
    pub fn rewrite<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.matcher.replace_all(text, |caps: &Captures| {
            let first_arg = caps.get(3).map_or("", |m| m.as_str());
            if already_canonical(first_arg) {
                // Already in canonical form; leave the occurrence untouched.
                caps[0].to_string()
            } else {
                self.replacement(first_arg)
            }
        })
    }

    /// Canonical invocation for a captured first argument. The argument
    /// value itself is re-emitted verbatim, re-quoted in single quotes; only
    /// the structural tokens around it change.
    fn replacement(&self, first_arg: &str) -> String {
        match self.arity {
            Arity::Unary => format!(
                "{}:{}({},'{}')",
                self.canonical_prefix, self.canonical_name, WORK_ITEM_REF, first_arg
            ),
            Arity::Variadic => format!(
                "{}:{}({},'{}',",
                self.canonical_prefix, self.canonical_name, WORK_ITEM_REF, first_arg
            ),
        }
    }
}

/// True when a match's captured first argument shows the call was already
/// rewritten. The `regex` crate has no lookaround, so the canonical spelling
/// (which is usually itself an accepted alias) cannot be excluded in the
/// pattern; the substitution skips it instead. For unary families the
/// capture window spans `workItem,'name` — hence the trailing-comma case.
fn already_canonical(first_arg: &str) -> bool {
    match first_arg.strip_prefix(WORK_ITEM_REF) {
        Some(rest) => rest.is_empty() || rest.trim_start().starts_with(','),
        None => false,
    }
}

/// `(a|b|c)` with each option regex-escaped.
fn or_group(options: &[String]) -> String {
    let escaped: Vec<String> = options.iter().map(|o| regex::escape(o)).collect();
    format!("({})", escaped.join("|"))
}

/// Compile a whole rule set in declaration order, then reject rule pairs
/// whose matchers can claim the same literal text. Application order is the
/// declaration order and the check makes that order irrelevant for
/// correctness: no two families may both match one substring.
pub fn compile_rules(rules: &[AliasRule]) -> Result<Vec<CompiledAlias>, AliasConfigError> {
    let compiled: Vec<CompiledAlias> = rules
        .iter()
        .map(CompiledAlias::compile)
        .collect::<Result<_, _>>()?;

    for (i, rule) in rules.iter().enumerate() {
        for prefix in &rule.prefix_options {
            for name in &rule.name_options {
                // A complete two-argument call matches the probing family's
                // own pattern under either arity; no other family may match.
                let probe = format!("{prefix}:{name}(x, y)");
                for (j, other) in compiled.iter().enumerate() {
                    if i != j && other.is_match(&probe) {
                        return Err(AliasConfigError::AmbiguousRules {
                            first: rule.canonical(),
                            second: other.canonical(),
                        });
                    }
                }
            }
        }
    }

    Ok(compiled)
}
