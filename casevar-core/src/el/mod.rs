//! Expression-language preprocessing: alias compilation and rewriting.

pub mod alias;
pub mod rewriter;

pub use alias::{compile_rules, AliasRule, Arity, CompiledAlias, WORK_ITEM_REF};
pub use rewriter::{standard_rules, ExpressionRewriter};
