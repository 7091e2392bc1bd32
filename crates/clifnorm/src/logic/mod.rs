//! First-order logic data structures
//!
//! This module provides the term tree the normalization passes operate on:
//! predicates with their (function) arguments, sentences built from them,
//! and the clause view of normalized sentences.

pub mod clause;
pub mod formula;
pub mod symbol;
pub mod term;

// Re-export commonly used types
pub use clause::{clauses_of, is_ff_pcnf, split_prefix, Clause, Literal, PrefixBlock};
pub use formula::{conjoin, disjoin, is_in_normal_form, negate, Connective, Quantifier, Term};
pub use symbol::sanitize;
pub use term::{Arg, Function, Predicate};
