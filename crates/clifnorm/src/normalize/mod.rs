//! Normalization passes
//!
//! Each pass is a pure function from a sentence to a new sentence. The
//! passes are meant to run in the order function elimination, variable
//! standardization, negation pushing and prenexing; [`crate::Axiom`] chains
//! them.

pub mod clausal;
pub mod functions;
pub mod negation;
pub mod prenex;
pub mod quantifier;
pub mod standardize;

#[cfg(test)]
mod proptest_tests;

pub use clausal::{distribute, to_onf};
pub use functions::{substitute_functions, FreshVariables};
pub use negation::{is_negation_normal, push, push_complete};
pub use prenex::to_pcnf;
pub use quantifier::{coalesce, coalesce_connective, hoist_quantifiers, rescope, simplify, Scope};
pub use standardize::{is_standardized, standardize_variables, VariableNamer};
