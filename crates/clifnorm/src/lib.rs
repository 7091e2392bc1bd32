//! clifnorm: CLIF first-order sentences to function-free prenex CNF
//!
//! This library reads Common Logic Interchange Format sentences and rewrites
//! each one into an equivalent sentence with all quantifiers in front, a
//! conjunction of disjunctions of literals as matrix and no function symbols.

pub mod axiom;
pub mod config;
pub mod error;
pub mod json;
pub mod logic;
pub mod normalize;
pub mod parser;

pub use axiom::Axiom;
pub use config::{NormalizerConfig, UnboundPolicy, VariableNaming};
pub use error::{AxiomError, ClifnormError, NormalizeError, Stage};

// Re-export the term model
pub use logic::{
    clauses_of, conjoin, disjoin, is_ff_pcnf, is_in_normal_form, negate, Arg, Clause, Connective,
    Function, Literal, Predicate, PrefixBlock, Quantifier, Term,
};

// Re-export the passes
pub use normalize::{
    coalesce, distribute, hoist_quantifiers, push, push_complete, rescope, simplify,
    standardize_variables, substitute_functions, to_onf, to_pcnf, FreshVariables, Scope,
};

pub use parser::{parse_clif, parse_clif_file, ClifDocument, ParseError};
