//! Error types for clifnorm

use std::fmt;
use std::io;
use thiserror::Error;

use crate::parser::ParseError;

/// Failure of one of the rewriting passes.
///
/// Every pass fails fast: the first error aborts normalization of the axiom.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Malformed term: {0}")]
    MalformedTerm(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Ambiguous scope order: {0}")]
    AmbiguousScopeOrder(String),

    #[error("Too many variables: the {limit}-name budget is exhausted")]
    TooManyVariables { limit: usize },

    #[error("Unbound variable '{0}'")]
    UnboundVariable(String),

    #[error("Invalid scope state: {0}")]
    InvalidScopeState(String),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Pipeline stage, reported alongside the error that stopped an axiom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validation,
    FunctionSubstitution,
    VariableStandardization,
    NegationPushing,
    Prenexing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validation => "validation",
            Stage::FunctionSubstitution => "function substitution",
            Stage::VariableStandardization => "variable standardization",
            Stage::NegationPushing => "negation pushing",
            Stage::Prenexing => "prenexing",
        };
        write!(f, "{}", name)
    }
}

/// A normalization failure tied to the axiom that caused it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{stage} failed for {axiom}: {source}")]
pub struct AxiomError {
    pub stage: Stage,
    /// Original CLIF text when known, otherwise the rendered sentence
    pub axiom: String,
    #[source]
    pub source: NormalizeError,
}

/// Top-level error for the reader and command-line surfaces.
#[derive(Error, Debug)]
pub enum ClifnormError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Axiom(#[from] AxiomError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
