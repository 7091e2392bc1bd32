//! JSON serialization types for normalized axioms

use crate::axiom::Axiom;
use crate::error::AxiomError;
use crate::logic::{split_prefix, Arg, Clause, Literal, PrefixBlock};
use serde::{Deserialize, Serialize};

/// JSON representation of a literal; arguments are variable names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralJson {
    pub polarity: bool,
    pub predicate: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl LiteralJson {
    pub fn from_literal(lit: &Literal) -> Self {
        LiteralJson {
            polarity: lit.polarity,
            predicate: lit.predicate.name.clone(),
            args: lit.predicate.args.iter().map(Arg::to_string).collect(),
        }
    }
}

/// JSON representation of a clause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseJson {
    pub literals: Vec<LiteralJson>,
}

impl ClauseJson {
    pub fn from_clause(clause: &Clause) -> Self {
        ClauseJson {
            literals: clause.literals.iter().map(LiteralJson::from_literal).collect(),
        }
    }
}

/// JSON representation of one input axiom and its outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum AxiomResultJson {
    Normalized {
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        ff_pcnf: String,
        prefix: Vec<PrefixBlock>,
        clauses: Vec<ClauseJson>,
    },
    Failed {
        stage: String,
        axiom: String,
        error: String,
    },
}

impl AxiomResultJson {
    /// Build from a normalized axiom; the clause view is empty if the axiom
    /// is not in FF-PCNF
    pub fn from_axiom(axiom: &Axiom) -> Self {
        let (prefix, _) = split_prefix(axiom.term());
        AxiomResultJson::Normalized {
            source: axiom.source().map(str::to_string),
            ff_pcnf: axiom.to_string(),
            prefix,
            clauses: axiom
                .clauses()
                .map(|clauses| clauses.iter().map(ClauseJson::from_clause).collect())
                .unwrap_or_default(),
        }
    }

    pub fn from_error(err: &AxiomError) -> Self {
        AxiomResultJson::Failed {
            stage: err.stage.to_string(),
            axiom: err.axiom.clone(),
            error: err.source.to_string(),
        }
    }

    pub fn from_result(result: &Result<Axiom, AxiomError>) -> Self {
        match result {
            Ok(axiom) => Self::from_axiom(axiom),
            Err(err) => Self::from_error(err),
        }
    }
}
