//! Axioms and the normalization pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::NormalizerConfig;
use crate::error::{AxiomError, Stage};
use crate::logic::{clauses_of, is_ff_pcnf, Clause, Term};
use crate::normalize::{
    push_complete, standardize_variables, substitute_functions, to_pcnf, FreshVariables,
};

/// A sentence together with the CLIF text it was read from.
///
/// Every pipeline stage returns a new axiom and keeps the source text, so
/// errors at any stage can name the original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axiom {
    term: Term,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl Axiom {
    pub fn new(term: Term) -> Self {
        Axiom { term, source: None }
    }

    pub fn with_source(term: Term, source: impl Into<String>) -> Self {
        Axiom {
            term,
            source: Some(source.into()),
        }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn into_term(self) -> Term {
        self.term
    }

    /// Text used to identify this axiom in errors
    fn label(&self) -> String {
        match &self.source {
            Some(source) => source.clone(),
            None => self.term.to_string(),
        }
    }

    fn stage<F>(&self, stage: Stage, rewrite: F) -> Result<Axiom, AxiomError>
    where
        F: FnOnce(&Term) -> crate::error::Result<Term>,
    {
        match rewrite(&self.term) {
            Ok(term) => {
                log::debug!("After {}: {}", stage, term);
                Ok(Axiom {
                    term,
                    source: self.source.clone(),
                })
            }
            Err(source) => Err(AxiomError {
                stage,
                axiom: self.label(),
                source,
            }),
        }
    }

    /// Check the structural invariants of the sentence
    pub fn validate(&self) -> Result<(), AxiomError> {
        self.term.validate().map_err(|source| AxiomError {
            stage: Stage::Validation,
            axiom: self.label(),
            source,
        })
    }

    /// Replace function applications by fresh universally quantified
    /// variables and defining predicates
    pub fn substitute_functions(&self) -> Result<Axiom, AxiomError> {
        let mut fresh = FreshVariables::avoiding(self.term.variable_names());
        self.stage(Stage::FunctionSubstitution, |t| {
            substitute_functions(t, &mut fresh)
        })
    }

    pub fn standardize_variables(&self, config: &NormalizerConfig) -> Result<Axiom, AxiomError> {
        self.stage(Stage::VariableStandardization, |t| {
            standardize_variables(t, config)
        })
    }

    pub fn push_negations(&self) -> Result<Axiom, AxiomError> {
        self.stage(Stage::NegationPushing, push_complete)
    }

    pub fn to_pcnf(&self) -> Result<Axiom, AxiomError> {
        self.stage(Stage::Prenexing, to_pcnf)
    }

    /// Run the full pipeline: function-free prenex conjunctive normal form
    pub fn to_ff_pcnf(&self, config: &NormalizerConfig) -> Result<Axiom, AxiomError> {
        log::debug!("Normalizing {}", self.label());
        self.validate()?;
        let result = self
            .substitute_functions()?
            .standardize_variables(config)?
            .push_negations()?
            .to_pcnf()?;
        log::info!("{} => {}", self.label(), result.term);
        Ok(result)
    }

    pub fn is_ff_pcnf(&self) -> bool {
        is_ff_pcnf(&self.term)
    }

    /// Clauses of an axiom in FF-PCNF
    pub fn clauses(&self) -> crate::error::Result<Vec<Clause>> {
        clauses_of(&self.term)
    }
}

impl From<Term> for Axiom {
    fn from(term: Term) -> Self {
        Axiom::new(term)
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)
    }
}
