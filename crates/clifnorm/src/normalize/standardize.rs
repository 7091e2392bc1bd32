//! Variable standardization
//!
//! Gives every quantifier binding its own variable name, so later passes can
//! move quantifiers around without capturing anything.

use std::collections::{HashMap, HashSet};

use crate::config::{NormalizerConfig, UnboundPolicy, VariableNaming};
use crate::error::{NormalizeError, Result};
use crate::logic::{Predicate, Term};

const ALPHABET_SIZE: usize = 26;

/// Hands out `z`, `y`, ..., `a`, then continues per the naming policy.
///
/// Names registered as taken are skipped; under the legacy policy they still
/// count against the 26-name budget.
#[derive(Debug, Clone)]
pub struct VariableNamer {
    naming: VariableNaming,
    position: usize,
    issued: usize,
    taken: HashSet<String>,
}

impl VariableNamer {
    pub fn new(naming: VariableNaming) -> Self {
        VariableNamer {
            naming,
            position: 0,
            issued: 0,
            taken: HashSet::new(),
        }
    }

    /// A namer that never returns one of `names`
    pub fn avoiding<I, S>(naming: VariableNaming, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VariableNamer {
            taken: names.into_iter().map(Into::into).collect(),
            ..VariableNamer::new(naming)
        }
    }

    pub fn next_name(&mut self) -> Result<String> {
        loop {
            let round = self.position / ALPHABET_SIZE;
            let offset = self.position % ALPHABET_SIZE;
            if round > 0 && self.naming == VariableNaming::Legacy {
                return Err(NormalizeError::TooManyVariables {
                    limit: ALPHABET_SIZE,
                });
            }
            self.position += 1;

            let letter = (b'z' - offset as u8) as char;
            let name = if round == 0 {
                letter.to_string()
            } else {
                format!("{}{}", letter, round)
            };
            if !self.taken.contains(&name) {
                self.issued += 1;
                return Ok(name);
            }
        }
    }

    /// Number of names handed out so far
    pub fn issued(&self) -> usize {
        self.issued
    }
}

/// Rename every bound variable to a fresh name, in pre-order.
///
/// The innermost binding of a name wins. Free variables are an error under
/// [`UnboundPolicy::Strict`] and are kept with a warning otherwise; new names
/// never coincide with a kept free variable.
pub fn standardize_variables(term: &Term, config: &NormalizerConfig) -> Result<Term> {
    let mut standardizer = Standardizer {
        namer: VariableNamer::avoiding(config.variable_naming, term.free_variables()),
        policy: config.unbound_variables,
        scopes: Vec::new(),
    };
    standardizer.visit(term)
}

struct Standardizer {
    namer: VariableNamer,
    policy: UnboundPolicy,
    /// Translation frames, one per enclosing quantifier
    scopes: Vec<HashMap<String, String>>,
}

impl Standardizer {
    fn visit(&mut self, term: &Term) -> Result<Term> {
        match term {
            Term::Predicate(p) => Ok(Term::Predicate(self.rename(p)?)),
            Term::Not(inner) => Ok(Term::Not(Box::new(self.visit(inner)?))),
            Term::Connective(kind, terms) => {
                let children = terms
                    .iter()
                    .map(|t| self.visit(t))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Term::Connective(*kind, children))
            }
            Term::Quantified(kind, vars, body) => {
                let mut frame = HashMap::new();
                let mut renamed = Vec::with_capacity(vars.len());
                for var in vars {
                    let name = self.namer.next_name()?;
                    frame.insert(var.clone(), name.clone());
                    renamed.push(name);
                }
                self.scopes.push(frame);
                let body = self.visit(body);
                self.scopes.pop();
                Ok(Term::Quantified(*kind, renamed, Box::new(body?)))
            }
        }
    }

    fn rename(&self, predicate: &Predicate) -> Result<Predicate> {
        predicate.try_map_variables(&mut |var: &str| {
            if let Some(name) = self.lookup(var) {
                return Ok(name.to_string());
            }
            match self.policy {
                UnboundPolicy::Strict => Err(NormalizeError::UnboundVariable(var.to_string())),
                UnboundPolicy::Permissive => {
                    log::warn!("Variable '{}' in {} is not bound by any quantifier", var, predicate);
                    Ok(var.to_string())
                }
            }
        })
    }

    fn lookup(&self, var: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find_map(|frame| frame.get(var))
            .map(String::as_str)
    }
}

/// Check that no variable is bound twice
pub fn is_standardized(term: &Term) -> bool {
    let bound = term.bound_variables();
    let mut seen = HashSet::new();
    bound.iter().all(|v| seen.insert(v))
}
