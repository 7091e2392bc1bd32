//! Clause view of sentences in function-free prenex conjunctive normal form

use serde::{Deserialize, Serialize};
use std::fmt;

use super::formula::{Connective, Quantifier, Term};
use super::term::{Arg, Predicate};
use crate::error::{NormalizeError, Result};

/// A literal (positive or negative predicate)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: Predicate,
    pub polarity: bool, // true = positive, false = negative
}

/// A clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

/// One block of the quantifier prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixBlock {
    pub quantifier: Quantifier,
    pub variables: Vec<String>,
}

impl Literal {
    pub fn positive(predicate: Predicate) -> Self {
        Literal {
            predicate,
            polarity: true,
        }
    }

    pub fn negative(predicate: Predicate) -> Self {
        Literal {
            predicate,
            polarity: false,
        }
    }

    /// Read a literal from a predicate or negated predicate
    pub fn from_term(term: &Term) -> Option<Literal> {
        match term {
            Term::Predicate(p) => Some(Literal::positive(p.clone())),
            Term::Not(inner) => match inner.as_ref() {
                Term::Predicate(p) => Some(Literal::negative(p.clone())),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn to_term(&self) -> Term {
        let atom = Term::Predicate(self.predicate.clone());
        if self.polarity {
            atom
        } else {
            Term::Not(Box::new(atom))
        }
    }
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause { literals }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Find a literal by predicate name
    pub fn literal_named(&self, name: &str) -> Option<&Literal> {
        self.literals.iter().find(|l| l.predicate.name == name)
    }
}

/// Split the leading quantifier blocks off a sentence
pub fn split_prefix(term: &Term) -> (Vec<PrefixBlock>, &Term) {
    let mut prefix = Vec::new();
    let mut current = term;
    while let Term::Quantified(kind, vars, body) = current {
        prefix.push(PrefixBlock {
            quantifier: *kind,
            variables: vars.clone(),
        });
        current = body;
    }
    (prefix, current)
}

fn is_function_free_literal(term: &Term) -> bool {
    match Literal::from_term(term) {
        Some(lit) => lit.predicate.args.iter().all(|a| matches!(a, Arg::Variable(_))),
        None => false,
    }
}

fn is_clause_term(term: &Term) -> bool {
    match term {
        Term::Connective(Connective::Or, literals) => literals.iter().all(is_function_free_literal),
        other => is_function_free_literal(other),
    }
}

/// Recursive check of the FF-PCNF output contract: a quantifier prefix over a
/// conjunction of disjunctions of function-free literals.
pub fn is_ff_pcnf(term: &Term) -> bool {
    let (_, matrix) = split_prefix(term);
    match matrix {
        Term::Connective(Connective::And, clauses) => clauses.iter().all(is_clause_term),
        other => is_clause_term(other),
    }
}

/// Read the clauses of an FF-PCNF sentence
pub fn clauses_of(term: &Term) -> Result<Vec<Clause>> {
    if !is_ff_pcnf(term) {
        return Err(NormalizeError::MalformedTerm(format!(
            "not in function-free prenex conjunctive normal form: {}",
            term
        )));
    }
    let (_, matrix) = split_prefix(term);
    let clause_terms: Vec<&Term> = match matrix {
        Term::Connective(Connective::And, clauses) => clauses.iter().collect(),
        other => vec![other],
    };
    Ok(clause_terms
        .into_iter()
        .map(|clause| {
            let literals = match clause {
                Term::Connective(Connective::Or, lits) => {
                    lits.iter().filter_map(Literal::from_term).collect()
                }
                lit => Literal::from_term(lit).into_iter().collect(),
            };
            Clause::new(literals)
        })
        .collect())
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "~")?;
        }
        write!(f, "{}", self.predicate)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "⊥");
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}
