//! Sentences: the term tree every normalization pass rewrites
//!
//! A sentence is a [`Term`]: a predicate, a negation, an n-ary connective or
//! a quantifier over a list of variables. The connective and quantifier
//! variants carry their kind, so a pass can rebuild "a node of the same kind
//! with new children" by matching on [`Connective`] or [`Quantifier`].
//!
//! Connectives are flattened on construction: a conjunction built from
//! another conjunction absorbs its children instead of nesting it.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::term::{Arg, Predicate};
use crate::error::{NormalizeError, Result};

/// Connective kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connective {
    And,
    Or,
}

/// Quantifier kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantifier {
    Forall,
    Exists,
}

/// A first-order sentence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Predicate(Predicate),
    Not(Box<Term>),
    /// Conjunction or disjunction of at least two terms
    Connective(Connective, Vec<Term>),
    /// Quantifier over a non-empty list of distinct variables
    Quantified(Quantifier, Vec<String>, Box<Term>),
}

impl Connective {
    /// De Morgan dual
    pub fn dual(self) -> Connective {
        match self {
            Connective::And => Connective::Or,
            Connective::Or => Connective::And,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Connective::And => "&",
            Connective::Or => "|",
        }
    }
}

impl Quantifier {
    /// Quantifier duality: ~∀ = ∃~ and ~∃ = ∀~
    pub fn dual(self) -> Quantifier {
        match self {
            Quantifier::Forall => Quantifier::Exists,
            Quantifier::Exists => Quantifier::Forall,
        }
    }

    /// The connective this quantifier distributes over.
    ///
    /// `∀x.P ∧ ∀y.Q ≡ ∀x.(P ∧ Q[y/x])` and `∃x.P ∨ ∃y.Q ≡ ∃x.(P ∨ Q[y/x])`.
    pub fn merge_connective(self) -> Connective {
        match self {
            Quantifier::Forall => Connective::And,
            Quantifier::Exists => Connective::Or,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Quantifier::Forall => "∀",
            Quantifier::Exists => "∃",
        }
    }
}

/// Build `a & b`, flattening nested conjunctions
pub fn conjoin(a: Term, b: Term) -> Term {
    Term::connective_of_two(Connective::And, a, b)
}

/// Build `a | b`, flattening nested disjunctions
pub fn disjoin(a: Term, b: Term) -> Term {
    Term::connective_of_two(Connective::Or, a, b)
}

/// Wrap `a` in a negation. Double negations are kept.
pub fn negate(a: Term) -> Term {
    Term::Not(Box::new(a))
}

/// Normal-form check for a single node.
///
/// Connectives are only checked against their direct children, so callers
/// must apply it bottom-up.
pub fn is_in_normal_form(term: &Term) -> bool {
    match term {
        Term::Predicate(_) => true,
        Term::Not(inner) => matches!(**inner, Term::Predicate(_)),
        Term::Connective(Connective::And, terms) => terms.iter().all(|t| {
            !t.is_quantifier() && !t.is_connective(Connective::And)
        }),
        Term::Connective(Connective::Or, terms) => terms
            .iter()
            .all(|t| !t.is_quantifier() && !matches!(t, Term::Connective(..))),
        Term::Quantified(_, _, body) => is_in_normal_form(body),
    }
}

impl Term {
    /// Atomic sentence `name(args)`
    pub fn predicate(name: &str, args: Vec<Arg>) -> Term {
        Term::Predicate(Predicate::new(name, args))
    }

    /// Build a connective of the given kind.
    ///
    /// Children of the same kind are spliced in. A single remaining term is
    /// returned as is; an empty list is a malformed term.
    pub fn connective(kind: Connective, terms: Vec<Term>) -> Result<Term> {
        let mut flat = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Term::Connective(k, children) if k == kind => flat.extend(children),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Err(NormalizeError::MalformedTerm(format!(
                "{:?} connective without terms",
                kind
            ))),
            1 => Ok(flat.remove(0)),
            _ => Ok(Term::Connective(kind, flat)),
        }
    }

    fn connective_of_two(kind: Connective, a: Term, b: Term) -> Term {
        let mut flat = Vec::new();
        for term in [a, b] {
            match term {
                Term::Connective(k, children) if k == kind => flat.extend(children),
                other => flat.push(other),
            }
        }
        Term::Connective(kind, flat)
    }

    pub fn conjunction(terms: Vec<Term>) -> Result<Term> {
        Term::connective(Connective::And, terms)
    }

    pub fn disjunction(terms: Vec<Term>) -> Result<Term> {
        Term::connective(Connective::Or, terms)
    }

    /// Build a quantifier. Repeated variables are dropped; an empty variable
    /// list yields the body itself.
    pub fn quantified<S: Into<String>>(kind: Quantifier, variables: Vec<S>, body: Term) -> Term {
        let vars: IndexSet<String> = variables.into_iter().map(Into::into).collect();
        if vars.is_empty() {
            return body;
        }
        Term::Quantified(kind, vars.into_iter().collect(), Box::new(body))
    }

    pub fn forall<S: Into<String>>(variables: Vec<S>, body: Term) -> Term {
        Term::quantified(Quantifier::Forall, variables, body)
    }

    pub fn exists<S: Into<String>>(variables: Vec<S>, body: Term) -> Term {
        Term::quantified(Quantifier::Exists, variables, body)
    }

    // Accessors

    /// Predicate name, for atomic sentences
    pub fn name(&self) -> Option<&str> {
        match self {
            Term::Predicate(p) => Some(&p.name),
            _ => None,
        }
    }

    /// Predicate arguments, for atomic sentences
    pub fn args(&self) -> Option<&[Arg]> {
        match self {
            Term::Predicate(p) => Some(&p.args),
            _ => None,
        }
    }

    /// Bound variables, for quantifiers
    pub fn variables(&self) -> Option<&[String]> {
        match self {
            Term::Quantified(_, vars, _) => Some(vars),
            _ => None,
        }
    }

    /// Quantifier body or negated term
    pub fn body(&self) -> Option<&Term> {
        match self {
            Term::Quantified(_, _, body) | Term::Not(body) => Some(body),
            _ => None,
        }
    }

    /// Connective children
    pub fn terms(&self) -> Option<&[Term]> {
        match self {
            Term::Connective(_, terms) => Some(terms),
            _ => None,
        }
    }

    pub fn connective_kind(&self) -> Option<Connective> {
        match self {
            Term::Connective(kind, _) => Some(*kind),
            _ => None,
        }
    }

    pub fn quantifier_kind(&self) -> Option<Quantifier> {
        match self {
            Term::Quantified(kind, _, _) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_predicate(&self) -> bool {
        matches!(self, Term::Predicate(_))
    }

    /// A predicate or a negated predicate
    pub fn is_literal(&self) -> bool {
        match self {
            Term::Predicate(_) => true,
            Term::Not(inner) => inner.is_predicate(),
            _ => false,
        }
    }

    pub fn is_quantifier(&self) -> bool {
        matches!(self, Term::Quantified(..))
    }

    pub fn is_connective(&self, kind: Connective) -> bool {
        matches!(self, Term::Connective(k, _) if *k == kind)
    }

    pub fn is_conjunction(&self) -> bool {
        self.is_connective(Connective::And)
    }

    pub fn is_disjunction(&self) -> bool {
        self.is_connective(Connective::Or)
    }

    /// Check whether any predicate argument is a function application
    pub fn has_functions(&self) -> bool {
        match self {
            Term::Predicate(p) => p.has_functions(),
            Term::Not(inner) => inner.has_functions(),
            Term::Connective(_, terms) => terms.iter().any(Term::has_functions),
            Term::Quantified(_, _, body) => body.has_functions(),
        }
    }

    /// Variables occurring outside the scope of any quantifier binding them
    pub fn free_variables(&self) -> IndexSet<String> {
        let mut free = IndexSet::new();
        self.collect_free(&mut Vec::new(), &mut free);
        free
    }

    fn collect_free<'a>(&'a self, bound: &mut Vec<&'a str>, free: &mut IndexSet<String>) {
        match self {
            Term::Predicate(p) => {
                for var in p.variables() {
                    if !bound.contains(&var) {
                        free.insert(var.to_string());
                    }
                }
            }
            Term::Not(inner) => inner.collect_free(bound, free),
            Term::Connective(_, terms) => {
                for term in terms {
                    term.collect_free(bound, free);
                }
            }
            Term::Quantified(_, vars, body) => {
                let depth = bound.len();
                bound.extend(vars.iter().map(String::as_str));
                body.collect_free(bound, free);
                bound.truncate(depth);
            }
        }
    }

    /// Variables bound by quantifiers, in pre-order, one entry per binding
    pub fn bound_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_bound(&mut vars);
        vars
    }

    fn collect_bound(&self, vars: &mut Vec<String>) {
        match self {
            Term::Predicate(_) => {}
            Term::Not(inner) => inner.collect_bound(vars),
            Term::Connective(_, terms) => {
                for term in terms {
                    term.collect_bound(vars);
                }
            }
            Term::Quantified(_, bound, body) => {
                vars.extend(bound.iter().cloned());
                body.collect_bound(vars);
            }
        }
    }

    /// Every variable name used anywhere in the sentence, bound or free
    pub fn variable_names(&self) -> IndexSet<String> {
        let mut names: IndexSet<String> = self.bound_variables().into_iter().collect();
        self.collect_occurring(&mut names);
        names
    }

    fn collect_occurring(&self, names: &mut IndexSet<String>) {
        match self {
            Term::Predicate(p) => {
                names.extend(p.variables().into_iter().map(str::to_string));
            }
            Term::Not(inner) => inner.collect_occurring(names),
            Term::Connective(_, terms) => {
                for term in terms {
                    term.collect_occurring(names);
                }
            }
            Term::Quantified(_, _, body) => body.collect_occurring(names),
        }
    }

    /// Rename free occurrences of variables. Bindings inside the term shadow
    /// the mapping.
    pub fn rename_free(&self, mapping: &HashMap<String, String>) -> Term {
        if mapping.is_empty() {
            return self.clone();
        }
        match self {
            Term::Predicate(p) => Term::Predicate(p.map_variables(&mut |v| {
                mapping.get(v).cloned().unwrap_or_else(|| v.to_string())
            })),
            Term::Not(inner) => negate(inner.rename_free(mapping)),
            Term::Connective(kind, terms) => Term::Connective(
                *kind,
                terms.iter().map(|t| t.rename_free(mapping)).collect(),
            ),
            Term::Quantified(kind, vars, body) => {
                let inner: HashMap<String, String> = mapping
                    .iter()
                    .filter(|(from, _)| !vars.contains(from))
                    .map(|(from, to)| (from.clone(), to.clone()))
                    .collect();
                Term::Quantified(*kind, vars.clone(), Box::new(body.rename_free(&inner)))
            }
        }
    }

    /// Check the structural invariants of the tree
    pub fn validate(&self) -> Result<()> {
        match self {
            Term::Predicate(p) => {
                if p.name.is_empty() {
                    return Err(NormalizeError::MalformedTerm(
                        "predicate with an empty name".to_string(),
                    ));
                }
                Ok(())
            }
            Term::Not(inner) => inner.validate(),
            Term::Connective(kind, terms) => {
                if terms.len() < 2 {
                    return Err(NormalizeError::MalformedTerm(format!(
                        "{:?} connective with {} term(s)",
                        kind,
                        terms.len()
                    )));
                }
                if terms.iter().any(|t| t.is_connective(*kind)) {
                    return Err(NormalizeError::MalformedTerm(format!(
                        "{:?} connective directly nested in itself: {}",
                        kind, self
                    )));
                }
                terms.iter().try_for_each(Term::validate)
            }
            Term::Quantified(_, vars, body) => {
                if vars.is_empty() {
                    return Err(NormalizeError::MalformedTerm(format!(
                        "quantifier without variables: {}",
                        self
                    )));
                }
                let distinct: IndexSet<&String> = vars.iter().collect();
                if distinct.len() != vars.len() || vars.iter().any(String::is_empty) {
                    return Err(NormalizeError::MalformedTerm(format!(
                        "quantifier variables must be distinct names: {}",
                        self
                    )));
                }
                body.validate()
            }
        }
    }
}

impl From<Predicate> for Term {
    fn from(p: Predicate) -> Self {
        Term::Predicate(p)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Predicate(p) => write!(f, "{}", p),
            Term::Not(inner) => write!(f, "~{}", inner),
            Term::Connective(kind, terms) => {
                write!(f, "(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", kind.symbol())?;
                    }
                    write!(f, "{}", term)?;
                }
                write!(f, ")")
            }
            Term::Quantified(kind, vars, body) => {
                write!(f, "{}({})[{}]", kind.symbol(), vars.join(","), body)
            }
        }
    }
}
