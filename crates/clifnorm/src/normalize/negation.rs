//! Negation pushing
//!
//! Drives negations down to the predicates with De Morgan's laws, quantifier
//! duality and double-negation elimination.

use crate::error::{NormalizeError, Result};
use crate::logic::{negate, Connective, Quantifier, Term};

/// One rewriting step on a negation.
///
/// | negated term      | result                    |
/// |-------------------|---------------------------|
/// | `(a & b)`         | `(~a \| ~b)`              |
/// | `(a \| b)`        | `(~a & ~b)`               |
/// | `∃(x)[a]`         | `∀(x)[~a]`                |
/// | `∀(x)[a]`         | `∃(x)[~a]`                |
/// | `~a`              | `a`                       |
/// | predicate         | unchanged                 |
///
/// Terms that are not negations are returned unchanged.
pub fn push(term: Term) -> Term {
    let inner = match term {
        Term::Not(inner) => *inner,
        other => return other,
    };
    match inner {
        Term::Connective(kind, terms) => {
            Term::Connective(kind.dual(), terms.into_iter().map(negate).collect())
        }
        Term::Quantified(kind, vars, body) => {
            Term::Quantified(kind.dual(), vars, Box::new(negate(*body)))
        }
        Term::Not(double) => *double,
        atom @ Term::Predicate(_) => negate(atom),
    }
}

/// Push every negation down until it directly wraps a predicate
pub fn push_complete(term: &Term) -> Result<Term> {
    // Explicit stack so deeply nested sentences do not overflow
    enum WorkItem {
        Process(Term),
        CombineConnective(Connective, usize),
        CombineQuantified(Quantifier, Vec<String>),
    }

    let mut stack: Vec<WorkItem> = vec![WorkItem::Process(term.clone())];
    let mut results: Vec<Term> = Vec::new();

    while let Some(item) = stack.pop() {
        match item {
            WorkItem::Process(t) => match t {
                Term::Not(inner) if !inner.is_predicate() => {
                    stack.push(WorkItem::Process(push(Term::Not(inner))));
                }
                Term::Predicate(_) | Term::Not(_) => results.push(t),
                Term::Connective(kind, terms) => {
                    stack.push(WorkItem::CombineConnective(kind, terms.len()));
                    for child in terms.into_iter().rev() {
                        stack.push(WorkItem::Process(child));
                    }
                }
                Term::Quantified(kind, vars, body) => {
                    stack.push(WorkItem::CombineQuantified(kind, vars));
                    stack.push(WorkItem::Process(*body));
                }
            },

            WorkItem::CombineConnective(kind, count) => {
                if results.len() < count {
                    return Err(stack_underflow());
                }
                let children = results.split_off(results.len() - count);
                // A pushed child may now have the parent's kind; connective() absorbs it
                results.push(Term::connective(kind, children)?);
            }

            WorkItem::CombineQuantified(kind, vars) => {
                let body = results.pop().ok_or_else(stack_underflow)?;
                results.push(Term::Quantified(kind, vars, Box::new(body)));
            }
        }
    }

    results.pop().ok_or_else(stack_underflow)
}

fn stack_underflow() -> NormalizeError {
    NormalizeError::MalformedTerm("negation pushing lost track of a subterm".to_string())
}

/// Check that every negation directly wraps a predicate
pub fn is_negation_normal(term: &Term) -> bool {
    match term {
        Term::Predicate(_) => true,
        Term::Not(inner) => inner.is_predicate(),
        Term::Connective(_, terms) => terms.iter().all(is_negation_normal),
        Term::Quantified(_, _, body) => is_negation_normal(body),
    }
}
