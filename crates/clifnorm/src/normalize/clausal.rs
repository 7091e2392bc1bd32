//! Conjunctive normal form of a quantifier-free matrix

use crate::error::{NormalizeError, Result};
use crate::logic::{Connective, Term};
use crate::normalize::negation::push_complete;

/// Distribute `a` over the connective `b`.
///
/// `distribute(D, (A & B))` is `((D | A) & (D | B))`; a disjunction `b`
/// gives the dual shape. `a` always comes first in the new children.
pub fn distribute(a: &Term, b: &Term) -> Result<Term> {
    let (kind, terms) = match b {
        Term::Connective(kind, terms) => (*kind, terms),
        other => {
            return Err(NormalizeError::TypeMismatch(format!(
                "cannot distribute {} over {}, which is not a connective",
                a, other
            )))
        }
    };
    let outer = kind.dual();
    let children = terms
        .iter()
        .map(|t| Term::connective(outer, vec![a.clone(), t.clone()]))
        .collect::<Result<Vec<_>>>()?;
    Term::connective(kind, children)
}

/// Convert to conjunctive normal form.
///
/// Quantifiers are only allowed around the matrix: `to_onf` of a quantifier
/// converts its body, while a quantifier below a connective is a
/// [`NormalizeError::MalformedTerm`].
pub fn to_onf(term: &Term) -> Result<Term> {
    match term {
        Term::Predicate(_) => Ok(term.clone()),
        Term::Not(inner) if inner.is_predicate() => Ok(term.clone()),
        Term::Not(_) => to_onf(&push_complete(term)?),
        Term::Quantified(kind, vars, body) => {
            Ok(Term::Quantified(*kind, vars.clone(), Box::new(to_onf(body)?)))
        }
        Term::Connective(Connective::And, terms) => {
            let children = terms.iter().map(matrix_child).collect::<Result<Vec<_>>>()?;
            Term::conjunction(children)
        }
        Term::Connective(Connective::Or, terms) => {
            let children = terms.iter().map(matrix_child).collect::<Result<Vec<_>>>()?;
            disjunction_to_onf(children)
        }
    }
}

fn matrix_child(term: &Term) -> Result<Term> {
    if term.is_quantifier() {
        return Err(NormalizeError::MalformedTerm(format!(
            "quantifier {} inside the matrix",
            term
        )));
    }
    to_onf(term)
}

/// Distribute normalized disjuncts until no conjunction is left among them
fn disjunction_to_onf(children: Vec<Term>) -> Result<Term> {
    let mut disjuncts = match Term::disjunction(children)? {
        Term::Connective(Connective::Or, terms) => terms,
        single => return Ok(single),
    };

    loop {
        let first_conjunction = disjuncts.iter().position(Term::is_conjunction);
        let conjunction = match first_conjunction {
            Some(i) => i,
            None => return Term::disjunction(disjuncts),
        };
        let partner = if conjunction == 0 { 1 } else { 0 };

        let distributed = distribute(&disjuncts[partner], &disjuncts[conjunction])?;
        let rest: Vec<Term> = disjuncts
            .into_iter()
            .enumerate()
            .filter(|(i, _)| *i != conjunction && *i != partner)
            .map(|(_, t)| t)
            .collect();

        if rest.is_empty() {
            return to_onf(&distributed);
        }
        let mut folded = Vec::with_capacity(rest.len() + 1);
        folded.push(distributed);
        folded.extend(rest);
        disjuncts = folded;
    }
}
