//! Prenex conjunctive normal form

use crate::error::Result;
use crate::logic::{split_prefix, Term};
use crate::normalize::clausal::to_onf;
use crate::normalize::negation::push_complete;
use crate::normalize::quantifier::{hoist_quantifiers, simplify, Scope};

/// Move every quantifier to the front and convert the matrix to CNF.
///
/// Expects standardized variables and function-free predicates. Children are
/// processed before their parents: a quantifier's body is prenexed and then
/// the quantifier is simplified; a connective's children are prenexed, then
/// the connective is coalesced and rescoped under the enclosing scope until
/// no quantifier is left below it.
pub fn to_pcnf(term: &Term) -> Result<Term> {
    let prenex = prenex(term, None)?;
    let (prefix, matrix) = split_prefix(&prenex);
    let mut result = to_onf(matrix)?;
    for block in prefix.into_iter().rev() {
        result = Term::quantified(block.quantifier, block.variables, result);
    }
    log::trace!("Prenex normal form of {} is {}", term, result);
    Ok(result)
}

fn prenex(term: &Term, parent: Option<Scope>) -> Result<Term> {
    match term {
        Term::Predicate(_) => Ok(term.clone()),
        Term::Not(inner) if inner.is_predicate() => Ok(term.clone()),
        Term::Not(_) => prenex(&push_complete(term)?, parent),
        Term::Quantified(kind, vars, body) => {
            let body = prenex(body, Some((*kind).into()))?;
            Ok(simplify(&Term::Quantified(*kind, vars.clone(), Box::new(body))))
        }
        Term::Connective(kind, terms) => {
            let children = terms
                .iter()
                .map(|t| prenex(t, Some((*kind).into())))
                .collect::<Result<Vec<_>>>()?;
            // At the root the connective itself decides the dominant quantifier
            let scope = parent.unwrap_or_else(|| (*kind).into());
            let hoisted = hoist_quantifiers(&Term::connective(*kind, children)?, Some(scope))?;
            Ok(simplify(&hoisted))
        }
    }
}
