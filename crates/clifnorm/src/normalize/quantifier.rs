//! Quantifier algebra: merging, coalescing and hoisting quantifiers
//!
//! These operations move quantifiers towards the root of a sentence without
//! changing its meaning. They assume standardized variables; where a move
//! would capture a free variable anyway, they fail with
//! [`NormalizeError::InvalidScopeState`] instead of producing a wrong result.

use indexmap::IndexSet;
use std::collections::HashMap;

use crate::error::{NormalizeError, Result};
use crate::logic::{negate, Connective, Quantifier, Term};

/// Kind of the node enclosing a connective being rescoped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Conjunction,
    Disjunction,
    Universal,
    Existential,
}

impl Scope {
    /// Quantifier that goes outermost when a universal and an existential
    /// are hoisted out of the same connective
    pub fn dominant(self) -> Quantifier {
        match self {
            Scope::Conjunction | Scope::Universal => Quantifier::Forall,
            Scope::Disjunction | Scope::Existential => Quantifier::Exists,
        }
    }
}

impl From<Connective> for Scope {
    fn from(kind: Connective) -> Self {
        match kind {
            Connective::And => Scope::Conjunction,
            Connective::Or => Scope::Disjunction,
        }
    }
}

impl From<Quantifier> for Scope {
    fn from(kind: Quantifier) -> Self {
        match kind {
            Quantifier::Forall => Scope::Universal,
            Quantifier::Exists => Scope::Existential,
        }
    }
}

/// Absorb chains of directly nested quantifiers of the same kind.
///
/// `∀(x)[∀(y)[∃(z)[∃(w)[P]]]]` becomes `∀(x,y)[∃(z,w)[P]]`.
pub fn simplify(term: &Term) -> Term {
    match term {
        Term::Predicate(_) => term.clone(),
        Term::Not(inner) => negate(simplify(inner)),
        Term::Connective(kind, terms) => {
            Term::Connective(*kind, terms.iter().map(simplify).collect())
        }
        Term::Quantified(kind, vars, body) => {
            let mut merged: IndexSet<String> = vars.iter().cloned().collect();
            let mut current: &Term = body;
            while let Term::Quantified(inner_kind, inner_vars, inner_body) = current {
                if inner_kind != kind {
                    break;
                }
                merged.extend(inner_vars.iter().cloned());
                current = inner_body.as_ref();
            }
            Term::Quantified(*kind, merged.into_iter().collect(), Box::new(simplify(current)))
        }
    }
}

fn as_quantified(term: &Term) -> Result<(Quantifier, &[String], &Term)> {
    match term {
        Term::Quantified(kind, vars, body) => Ok((*kind, vars, body)),
        other => Err(NormalizeError::TypeMismatch(format!(
            "expected a quantifier, found {}",
            other
        ))),
    }
}

/// Merge two quantifiers of the same kind into one.
///
/// When one side has fewer variables, they are renamed position by position
/// onto the other side's variables and the longer list is kept. Lists of
/// equal length are concatenated. The bodies are joined with the connective
/// the quantifier distributes over:
///
/// ```text
/// ∀(x)[A(x)] . ∀(y)[B(y)]    =>  ∀(x,y)[(A(x) & B(y))]
/// ∃(x)[A(x)] . ∃(y,z)[B(y,z)] =>  ∃(y,z)[(A(y) | B(y,z))]
/// ```
pub fn coalesce(q1: &Term, q2: &Term) -> Result<Term> {
    let (kind1, vars1, body1) = as_quantified(q1)?;
    let (kind2, vars2, body2) = as_quantified(q2)?;
    if kind1 != kind2 {
        return Err(NormalizeError::TypeMismatch(format!(
            "cannot coalesce {} with {}",
            q1, q2
        )));
    }

    let (variables, first, second) = if vars1.len() < vars2.len() {
        (vars2.to_vec(), rename_onto(body1, vars1, vars2)?, body2.clone())
    } else if vars2.len() < vars1.len() {
        (vars1.to_vec(), body1.clone(), rename_onto(body2, vars2, vars1)?)
    } else {
        let union: IndexSet<String> = vars1.iter().chain(vars2).cloned().collect();
        (union.into_iter().collect(), body1.clone(), body2.clone())
    };

    for side in [q1, q2] {
        if let Some(var) = side.free_variables().iter().find(|v| variables.contains(*v)) {
            return Err(NormalizeError::InvalidScopeState(format!(
                "coalescing {} with {} would capture '{}'",
                q1, q2, var
            )));
        }
    }

    let body = Term::connective(kind1.merge_connective(), vec![first, second])?;
    Ok(Term::quantified(kind1, variables, body))
}

/// Rename `from[i]` to `onto[i]` in `body`
fn rename_onto(body: &Term, from: &[String], onto: &[String]) -> Result<Term> {
    let bound_inside = body.bound_variables();
    if let Some(target) = onto.iter().find(|v| bound_inside.contains(*v)) {
        return Err(NormalizeError::InvalidScopeState(format!(
            "renaming onto '{}' would be captured inside {}",
            target, body
        )));
    }
    let mapping: HashMap<String, String> = from
        .iter()
        .cloned()
        .zip(onto.iter().cloned())
        .collect();
    Ok(body.rename_free(&mapping))
}

/// Merge the quantifier children of a connective.
///
/// In a conjunction the universals coalesce into one universal and two or
/// more existentials are combined into one existential over all their
/// variables; a disjunction mirrors this. Each merged quantifier takes the
/// place of the first child of its kind. Other terms are returned unchanged.
pub fn coalesce_connective(term: &Term) -> Result<Term> {
    let (kind, terms) = match term {
        Term::Connective(kind, terms) => (*kind, terms),
        other => return Ok(other.clone()),
    };
    let (coalescing, concatenating) = match kind {
        Connective::And => (Quantifier::Forall, Quantifier::Exists),
        Connective::Or => (Quantifier::Exists, Quantifier::Forall),
    };

    let of_kind = |q: Quantifier| -> Vec<&Term> {
        terms
            .iter()
            .filter(|t| t.quantifier_kind() == Some(q))
            .collect()
    };
    let to_coalesce = of_kind(coalescing);
    let to_concatenate = of_kind(concatenating);

    let mut coalesced = match to_coalesce.split_first() {
        Some((first, rest)) if !rest.is_empty() => {
            let mut acc = (*first).clone();
            for q in rest {
                acc = coalesce(&acc, q)?;
            }
            Some(acc)
        }
        _ => None,
    };
    let mut concatenated = if to_concatenate.len() >= 2 {
        Some(concatenate(concatenating, kind, &to_concatenate)?)
    } else {
        None
    };

    if coalesced.is_none() && concatenated.is_none() {
        return Ok(term.clone());
    }

    let mut children = Vec::with_capacity(terms.len());
    for child in terms {
        // Merged quantifiers replace the first child of their kind
        let replacement = match child.quantifier_kind() {
            Some(q) if q == coalescing && to_coalesce.len() >= 2 => coalesced.take(),
            Some(q) if q == concatenating && to_concatenate.len() >= 2 => concatenated.take(),
            _ => Some(child.clone()),
        };
        children.extend(replacement);
    }
    Term::connective(kind, children)
}

/// Combine quantifiers by joining their variable lists
fn concatenate(kind: Quantifier, connective: Connective, quantifiers: &[&Term]) -> Result<Term> {
    let mut variables: IndexSet<String> = IndexSet::new();
    let mut bodies = Vec::with_capacity(quantifiers.len());
    for q in quantifiers {
        let (_, vars, body) = as_quantified(q)?;
        for var in vars {
            if !variables.insert(var.clone()) {
                return Err(NormalizeError::InvalidScopeState(format!(
                    "variable '{}' is bound by more than one {} child",
                    var,
                    kind.symbol()
                )));
            }
        }
        bodies.push(body.clone());
    }
    for q in quantifiers {
        if let Some(var) = q.free_variables().iter().find(|v| variables.contains(*v)) {
            return Err(NormalizeError::InvalidScopeState(format!(
                "merging the {} children would capture '{}'",
                kind.symbol(),
                var
            )));
        }
    }
    Ok(Term::quantified(
        kind,
        variables.into_iter().collect(),
        Term::connective(connective, bodies)?,
    ))
}

/// Pull the quantifier children of a connective out to enclose it.
///
/// With one quantifier child, `(∀(x)[A(x)] & B(y))` becomes
/// `∀(x)[(A(x) & B(y))]`. A universal and an existential child can only be
/// ordered with the enclosing `parent` scope; without it the order is
/// ambiguous. Terms other than connectives are returned unchanged.
pub fn rescope(term: &Term, parent: Option<Scope>) -> Result<Term> {
    let (kind, terms) = match term {
        Term::Connective(kind, terms) => (*kind, terms),
        other => return Ok(other.clone()),
    };
    let positions: Vec<usize> = terms
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_quantifier())
        .map(|(i, _)| i)
        .collect();

    match positions.as_slice() {
        [] => Ok(term.clone()),

        [i] => {
            let (q, vars, body) = as_quantified(&terms[*i])?;
            check_hoist(terms, &[*i])?;
            let mut children = terms.clone();
            children[*i] = body.clone();

            let inner = hoist_quantifiers(&Term::connective(kind, children)?, Some(q.into()))?;
            Ok(simplify(&Term::quantified(q, vars.to_vec(), inner)))
        }

        [i, j] if terms[*i].quantifier_kind() != terms[*j].quantifier_kind() => {
            let parent = parent.ok_or_else(|| {
                NormalizeError::AmbiguousScopeOrder(format!(
                    "ordering the quantifiers of {} needs the enclosing scope",
                    term
                ))
            })?;
            check_hoist(terms, &[*i, *j])?;

            let dominant = parent.dominant();
            let (outer, inner) = if terms[*i].quantifier_kind() == Some(dominant) {
                (*i, *j)
            } else {
                (*j, *i)
            };
            let (outer_kind, outer_vars, outer_body) = as_quantified(&terms[outer])?;
            let (inner_kind, inner_vars, inner_body) = as_quantified(&terms[inner])?;

            let mut children = terms.clone();
            children[outer] = outer_body.clone();
            children[inner] = inner_body.clone();
            let remainder =
                hoist_quantifiers(&Term::connective(kind, children)?, Some(inner_kind.into()))?;

            let nested = Term::quantified(inner_kind, inner_vars.to_vec(), remainder);
            Ok(simplify(&Term::quantified(outer_kind, outer_vars.to_vec(), nested)))
        }

        _ => Err(NormalizeError::InvalidScopeState(format!(
            "{} quantifier children left after coalescing in {}",
            positions.len(),
            term
        ))),
    }
}

/// Coalesce and rescope until no quantifier is left below a connective.
///
/// Coalescing can merge every child of a connective into one quantifier
/// whose body again has quantifier children, e.g.
/// `(∀(x)[∃(y)[R(x,y)]] & ∀(z)[P(z)])` gives `∀(x,z)[(∃(y)[R(x,y)] & P(z))]`.
/// The body of such a quantifier is settled under the quantifier's own scope.
/// Quantifier children are expected to be in prenex form already.
pub fn hoist_quantifiers(term: &Term, parent: Option<Scope>) -> Result<Term> {
    match term {
        Term::Connective(..) => match coalesce_connective(term)? {
            merged @ Term::Connective(..) => rescope(&merged, parent),
            merged => hoist_quantifiers(&merged, parent),
        },
        Term::Quantified(kind, vars, body) => {
            let body = hoist_quantifiers(body, Some((*kind).into()))?;
            Ok(simplify(&Term::Quantified(*kind, vars.clone(), Box::new(body))))
        }
        _ => Ok(term.clone()),
    }
}

/// Hoisted variables must not occur free in the siblings they will enclose
fn check_hoist(terms: &[Term], hoisted: &[usize]) -> Result<()> {
    for &h in hoisted {
        let vars = terms[h].variables().unwrap_or_default();
        for (k, sibling) in terms.iter().enumerate() {
            if k == h {
                continue;
            }
            if let Some(var) = sibling.free_variables().iter().find(|v| vars.contains(*v)) {
                return Err(NormalizeError::InvalidScopeState(format!(
                    "hoisting {} would capture '{}' in {}",
                    terms[h], var, sibling
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{conjoin, disjoin, Arg};

    fn atom(name: &str, var: &str) -> Term {
        Term::predicate(name, vec![Arg::var(var)])
    }

    #[test]
    fn test_simplify_absorbs_same_kind_chain() {
        let t = Term::forall(
            vec!["x"],
            Term::forall(
                vec!["y"],
                Term::exists(vec!["z"], Term::exists(vec!["w"], atom("P", "x"))),
            ),
        );
        assert_eq!(simplify(&t).to_string(), "∀(x,y)[∃(z,w)[P(x)]]");
    }

    #[test]
    fn test_simplify_drops_repeated_variables() {
        let t = Term::exists(vec!["x", "y"], Term::exists(vec!["y", "z"], atom("P", "y")));
        assert_eq!(simplify(&t).to_string(), "∃(x,y,z)[P(y)]");
    }

    #[test]
    fn test_coalesce_equal_lengths() {
        let q1 = Term::forall(vec!["x"], atom("A", "x"));
        let q2 = Term::forall(vec!["y"], atom("B", "y"));
        assert_eq!(coalesce(&q1, &q2).unwrap().to_string(), "∀(x,y)[(A(x) & B(y))]");
    }

    #[test]
    fn test_coalesce_renames_shorter_side() {
        let q1 = Term::exists(vec!["x"], atom("A", "x"));
        let q2 = Term::exists(
            vec!["y", "z"],
            Term::predicate("B", vec![Arg::var("y"), Arg::var("z")]),
        );
        assert_eq!(
            coalesce(&q1, &q2).unwrap().to_string(),
            "∃(y,z)[(A(y) | B(y,z))]"
        );
    }

    #[test]
    fn test_coalesce_rejects_mixed_kinds() {
        let q1 = Term::forall(vec!["x"], atom("A", "x"));
        let q2 = Term::exists(vec!["y"], atom("B", "y"));
        assert!(matches!(coalesce(&q1, &q2), Err(NormalizeError::TypeMismatch(_))));
        assert!(matches!(
            coalesce(&q1, &atom("B", "y")),
            Err(NormalizeError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_coalesce_detects_capture() {
        // y is free in the first body and bound by the second quantifier
        let q1 = Term::forall(
            vec!["x"],
            Term::predicate("A", vec![Arg::var("x"), Arg::var("y")]),
        );
        let q2 = Term::forall(vec!["y"], atom("B", "y"));
        assert!(matches!(
            coalesce(&q1, &q2),
            Err(NormalizeError::InvalidScopeState(_))
        ));
    }

    #[test]
    fn test_coalesce_connective_conjunction() {
        let t = Term::conjunction(vec![
            Term::exists(vec!["u"], atom("E", "u")),
            Term::forall(vec!["x"], atom("A", "x")),
            atom("C", "c"),
            Term::forall(vec!["y"], atom("B", "y")),
            Term::exists(vec!["v"], atom("F", "v")),
        ])
        .unwrap();
        assert_eq!(
            coalesce_connective(&t).unwrap().to_string(),
            "(∃(u,v)[(E(u) & F(v))] & ∀(x,y)[(A(x) & B(y))] & C(c))"
        );
    }

    #[test]
    fn test_coalesce_connective_disjunction_to_single_term() {
        let t = disjoin(
            Term::exists(vec!["x"], atom("A", "x")),
            Term::exists(vec!["y"], atom("B", "y")),
        );
        assert_eq!(
            coalesce_connective(&t).unwrap().to_string(),
            "∃(x,y)[(A(x) | B(y))]"
        );
    }

    #[test]
    fn test_coalesce_connective_keeps_lone_quantifiers() {
        let t = conjoin(
            Term::exists(vec!["x"], atom("A", "x")),
            Term::forall(vec!["y"], atom("B", "y")),
        );
        assert_eq!(coalesce_connective(&t).unwrap(), t);
    }

    #[test]
    fn test_rescope_single_quantifier() {
        let t = conjoin(Term::forall(vec!["x"], atom("A", "x")), atom("B", "y"));
        assert_eq!(rescope(&t, None).unwrap().to_string(), "∀(x)[(A(x) & B(y))]");
    }

    #[test]
    fn test_rescope_without_parent_is_ambiguous() {
        let t = disjoin(
            Term::exists(vec!["y"], atom("B", "y")),
            Term::forall(vec!["x"], atom("A", "x")),
        );
        assert!(matches!(
            rescope(&t, None),
            Err(NormalizeError::AmbiguousScopeOrder(_))
        ));
    }

    #[test]
    fn test_rescope_dominance_follows_parent() {
        let t = disjoin(
            Term::exists(vec!["y"], atom("B", "y")),
            Term::forall(vec!["x"], atom("A", "x")),
        );
        assert_eq!(
            rescope(&t, Some(Scope::Disjunction)).unwrap().to_string(),
            "∃(y)[∀(x)[(B(y) | A(x))]]"
        );
        assert_eq!(
            rescope(&t, Some(Scope::Universal)).unwrap().to_string(),
            "∀(x)[∃(y)[(B(y) | A(x))]]"
        );
    }

    #[test]
    fn test_rescope_nested_quantifier_body() {
        // The hoisted body is itself a quantifier of the other kind
        let t = conjoin(
            Term::forall(vec!["x"], Term::exists(vec!["y"], atom("A", "y"))),
            atom("B", "z"),
        );
        assert_eq!(
            rescope(&t, None).unwrap().to_string(),
            "∀(x)[∃(y)[(A(y) & B(z))]]"
        );
    }

    #[test]
    fn test_hoist_quantifiers_settles_merged_body() {
        // Both children coalesce into one existential whose body still holds ∀(y)
        let t = disjoin(
            Term::exists(
                vec!["z"],
                Term::forall(
                    vec!["y"],
                    Term::predicate("R", vec![Arg::var("z"), Arg::var("y")]),
                ),
            ),
            Term::exists(vec!["x"], atom("P", "x")),
        );
        assert!(coalesce_connective(&t).unwrap().is_quantifier());
        assert_eq!(
            hoist_quantifiers(&t, Some(Scope::Disjunction)).unwrap().to_string(),
            "∃(z,x)[∀(y)[(R(z,y) | P(x))]]"
        );
    }

    #[test]
    fn test_rescope_settles_hoisted_quantifier_body() {
        // The hoisted body is two universals that merge into one
        let t = conjoin(
            Term::exists(
                vec!["w"],
                conjoin(
                    Term::forall(vec!["x"], Term::exists(vec!["y"], atom("A", "y"))),
                    Term::forall(vec!["z"], atom("B", "z")),
                ),
            ),
            atom("C", "c"),
        );
        assert_eq!(
            rescope(&t, None).unwrap().to_string(),
            "∃(w)[∀(x,z)[∃(y)[(A(y) & B(z) & C(c))]]]"
        );
    }

    #[test]
    fn test_rescope_rejects_capture_and_leftovers() {
        let captured = conjoin(Term::forall(vec!["x"], atom("A", "x")), atom("B", "x"));
        assert!(matches!(
            rescope(&captured, None),
            Err(NormalizeError::InvalidScopeState(_))
        ));

        let same_kind = conjoin(
            Term::forall(vec!["x"], atom("A", "x")),
            Term::forall(vec!["y"], atom("B", "y")),
        );
        assert!(matches!(
            rescope(&same_kind, Some(Scope::Conjunction)),
            Err(NormalizeError::InvalidScopeState(_))
        ));
    }
}
