//! Function elimination
//!
//! Every function application inside a predicate is replaced by a fresh
//! variable `v` together with a defining predicate `f(args, v)`. For a
//! predicate occurrence `L` whose functions produced the definitions `D`, the
//! occurrence becomes
//!
//! ```text
//! ∀(v1..vk)[(~D | L)]
//! ```
//!
//! i.e. `D → L`: whenever the fresh variables are the values of the
//! functions, the rewritten literal holds. `L` keeps the occurrence's
//! negation, and `D` is a conjunction when more than one function was
//! replaced. The negation in front of `D` is left for the negation pass.

use std::collections::HashSet;

use crate::error::Result;
use crate::logic::{negate, Arg, Connective, Predicate, Quantifier, Term};

/// Supply of fresh variable names.
///
/// Names are the lowercased first letter of the function followed by a
/// counter value (`f1`, `g2`, ...). Names handed out before, or registered
/// as taken, are never returned.
#[derive(Debug, Clone, Default)]
pub struct FreshVariables {
    counter: usize,
    taken: HashSet<String>,
}

impl FreshVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// A supply that never collides with `names`
    pub fn avoiding<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FreshVariables {
            counter: 0,
            taken: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Register more names to avoid
    pub fn reserve<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.taken.extend(names.into_iter().map(Into::into));
    }

    /// Next fresh name for a value of `function_name`
    pub fn next_for(&mut self, function_name: &str) -> String {
        let prefix: String = match function_name.chars().next() {
            Some(c) if c.is_alphabetic() => c.to_lowercase().collect(),
            _ => "v".to_string(),
        };
        loop {
            self.counter += 1;
            let name = format!("{}{}", prefix, self.counter);
            if self.taken.insert(name.clone()) {
                return name;
            }
        }
    }

    /// Number of names generated so far, skipped collisions included
    pub fn counter(&self) -> usize {
        self.counter
    }
}

/// Replace all function applications in a sentence
pub fn substitute_functions(term: &Term, fresh: &mut FreshVariables) -> Result<Term> {
    match term {
        Term::Predicate(p) if p.has_functions() => Ok(eliminate(p, true, fresh)),
        Term::Predicate(_) => Ok(term.clone()),
        Term::Not(inner) => match inner.as_ref() {
            Term::Predicate(p) if p.has_functions() => Ok(eliminate(p, false, fresh)),
            other => Ok(negate(substitute_functions(other, fresh)?)),
        },
        Term::Connective(kind, terms) => {
            let children = terms
                .iter()
                .map(|t| substitute_functions(t, fresh))
                .collect::<Result<Vec<_>>>()?;
            Term::connective(*kind, children)
        }
        Term::Quantified(kind, vars, body) => Ok(Term::Quantified(
            *kind,
            vars.clone(),
            Box::new(substitute_functions(body, fresh)?),
        )),
    }
}

fn eliminate(predicate: &Predicate, positive: bool, fresh: &mut FreshVariables) -> Term {
    let mut definitions = Vec::new();
    let mut fresh_vars = Vec::new();

    let args = predicate
        .args
        .iter()
        .map(|arg| replace_arg(arg, fresh, &mut definitions, &mut fresh_vars))
        .collect();
    let rewritten = Term::Predicate(Predicate {
        name: predicate.name.clone(),
        args,
    });
    let literal = if positive { rewritten } else { negate(rewritten) };

    let definition = if definitions.len() == 1 {
        definitions.remove(0)
    } else {
        Term::Connective(Connective::And, definitions)
    };

    log::debug!(
        "Eliminated functions of {} with fresh variables {:?}",
        predicate,
        fresh_vars
    );

    Term::Quantified(
        Quantifier::Forall,
        fresh_vars,
        Box::new(Term::Connective(Connective::Or, vec![negate(definition), literal])),
    )
}

/// Depth-first: arguments of a function are replaced before the function
fn replace_arg(
    arg: &Arg,
    fresh: &mut FreshVariables,
    definitions: &mut Vec<Term>,
    fresh_vars: &mut Vec<String>,
) -> Arg {
    match arg {
        Arg::Variable(_) => arg.clone(),
        Arg::Function(func) => {
            let mut args: Vec<Arg> = func
                .args
                .iter()
                .map(|a| replace_arg(a, fresh, definitions, fresh_vars))
                .collect();
            let value = fresh.next_for(&func.name);
            args.push(Arg::Variable(value.clone()));
            definitions.push(Term::Predicate(Predicate {
                name: func.name.clone(),
                args,
            }));
            fresh_vars.push(value.clone());
            Arg::Variable(value)
        }
    }
}
