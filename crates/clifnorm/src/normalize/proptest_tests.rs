//! Property-based tests for the normalization passes using proptest.

use proptest::prelude::*;

use super::{is_standardized, push_complete, standardize_variables, to_onf, to_pcnf};
use crate::config::NormalizerConfig;
use crate::logic::{is_ff_pcnf, is_in_normal_form, negate, Arg, Connective, Quantifier, Term};

/// Sentence description, built into a [`Term`] after generation
#[derive(Debug, Clone)]
enum SentenceDesc {
    Atom(u8, u8), // Predicate index 0-3, variable index 0-3
    Not(Box<SentenceDesc>),
    And(Vec<SentenceDesc>),
    Or(Vec<SentenceDesc>),
    Forall(u8, Box<SentenceDesc>),
    Exists(u8, Box<SentenceDesc>),
}

fn arb_matrix_desc(max_depth: u32) -> BoxedStrategy<SentenceDesc> {
    let atom = (0..4u8, 0..4u8).prop_map(|(p, v)| SentenceDesc::Atom(p, v));
    if max_depth == 0 {
        atom.boxed()
    } else {
        let inner = || proptest::collection::vec(arb_matrix_desc(max_depth - 1), 2..=3);
        prop_oneof![
            3 => atom,
            1 => arb_matrix_desc(max_depth - 1).prop_map(|d| SentenceDesc::Not(Box::new(d))),
            2 => inner().prop_map(SentenceDesc::And),
            2 => inner().prop_map(SentenceDesc::Or),
        ]
        .boxed()
    }
}

fn arb_sentence_desc(max_depth: u32) -> BoxedStrategy<SentenceDesc> {
    let atom = (0..4u8, 0..4u8).prop_map(|(p, v)| SentenceDesc::Atom(p, v));
    if max_depth == 0 {
        atom.boxed()
    } else {
        let sub = || arb_sentence_desc(max_depth - 1);
        prop_oneof![
            3 => atom,
            1 => sub().prop_map(|d| SentenceDesc::Not(Box::new(d))),
            2 => proptest::collection::vec(sub(), 2..=3).prop_map(SentenceDesc::And),
            2 => proptest::collection::vec(sub(), 2..=3).prop_map(SentenceDesc::Or),
            2 => (0..4u8, sub()).prop_map(|(v, d)| SentenceDesc::Forall(v, Box::new(d))),
            2 => (0..4u8, sub()).prop_map(|(v, d)| SentenceDesc::Exists(v, Box::new(d))),
        ]
        .boxed()
    }
}

fn build(desc: &SentenceDesc) -> Term {
    match desc {
        SentenceDesc::Atom(p, v) => {
            Term::predicate(&format!("P{}", p), vec![Arg::var(format!("x{}", v))])
        }
        SentenceDesc::Not(inner) => negate(build(inner)),
        SentenceDesc::And(terms) => {
            Term::connective(Connective::And, terms.iter().map(build).collect()).unwrap()
        }
        SentenceDesc::Or(terms) => {
            Term::connective(Connective::Or, terms.iter().map(build).collect()).unwrap()
        }
        SentenceDesc::Forall(v, body) => Term::forall(vec![format!("x{}", v)], build(body)),
        SentenceDesc::Exists(v, body) => Term::exists(vec![format!("x{}", v)], build(body)),
    }
}

/// Close a sentence over all four variable names
fn close(term: Term) -> Term {
    Term::quantified(Quantifier::Forall, (0..4).map(|v| format!("x{}", v)).collect(), term)
}

/// Truth value of a quantifier-free sentence; `assignment` bit `4p + v`
/// is the value of `Pp(xv)`
fn eval(term: &Term, assignment: u16) -> bool {
    match term {
        Term::Predicate(p) => {
            let pred: u16 = p.name[1..].parse().unwrap();
            let var: u16 = p.variables()[0][1..].parse().unwrap();
            assignment & (1 << (4 * pred + var)) != 0
        }
        Term::Not(inner) => !eval(inner, assignment),
        Term::Connective(Connective::And, terms) => terms.iter().all(|t| eval(t, assignment)),
        Term::Connective(Connective::Or, terms) => terms.iter().any(|t| eval(t, assignment)),
        Term::Quantified(..) => panic!("quantifier in a propositional test"),
    }
}

/// Truth value over the two-element domain `{0, 1}`; `interpretation` bit
/// `2p + d` is the value of `Pp(d)`
fn eval_closed(term: &Term, interpretation: u8, env: &mut Vec<(String, u8)>) -> bool {
    match term {
        Term::Predicate(p) => {
            let pred: u8 = p.name[1..].parse().unwrap();
            let var = p.variables()[0];
            let (_, value) = env.iter().rev().find(|(name, _)| name == var).unwrap();
            interpretation & (1 << (2 * pred + value)) != 0
        }
        Term::Not(inner) => !eval_closed(inner, interpretation, env),
        Term::Connective(Connective::And, terms) => {
            terms.iter().all(|t| eval_closed(t, interpretation, env))
        }
        Term::Connective(Connective::Or, terms) => {
            terms.iter().any(|t| eval_closed(t, interpretation, env))
        }
        Term::Quantified(kind, vars, body) => eval_block(*kind, vars, body, interpretation, env),
    }
}

fn eval_block(
    kind: Quantifier,
    vars: &[String],
    body: &Term,
    interpretation: u8,
    env: &mut Vec<(String, u8)>,
) -> bool {
    let (var, rest) = match vars.split_first() {
        Some(split) => split,
        None => return eval_closed(body, interpretation, env),
    };
    let mut values = (0..2u8).map(|value| {
        env.push((var.clone(), value));
        let result = eval_block(kind, rest, body, interpretation, env);
        env.pop();
        result
    });
    match kind {
        Quantifier::Forall => values.all(|r| r),
        Quantifier::Exists => values.any(|r| r),
    }
}

fn normalize_closed(t: &Term) -> Term {
    let standardized = standardize_variables(t, &NormalizerConfig::default()).unwrap();
    let pushed = push_complete(&standardized).unwrap();
    to_pcnf(&pushed).unwrap()
}

fn normal_everywhere(term: &Term) -> bool {
    is_in_normal_form(term)
        && match term {
            Term::Connective(_, terms) => terms.iter().all(normal_everywhere),
            Term::Quantified(_, _, body) => normal_everywhere(body),
            _ => true,
        }
}

// =========================================================================
// Negation pushing
// =========================================================================

proptest! {
    /// Double negation disappears: push(~~t) = push(t)
    #[test]
    fn double_negation_elimination(desc in arb_sentence_desc(3)) {
        let t = build(&desc);
        let twice = push_complete(&negate(negate(t.clone()))).unwrap();
        prop_assert_eq!(twice, push_complete(&t).unwrap());
    }

    /// Pushing negations keeps the truth value
    #[test]
    fn negation_pushing_preserves_truth(desc in arb_matrix_desc(3), assignment in any::<u16>()) {
        let t = build(&desc);
        let pushed = push_complete(&t).unwrap();
        prop_assert_eq!(eval(&t, assignment), eval(&pushed, assignment));
    }
}

// =========================================================================
// Clausal normal form
// =========================================================================

proptest! {
    /// Every node of to_onf(t) is in normal form
    #[test]
    fn to_onf_is_normal(desc in arb_matrix_desc(3)) {
        let cnf = to_onf(&build(&desc)).unwrap();
        prop_assert!(normal_everywhere(&cnf), "not in normal form: {}", cnf);
    }

    /// to_onf keeps the truth value under every assignment
    #[test]
    fn to_onf_preserves_truth(desc in arb_matrix_desc(3), assignment in any::<u16>()) {
        let t = build(&desc);
        let cnf = to_onf(&t).unwrap();
        prop_assert_eq!(eval(&t, assignment), eval(&cnf, assignment));
    }
}

// =========================================================================
// Standardization and prenexing
// =========================================================================

proptest! {
    /// One distinct name per binding
    #[test]
    fn standardization_gives_unique_names(desc in arb_sentence_desc(3)) {
        let t = close(build(&desc));
        let result = standardize_variables(&t, &NormalizerConfig::default()).unwrap();
        prop_assert!(is_standardized(&result));
        prop_assert_eq!(result.bound_variables().len(), t.bound_variables().len());
        prop_assert!(result.free_variables().is_empty());
    }

    /// Standardized sentences in negation normal form reach FF-PCNF
    #[test]
    fn standardized_sentences_reach_pcnf(desc in arb_sentence_desc(3)) {
        let t = close(build(&desc));
        let pcnf = normalize_closed(&t);
        prop_assert!(is_ff_pcnf(&pcnf), "not in FF-PCNF: {}", pcnf);
        prop_assert!(pcnf.free_variables().is_empty());
    }

    /// Without quantifiers to_pcnf only converts the matrix, keeping its truth value
    #[test]
    fn to_pcnf_preserves_truth_without_quantifiers(
        desc in arb_matrix_desc(3),
        assignment in any::<u16>(),
    ) {
        let t = build(&desc);
        let pcnf = to_pcnf(&t).unwrap();
        prop_assert!(is_ff_pcnf(&pcnf), "not in FF-PCNF: {}", pcnf);
        prop_assert_eq!(eval(&t, assignment), eval(&pcnf, assignment));
    }

    /// The normalized sentence is true in the same two-element models
    #[test]
    fn normalization_preserves_truth_over_two_elements(
        desc in arb_sentence_desc(3),
        interpretation in any::<u8>(),
    ) {
        let t = close(build(&desc));
        prop_assume!(t.bound_variables().len() <= 10);
        let pcnf = normalize_closed(&t);
        prop_assert_eq!(
            eval_closed(&t, interpretation, &mut Vec::new()),
            eval_closed(&pcnf, interpretation, &mut Vec::new()),
            "{} and {} disagree", t, pcnf
        );
    }
}

// =========================================================================
// Regressions
// =========================================================================

#[test]
fn merged_existentials_with_nested_universal_reach_pcnf() {
    // ∃x0[∀x0[P0(x0)]] & ∃x0[P0(x0)], closed over x0..x3
    let desc = SentenceDesc::And(vec![
        SentenceDesc::Exists(
            0,
            Box::new(SentenceDesc::Forall(0, Box::new(SentenceDesc::Atom(0, 0)))),
        ),
        SentenceDesc::Exists(0, Box::new(SentenceDesc::Atom(0, 0))),
    ]);
    let t = close(build(&desc));
    let pcnf = normalize_closed(&t);
    assert!(is_ff_pcnf(&pcnf), "not in FF-PCNF: {}", pcnf);
    for interpretation in 0..=u8::MAX {
        assert_eq!(
            eval_closed(&t, interpretation, &mut Vec::new()),
            eval_closed(&pcnf, interpretation, &mut Vec::new())
        );
    }
}
