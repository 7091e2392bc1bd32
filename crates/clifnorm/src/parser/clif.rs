//! CLIF reader
//!
//! Turns Common Logic Interchange Format text into axioms:
//!
//! ```text
//! (forall (x (y Sort)) φ)   (exists (x) φ)
//! (and φ ...)  (or φ ...)  (not φ)  (if φ ψ)  (iff φ ψ)
//! (P t ...)    t ::= x | c | (f t ...)
//! ```
//!
//! Names bound by an enclosing quantifier are variables; every other name in
//! a term position is a constant. `if` is read as `(~φ | ψ)` and `iff` as
//! `((~φ | ψ) & (~ψ | φ))`. Text wrappers (`cl-text`, `cl:text`) are
//! unwrapped, imports are recorded and comments are dropped.

use std::path::Path;

use super::sexpr::{document, skip, SExpr};
use super::ParseError;
use crate::axiom::Axiom;
use crate::logic::{conjoin, disjoin, negate, Arg, Connective, Function, Predicate, Quantifier, Term};

/// Everything read from one CLIF text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClifDocument {
    pub axioms: Vec<Axiom>,
    /// Targets of `cl-imports` statements, in order of appearance
    pub imports: Vec<String>,
}

/// Parse CLIF text
pub fn parse_clif(input: &str) -> Result<ClifDocument, ParseError> {
    let (rest, exprs) = document(input).map_err(|e| match e {
        nom::Err::Error(err) | nom::Err::Failure(err) => {
            ParseError::at(input, input.len() - err.input.len(), "invalid syntax")
        }
        nom::Err::Incomplete(_) => ParseError::at(input, input.len(), "unexpected end of input"),
    })?;
    let rest = skip(rest).map(|(r, _)| r).unwrap_or(rest);
    if !rest.is_empty() {
        let message = if rest.starts_with('(') {
            "unbalanced parenthesis"
        } else {
            "unexpected input"
        };
        return Err(ParseError::at(input, input.len() - rest.len(), message));
    }

    let mut reader = Reader {
        input,
        bound: Vec::new(),
        document: ClifDocument::default(),
    };
    for expr in &exprs {
        reader.statement(expr)?;
    }
    log::debug!(
        "Read {} axiom(s) and {} import(s)",
        reader.document.axioms.len(),
        reader.document.imports.len()
    );
    Ok(reader.document)
}

/// Parse a CLIF file
pub fn parse_clif_file(path: &Path) -> Result<ClifDocument, crate::error::ClifnormError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_clif(&content)?)
}

struct Reader<'a> {
    input: &'a str,
    /// Variables of the enclosing quantifiers, innermost last
    bound: Vec<String>,
    document: ClifDocument,
}

impl<'a> Reader<'a> {
    fn error(&self, expr: &SExpr, message: impl Into<String>) -> ParseError {
        ParseError::at(self.input, self.input.len() - expr.rest(), message)
    }

    fn statement(&mut self, expr: &SExpr) -> Result<(), ParseError> {
        let items = match expr {
            SExpr::List { items, .. } => items,
            // A bare name is a propositional sentence
            SExpr::Symbol { .. } => {
                let term = self.sentence(expr)?;
                self.document.axioms.push(Axiom::with_source(term, expr.source(self.input)));
                return Ok(());
            }
            SExpr::Quoted { .. } => {
                return Err(self.error(expr, "a quoted string is not a sentence"));
            }
        };

        match items.first().and_then(SExpr::symbol) {
            Some("cl-text") | Some("cl:text") => {
                // Optional text name before the contents
                let contents = match items.get(1) {
                    Some(SExpr::List { .. }) => &items[1..],
                    Some(_) => &items[2..],
                    None => &items[1..],
                };
                for item in contents {
                    self.statement(item)?;
                }
                Ok(())
            }
            Some("cl-imports") | Some("cl:imports") => {
                let target = items
                    .get(1)
                    .and_then(SExpr::text)
                    .ok_or_else(|| self.error(expr, "cl-imports needs a name"))?;
                self.document.imports.push(target.to_string());
                Ok(())
            }
            Some("cl-comment") | Some("cl:comment") => {
                // The comment text may annotate sentences that follow it
                for item in items.iter().skip(2) {
                    self.statement(item)?;
                }
                Ok(())
            }
            _ => {
                let term = self.sentence(expr)?;
                self.document.axioms.push(Axiom::with_source(term, expr.source(self.input)));
                Ok(())
            }
        }
    }

    fn sentence(&mut self, expr: &SExpr) -> Result<Term, ParseError> {
        let items = match expr {
            SExpr::Symbol { name, .. } => return Ok(Term::predicate(name, Vec::new())),
            SExpr::Quoted { .. } => {
                return Err(self.error(expr, "a quoted string is not a sentence"))
            }
            SExpr::List { items, .. } => items,
        };
        let (head, args) = match items.split_first() {
            Some((head, args)) => (head, args),
            None => return Err(self.error(expr, "empty sentence")),
        };
        let operator = head
            .symbol()
            .ok_or_else(|| self.error(head, "expected an operator or predicate name"))?;

        match operator {
            "forall" => self.quantified(expr, Quantifier::Forall, args),
            "exists" => self.quantified(expr, Quantifier::Exists, args),
            "and" => self.connective(expr, Connective::And, args),
            "or" => self.connective(expr, Connective::Or, args),
            "not" => {
                let [inner] = self.arguments::<1>(expr, operator, args)?;
                Ok(negate(self.sentence(inner)?))
            }
            "if" => {
                let [antecedent, consequent] = self.arguments::<2>(expr, operator, args)?;
                let antecedent = self.sentence(antecedent)?;
                let consequent = self.sentence(consequent)?;
                Ok(disjoin(negate(antecedent), consequent))
            }
            "iff" => {
                let [left, right] = self.arguments::<2>(expr, operator, args)?;
                let left = self.sentence(left)?;
                let right = self.sentence(right)?;
                Ok(conjoin(
                    disjoin(negate(left.clone()), right.clone()),
                    disjoin(negate(right), left),
                ))
            }
            name => {
                let args = args
                    .iter()
                    .map(|a| self.argument(a))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Predicate(Predicate::new(name, args)))
            }
        }
    }

    /// Exactly `N` operands of `operator`
    fn arguments<'e, const N: usize>(
        &self,
        expr: &SExpr,
        operator: &str,
        args: &'e [SExpr],
    ) -> Result<[&'e SExpr; N], ParseError> {
        let refs: Vec<&SExpr> = args.iter().collect();
        refs.try_into().map_err(|_| {
            self.error(
                expr,
                format!("'{}' takes {} operand(s), found {}", operator, N, args.len()),
            )
        })
    }

    fn quantified(
        &mut self,
        expr: &SExpr,
        kind: Quantifier,
        args: &[SExpr],
    ) -> Result<Term, ParseError> {
        let [declarations, body] = self.arguments::<2>(expr, kind_name(kind), args)?;
        let declarations = match declarations {
            SExpr::List { items, .. } if !items.is_empty() => items,
            other => return Err(self.error(other, "expected a non-empty variable list")),
        };

        let mut variables = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            let name = match declaration {
                SExpr::Symbol { name, .. } => name.as_str(),
                // Sorted variable (x Sort); the sort is dropped
                SExpr::List { items, .. } if items.len() == 2 => items[0]
                    .symbol()
                    .ok_or_else(|| self.error(declaration, "expected a variable name"))?,
                other => return Err(self.error(other, "expected a variable name")),
            };
            variables.push(name.to_string());
        }

        let depth = self.bound.len();
        self.bound.extend(variables.iter().cloned());
        let body = self.sentence(body);
        self.bound.truncate(depth);
        Ok(Term::quantified(kind, variables, body?))
    }

    fn connective(
        &mut self,
        expr: &SExpr,
        kind: Connective,
        args: &[SExpr],
    ) -> Result<Term, ParseError> {
        if args.is_empty() {
            return Err(self.error(expr, "connective without operands"));
        }
        let terms = args
            .iter()
            .map(|a| self.sentence(a))
            .collect::<Result<Vec<_>, _>>()?;
        // A single operand is read as itself
        Term::connective(kind, terms).map_err(|e| self.error(expr, e.to_string()))
    }

    fn argument(&self, expr: &SExpr) -> Result<Arg, ParseError> {
        match expr {
            SExpr::Symbol { name, .. } => {
                if self.bound.iter().rev().any(|v| v == name) {
                    Ok(Arg::Variable(name.clone()))
                } else {
                    Ok(Arg::Function(Function::constant(name)))
                }
            }
            SExpr::Quoted { text, .. } => Ok(Arg::Function(Function::constant(text))),
            SExpr::List { items, .. } => {
                let (head, args) = items
                    .split_first()
                    .ok_or_else(|| self.error(expr, "empty term"))?;
                let name = head
                    .symbol()
                    .ok_or_else(|| self.error(head, "expected a function name"))?;
                let args = args
                    .iter()
                    .map(|a| self.argument(a))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Arg::Function(Function::new(name, args)))
            }
        }
    }
}

fn kind_name(kind: Quantifier) -> &'static str {
    match kind {
        Quantifier::Forall => "forall",
        Quantifier::Exists => "exists",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(input: &str) -> Term {
        let doc = parse_clif(input).unwrap();
        assert_eq!(doc.axioms.len(), 1, "expected one axiom in {}", input);
        doc.axioms[0].term().clone()
    }

    #[test]
    fn test_parse_quantified_sentence() {
        let t = single("(forall (x y z) (or (A x) (and (B y) (C z))))");
        assert_eq!(t.to_string(), "∀(x,y,z)[(A(x) | (B(y) & C(z)))]");
    }

    #[test]
    fn test_unbound_names_are_constants() {
        let t = single("(forall (x) (Loves x (mother x) Mary))");
        assert_eq!(t.to_string(), "∀(x)[Loves(x,mother(x),Mary())]");
        assert!(t.has_functions());
    }

    #[test]
    fn test_sorted_variables() {
        let t = single("(exists ((x Person) y) (Knows x y))");
        assert_eq!(t.to_string(), "∃(x,y)[Knows(x,y)]");
    }

    #[test]
    fn test_if_and_iff() {
        let t = single("(forall (x) (if (A x) (B x)))");
        assert_eq!(t.to_string(), "∀(x)[(~A(x) | B(x))]");

        let t = single("(forall (x) (iff (A x) (B x)))");
        assert_eq!(t.to_string(), "∀(x)[((~A(x) | B(x)) & (~B(x) | A(x)))]");
    }

    #[test]
    fn test_single_operand_connective() {
        let t = single("(forall (x) (and (A x)))");
        assert_eq!(t.to_string(), "∀(x)[A(x)]");
    }

    #[test]
    fn test_symbols_are_sanitized() {
        let t = single("(forall (x y) (< x y))");
        assert_eq!(t.to_string(), "∀(x,y)[lt(x,y)]");
    }

    #[test]
    fn test_text_imports_and_comments() {
        let input = "
            (cl-text example
              (cl-imports http://example.org/base)
              (cl-comment 'a comment' (forall (x) (A x)))
              /* block */ (exists (y) (B y)))
        ";
        let doc = parse_clif(input).unwrap();
        assert_eq!(doc.imports, vec!["http://example.org/base".to_string()]);
        assert_eq!(doc.axioms.len(), 2);
        assert_eq!(doc.axioms[0].source(), Some("(forall (x) (A x))"));
        assert_eq!(doc.axioms[1].term().to_string(), "∃(y)[B(y)]");
    }

    #[test]
    fn test_errors_report_position() {
        let err = parse_clif("(forall (x) (A x)\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 1);

        let err = parse_clif("(A x)\n(not (A x) (B x))").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("'not' takes 1 operand(s)"));

        assert!(parse_clif("(forall x (A x))").is_err());
        assert!(parse_clif("(and)").is_err());
    }
}
