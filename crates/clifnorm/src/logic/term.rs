//! Predicates, functions and their arguments

use serde::{Deserialize, Serialize};
use std::fmt;

use super::symbol::sanitize;

/// An argument of a predicate or function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arg {
    Variable(String),
    Function(Function),
}

/// A function application. Zero-argument functions are constants.
///
/// Functions only ever occur inside argument lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub args: Vec<Arg>,
}

/// An atomic sentence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    pub name: String,
    pub args: Vec<Arg>,
}

impl Arg {
    pub fn var(name: impl Into<String>) -> Self {
        Arg::Variable(name.into())
    }

    pub fn function(name: &str, args: Vec<Arg>) -> Self {
        Arg::Function(Function::new(name, args))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Arg::Function(_))
    }

    /// Variables of this argument, left to right, with repeats
    pub fn variables(&self) -> Vec<&str> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables<'a>(&'a self, vars: &mut Vec<&'a str>) {
        match self {
            Arg::Variable(name) => vars.push(name),
            Arg::Function(func) => {
                for arg in &func.args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Rewrite every variable through `rename`, keeping the structure
    pub fn map_variables<F>(&self, rename: &mut F) -> Arg
    where
        F: FnMut(&str) -> String,
    {
        match self {
            Arg::Variable(name) => Arg::Variable(rename(name)),
            Arg::Function(func) => Arg::Function(Function {
                name: func.name.clone(),
                args: func.args.iter().map(|a| a.map_variables(rename)).collect(),
            }),
        }
    }

    /// Fallible variant of [`Arg::map_variables`]
    pub fn try_map_variables<F, E>(&self, rename: &mut F) -> Result<Arg, E>
    where
        F: FnMut(&str) -> Result<String, E>,
    {
        match self {
            Arg::Variable(name) => Ok(Arg::Variable(rename(name)?)),
            Arg::Function(func) => {
                let args = func
                    .args
                    .iter()
                    .map(|a| a.try_map_variables(rename))
                    .collect::<Result<Vec<_>, E>>()?;
                Ok(Arg::Function(Function {
                    name: func.name.clone(),
                    args,
                }))
            }
        }
    }
}

impl Function {
    /// Create a function; the name goes through the symbol table
    pub fn new(name: &str, args: Vec<Arg>) -> Self {
        Function {
            name: sanitize(name),
            args,
        }
    }

    pub fn constant(name: &str) -> Self {
        Function::new(name, Vec::new())
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn is_constant(&self) -> bool {
        self.args.is_empty()
    }
}

impl Predicate {
    /// Create a predicate; the name goes through the symbol table
    pub fn new(name: &str, args: Vec<Arg>) -> Self {
        Predicate {
            name: sanitize(name),
            args,
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Check whether any argument is a function application
    pub fn has_functions(&self) -> bool {
        self.args.iter().any(Arg::is_function)
    }

    /// Variables of this predicate, left to right, with repeats
    pub fn variables(&self) -> Vec<&str> {
        let mut vars = Vec::new();
        for arg in &self.args {
            arg.collect_variables(&mut vars);
        }
        vars
    }

    pub fn map_variables<F>(&self, rename: &mut F) -> Predicate
    where
        F: FnMut(&str) -> String,
    {
        Predicate {
            name: self.name.clone(),
            args: self.args.iter().map(|a| a.map_variables(rename)).collect(),
        }
    }

    pub fn try_map_variables<F, E>(&self, rename: &mut F) -> Result<Predicate, E>
    where
        F: FnMut(&str) -> Result<String, E>,
    {
        let args = self
            .args
            .iter()
            .map(|a| a.try_map_variables(rename))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Predicate {
            name: self.name.clone(),
            args,
        })
    }
}

fn write_application(f: &mut fmt::Formatter<'_>, name: &str, args: &[Arg]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", arg)?;
    }
    write!(f, ")")
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Variable(name) => write!(f, "{}", name),
            Arg::Function(func) => write!(f, "{}", func),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_application(f, &self.name, &self.args)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_application(f, &self.name, &self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested_function() {
        let p = Predicate::new(
            "C",
            vec![Arg::var("z"), Arg::function("F", vec![Arg::var("z")])],
        );
        assert_eq!(p.to_string(), "C(z,F(z))");
        assert!(p.has_functions());
        assert_eq!(p.variables(), vec!["z", "z"]);
    }

    #[test]
    fn test_name_substitution_on_construction() {
        let p = Predicate::new("<", vec![Arg::var("x"), Arg::var("y")]);
        assert_eq!(p.name, "lt");
        assert_eq!(p.arity(), 2);
    }

    #[test]
    fn test_map_variables_reaches_function_arguments() {
        let p = Predicate::new("P", vec![Arg::function("f", vec![Arg::var("x")])]);
        let renamed = p.map_variables(&mut |v| format!("{}1", v));
        assert_eq!(renamed.to_string(), "P(f(x1))");
    }
}
