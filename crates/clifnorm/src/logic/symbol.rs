//! Symbol-name substitution
//!
//! CLIF allows names such as `<` or `part-of=` that are illegal as OWL or
//! TPTP identifiers. Predicate and function names are passed through a fixed
//! character table when they are built.

/// Characters replaced in symbol names, with their replacement text.
pub const SYMBOL_SUBSTITUTIONS: &[(char, &str)] = &[
    ('<', "lt"),
    ('>', "gt"),
    ('=', "eq"),
    ('+', "plus"),
    ('*', "times"),
    ('/', "div"),
    ('\\', "bslash"),
    ('&', "and"),
    ('|', "or"),
    ('~', "not"),
    ('!', "bang"),
    ('?', "q"),
    ('#', "hash"),
    ('@', "at"),
    ('$', "dollar"),
    ('%', "pct"),
    ('^', "caret"),
    ('\'', ""),
    ('"', ""),
];

fn substitution(c: char) -> Option<&'static str> {
    SYMBOL_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Apply the substitution table to a symbol name.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match substitution(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}
