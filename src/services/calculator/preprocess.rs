//! Textual rewriting of user input before it reaches the lexer.

/// Function names that get an explicit `*` when a digit is glued to them.
const IMPLICIT_FUNCTIONS: [&str; 8] = ["sin", "cos", "tan", "sqrt", "log", "ln", "exp", "abs"];

/// Rewrite raw input into a form ready for evaluation.
///
/// Rules run in order: strip whitespace, make implicit multiplication
/// explicit around parentheses and before the common function names, then
/// map display glyphs (`×`, `÷`, `^`, ...) to the evaluator's operators.
/// The function-name rule is a plain prefix match: `2sqrt(9)` becomes
/// `2*sqrt(9)`, but a digit glued to any other identifier is left alone here
/// and handled by the parser instead.
pub fn preprocess(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out = String::with_capacity(chars.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        out.push(c);

        let Some(&next) = chars.get(i + 1) else {
            continue;
        };

        let needs_star = match (c, next) {
            (')', d) if d.is_ascii_digit() => true,
            (')', '(') => true,
            // `log10(` and `atan2(` are calls, not products
            (d, _) if d.is_ascii_digit() && ends_identifier(&chars[..=i]) => false,
            (d, '(') if d.is_ascii_digit() => true,
            (d, _) if d.is_ascii_digit() => starts_with_function(&chars[i + 1..]),
            _ => false,
        };

        if needs_star {
            out.push('*');
        }
    }

    out.replace(['×', '·'], "*")
        .replace('÷', "/")
        .replace('−', "-")
        .replace('^', "**")
}

fn starts_with_function(rest: &[char]) -> bool {
    IMPLICIT_FUNCTIONS.iter().any(|name| {
        name.len() <= rest.len() && name.chars().zip(rest).all(|(a, &b)| a == b)
    })
}

/// Whether the digits `head` ends with belong to an identifier (`log10`)
/// rather than a number (`10`, `1e3`).
fn ends_identifier(head: &[char]) -> bool {
    let digits = head
        .iter()
        .rev()
        .take_while(|c| c.is_ascii_digit() || **c == '.')
        .count();
    let rest = &head[..head.len() - digits];

    match rest {
        [.., m, 'e' | 'E'] if m.is_ascii_digit() || *m == '.' => {
            ends_identifier(&rest[..rest.len() - 1])
        }
        [.., c] => c.is_ascii_alphabetic() || *c == '_',
        [] => false,
    }
}
