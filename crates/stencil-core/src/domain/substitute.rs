//! Strict placeholder substitution.
//!
//! Templates embed parameters as `{{name}}` where `name` is an identifier
//! (`[A-Za-z_][A-Za-z0-9_]*`). Substitution is strict: a recognized
//! placeholder with no resolved value is a bundle-authoring bug and fails
//! with [`DomainError::TemplateError`], so rendered output never carries a
//! leftover `{{ident}}` marker.
//!
//! Anything between braces that is *not* an identifier passes through
//! verbatim. That keeps real-world content like GitHub Actions expressions
//! (`${{ matrix.python-version }}`) or nested braces intact without an
//! escaping syntax.

use crate::domain::error::DomainError;
use crate::domain::schema::ResolvedParameters;

/// Replace every `{{ident}}` in `input` with its resolved value.
///
/// `origin` names the template file for error reporting.
pub fn substitute(
    input: &str,
    origin: &str,
    params: &ResolvedParameters,
) -> Result<String, DomainError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match parse_placeholder(after) {
            Some((name, consumed)) => match params.get(name) {
                Some(value) => {
                    out.push_str(value);
                    rest = &after[consumed..];
                }
                None => {
                    return Err(DomainError::TemplateError {
                        path: origin.to_string(),
                        placeholder: name.to_string(),
                    });
                }
            },
            // Not a placeholder: emit the braces and keep scanning.
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Try to read `ident}}` from the start of `s`. Returns the identifier and
/// the number of bytes consumed (identifier plus closing braces).
fn parse_placeholder(s: &str) -> Option<(&str, usize)> {
    let end = s.find("}}")?;
    let name = &s[..end];

    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    Some((name, end + 2))
}
