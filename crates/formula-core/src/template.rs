//! `{{name}}` placeholder substitution.
//!
//! Rendering happens before anything is resolved: the resolver only ever sees
//! finished strings.

use std::collections::HashMap;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("no value for template variable `{0}`")]
    UnknownVariable(String),
    #[error("unterminated placeholder at byte {0}")]
    Unterminated(usize),
}

/// Replace every `{{name}}` in `template` with `vars[name]`.
///
/// Whitespace inside the braces is ignored (`{{ version }}` works). A
/// placeholder without a value is an error rather than being left in place.
pub fn render(template: &str, vars: &HashMap<&str, &str>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0usize;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or(TemplateError::Unterminated(offset + start))?;
        let name = after[..end].trim();
        let value = vars
            .get(name)
            .ok_or_else(|| TemplateError::UnknownVariable(name.to_string()))?;
        out.push_str(value);

        let consumed = start + 2 + end + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn substitutes_all_occurrences() {
        let v = vars(&[("version", "1.2.3")]);
        let out = render("download/{{version}}/x-{{version}}.tar.gz", &v).unwrap();
        assert_eq!(out, "download/1.2.3/x-1.2.3.tar.gz");
    }

    #[test]
    fn whitespace_inside_braces() {
        let v = vars(&[("os", "linux")]);
        assert_eq!(render("{{ os }}-x", &v).unwrap(), "linux-x");
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let v = vars(&[]);
        assert_eq!(render("plain { text }", &v).unwrap(), "plain { text }");
    }

    #[test]
    fn missing_variable_is_an_error() {
        let v = vars(&[("version", "1.0.0")]);
        assert_eq!(
            render("{{version}}/{{sha256_macos_arm}}", &v),
            Err(TemplateError::UnknownVariable("sha256_macos_arm".to_string()))
        );
    }

    #[test]
    fn unterminated_placeholder() {
        let v = vars(&[("a", "1")]);
        assert_eq!(render("ok {{a}} then {{b", &v), Err(TemplateError::Unterminated(14)));
    }
}
