//! `{param}` URL templates

/// Collect placeholder names in order of appearance.
///
/// Fails on an unterminated `{`, an empty `{}` or a nested `{`.
pub fn placeholders(template: &str) -> Result<Vec<&str>, String> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        if rest[..open].contains('}') {
            return Err(format!("unbalanced '}}' in '{}'", template));
        }
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| format!("unterminated placeholder in '{}'", template))?;
        let name = &after[..close];
        if name.is_empty() {
            return Err(format!("empty placeholder in '{}'", template));
        }
        if name.contains('{') {
            return Err(format!("nested placeholder in '{}'", template));
        }
        names.push(name);
        rest = &after[close + 1..];
    }
    if rest.contains('}') {
        return Err(format!("unbalanced '}}' in '{}'", template));
    }
    Ok(names)
}

/// Substitute placeholders using `lookup`, percent-encoding each value.
///
/// Returns the name of the first placeholder `lookup` cannot satisfy.
pub fn render<'a, F>(template: &str, lookup: F) -> Result<String, String>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            // validated at registration; keep the literal text
            out.push_str(&rest[open..]);
            return Ok(out);
        };
        let name = &after[..close];
        let value = lookup(name).ok_or_else(|| name.to_string())?;
        out.push_str(&urlencoding::encode(value));
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_names_in_order() {
        assert_eq!(
            placeholders("https://x/api/{a}/sub/{b}").unwrap(),
            vec!["a", "b"]
        );
        assert!(placeholders("https://x/api/licitaciones").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_templates() {
        assert!(placeholders("https://x/{a").is_err());
        assert!(placeholders("https://x/{}").is_err());
        assert!(placeholders("https://x/a}").is_err());
        assert!(placeholders("https://x/{a{b}}").is_err());
    }

    #[test]
    fn renders_and_encodes() {
        let url = render("https://x/api/{id}/estado", |n| (n == "id").then_some("42")).unwrap();
        assert_eq!(url, "https://x/api/42/estado");

        let url = render("https://x/api/{id}", |_| Some("a b/c")).unwrap();
        assert_eq!(url, "https://x/api/a%20b%2Fc");
    }

    #[test]
    fn reports_missing_parameter() {
        let err = render("https://x/api/{id}", |_| None).unwrap_err();
        assert_eq!(err, "id");
    }
}
