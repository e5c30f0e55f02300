//! Template engine: variable extraction, value synchronization and rendering.
//!
//! Everything here is pure. Templates are scanned twice with two patterns:
//! a lenient one that captures anything between `{{` and `}}` (used to report
//! malformed tokens) and a strict one that only matches well-formed variable
//! tokens (used for substitution).

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Any double-brace token, valid or not
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\{\{\s*([^}]*)\s*\}\}").unwrap();

    /// Only tokens whose body is a variable name
    static ref VARIABLE_PATTERN: Regex =
        Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}\}").unwrap();

    static ref VARIABLE_NAME: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

/// Variable name to value binding used at render time
pub type ValueMap = HashMap<String, String>;

/// Variables found in a template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Unique valid variable names, in order of first appearance
    pub vars: Vec<String>,

    /// Unique malformed token bodies, in order of first appearance
    pub invalid: Vec<String>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.invalid.is_empty()
    }
}

/// What to print for a variable that has no usable value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    /// `[name]`
    #[default]
    Brackets,
    /// Nothing at all
    Empty,
}

impl PlaceholderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceholderStyle::Brackets => "brackets",
            PlaceholderStyle::Empty => "empty",
        }
    }

    fn placeholder(&self, name: &str) -> String {
        match self {
            PlaceholderStyle::Brackets => format!("[{}]", name),
            PlaceholderStyle::Empty => String::new(),
        }
    }
}

/// Rendering options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub placeholder_style: PlaceholderStyle,
}

impl RenderOptions {
    pub fn with_style(placeholder_style: PlaceholderStyle) -> Self {
        Self { placeholder_style }
    }
}

/// Check whether `name` is usable as a variable name
pub fn is_valid_variable_name(name: &str) -> bool {
    VARIABLE_NAME.is_match(name)
}

/// Extract valid and invalid variables from a template.
///
/// Tokens are matched leniently so malformed ones can be reported. Valid
/// names are deduplicated by their trimmed form; invalid tokens are
/// deduplicated by their full text, and reported by their trimmed body (or the
/// full token when the body is blank). A `{{` without a matching `}}` is
/// neither a variable nor reported as invalid.
pub fn extract_variables(template: &str) -> Extraction {
    let mut extraction = Extraction::default();
    let mut seen_vars: HashSet<&str> = HashSet::new();
    let mut seen_invalid: HashSet<&str> = HashSet::new();

    for caps in TOKEN_PATTERN.captures_iter(template) {
        let (Some(token), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let token = token.as_str();
        let trimmed = inner.as_str().trim();

        if is_valid_variable_name(trimmed) {
            if seen_vars.insert(trimmed) {
                extraction.vars.push(trimmed.to_string());
            }
        } else if seen_invalid.insert(token) {
            let reported = if trimmed.is_empty() { token } else { trimmed };
            extraction.invalid.push(reported.to_string());
        }
    }

    extraction
}

/// Render a template, replacing every well-formed variable token.
///
/// A value is used verbatim when it has non-whitespace content; otherwise the
/// placeholder for `opts.placeholder_style` is used. Malformed tokens and all
/// other text pass through unchanged.
pub fn render_template(template: &str, values: &ValueMap, opts: RenderOptions) -> String {
    VARIABLE_PATTERN
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            match values.get(name) {
                Some(value) if !value.trim().is_empty() => value.clone(),
                _ => opts.placeholder_style.placeholder(name),
            }
        })
        .into_owned()
}

/// Reconcile a value map with the current variables.
///
/// The result has exactly one entry per distinct name in `vars`. Existing
/// values are kept, even empty ones; new names start as `""`; names no longer
/// present are dropped.
pub fn sync_values<S: AsRef<str>>(vars: &[S], prev: &ValueMap) -> ValueMap {
    vars.iter()
        .map(|name| {
            let name = name.as_ref();
            let value = prev.get(name).cloned().unwrap_or_default();
            (name.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> ValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_basic_variables() {
        let result = extract_variables("Hola {{nombre}}, bienvenido a {{empresa}}");
        assert_eq!(result.vars, vec!["nombre", "empresa"]);
        assert!(result.invalid.is_empty());
    }

    #[test]
    fn test_extract_ignores_inner_whitespace() {
        let spaced = extract_variables("Hola {{  nombre  }}, bienvenido");
        let tight = extract_variables("Hola {{nombre}}, bienvenido");
        assert_eq!(spaced.vars, vec!["nombre"]);
        assert_eq!(spaced, tight);
    }

    #[test]
    fn test_extract_deduplicates() {
        let result = extract_variables("{{nombre}} {{nombre}} {{ nombre }}");
        assert_eq!(result.vars, vec!["nombre"]);
    }

    #[test]
    fn test_extract_first_occurrence_order() {
        let result = extract_variables("{{b}} {{a}} {{c}} {{b}}");
        assert_eq!(result.vars, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_extract_underscores_and_digits() {
        let result = extract_variables("{{primer_nombre}} {{nombre_completo_2}} {{_x}}");
        assert_eq!(result.vars, vec!["primer_nombre", "nombre_completo_2", "_x"]);
        assert!(result.invalid.is_empty());
    }

    #[test]
    fn test_extract_invalid_tokens() {
        let result = extract_variables("Hola {{123variable}} y {{}} y {{!invalid}}");
        assert!(result.vars.is_empty());
        assert_eq!(result.invalid, vec!["123variable", "{{}}", "!invalid"]);
    }

    #[test]
    fn test_extract_blank_token_reports_full_text() {
        let result = extract_variables("{{   }} and {{}}");
        assert_eq!(result.invalid, vec!["{{   }}", "{{}}"]);
    }

    #[test]
    fn test_extract_invalid_dedup_uses_full_token() {
        let result = extract_variables("{{a-b}} {{a-b}} {{ a-b }}");
        assert_eq!(result.invalid, vec!["a-b", "a-b"]);
    }

    #[test]
    fn test_extract_no_tokens() {
        assert_eq!(extract_variables(""), Extraction::default());
        assert!(extract_variables("Texto simple sin variables").is_empty());
    }

    #[test]
    fn test_extract_unterminated_open_is_ignored() {
        let result = extract_variables("Hola {{nombre");
        assert!(result.is_empty());

        let result = extract_variables("{{a} b}} then {{ok}}");
        assert_eq!(result.vars, vec!["ok"]);
        assert!(result.invalid.is_empty());
    }

    #[test]
    fn test_extract_nested_brace_is_invalid() {
        let result = extract_variables("{{ {name }}");
        assert!(result.vars.is_empty());
        assert_eq!(result.invalid, vec!["{name"]);
    }

    #[test]
    fn test_extract_is_case_sensitive() {
        let result = extract_variables("{{Name}} {{name}}");
        assert_eq!(result.vars, vec!["Name", "name"]);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let template = "{{x}} {{ 1y }} {{z}} {{x}} {{}}";
        assert_eq!(extract_variables(template), extract_variables(template));
    }

    #[test]
    fn test_render_substitutes_value() {
        let result = render_template(
            "Hola {{nombre}}",
            &values(&[("nombre", "Juan")]),
            RenderOptions::default(),
        );
        assert_eq!(result, "Hola Juan");
    }

    #[test]
    fn test_render_keeps_value_untrimmed() {
        let result = render_template(
            "[{{v}}]",
            &values(&[("v", "  a b  ")]),
            RenderOptions::default(),
        );
        assert_eq!(result, "[  a b  ]");
    }

    #[test]
    fn test_render_brackets_placeholder_by_default() {
        let result = render_template("Hola {{nombre}}", &ValueMap::new(), RenderOptions::default());
        assert_eq!(result, "Hola [nombre]");
    }

    #[test]
    fn test_render_empty_placeholder() {
        let result = render_template(
            "Hola {{nombre}}",
            &ValueMap::new(),
            RenderOptions::with_style(PlaceholderStyle::Empty),
        );
        assert_eq!(result, "Hola ");
    }

    #[test]
    fn test_render_blank_value_is_missing() {
        let result = render_template(
            "Hola {{nombre}}",
            &values(&[("nombre", "   ")]),
            RenderOptions::default(),
        );
        assert_eq!(result, "Hola [nombre]");
    }

    #[test]
    fn test_render_multiple_and_spaced() {
        let result = render_template(
            "{{saludo}} {{  nombre  }}, bienvenido a {{lugar}}",
            &values(&[("saludo", "Hola"), ("nombre", "María"), ("lugar", "Madrid")]),
            RenderOptions::default(),
        );
        assert_eq!(result, "Hola María, bienvenido a Madrid");
    }

    #[test]
    fn test_render_leaves_invalid_tokens() {
        let template = "A {{123}} B {{}} C {{ok}}\n  end";
        let result = render_template(
            template,
            &values(&[("ok", "yes")]),
            RenderOptions::default(),
        );
        assert_eq!(result, "A {{123}} B {{}} C yes\n  end");
    }

    #[test]
    fn test_render_value_is_not_expanded() {
        let result = render_template(
            "{{a}}",
            &values(&[("a", "$1 {{b}}"), ("b", "nope")]),
            RenderOptions::default(),
        );
        assert_eq!(result, "$1 {{b}}");
    }

    #[test]
    fn test_sync_adds_missing_as_empty() {
        let result = sync_values(&["a", "b"], &ValueMap::new());
        assert_eq!(result, values(&[("a", ""), ("b", "")]));
    }

    #[test]
    fn test_sync_keeps_existing() {
        let result = sync_values(&["a", "b"], &values(&[("a", "valor_a"), ("c", "valor_c")]));
        assert_eq!(result, values(&[("a", "valor_a"), ("b", "")]));
    }

    #[test]
    fn test_sync_drops_removed() {
        let result = sync_values(&["a"], &values(&[("a", "x"), ("b", "y")]));
        assert_eq!(result, values(&[("a", "x")]));
        assert!(!result.contains_key("b"));
    }

    #[test]
    fn test_sync_keeps_empty_existing_value() {
        let result = sync_values(&["a"], &values(&[("a", "")]));
        assert_eq!(result, values(&[("a", "")]));
    }

    #[test]
    fn test_sync_empty_vars() {
        let result = sync_values::<&str>(&[], &values(&[("a", "valor_a")]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_sync_collapses_duplicates() {
        let result = sync_values(&["a", "a"], &ValueMap::new());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_placeholder_style_serde() {
        let style: PlaceholderStyle = serde_json::from_str("\"empty\"").unwrap();
        assert_eq!(style, PlaceholderStyle::Empty);
        assert_eq!(
            serde_json::to_string(&PlaceholderStyle::Brackets).unwrap(),
            "\"brackets\""
        );
    }
}
