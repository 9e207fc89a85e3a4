//! Placeholder engine
//!
//! A small, explicit parser and evaluator for the template placeholder
//! syntax. Exactly three directives are supported, and they must stay
//! bit-exact for existing pattern content to keep working:
//!
//! - `{{name}}` literal substitution
//! - `{{#each name}} ... {{/each}}` iteration over an array value
//! - `{{#if name}} ... {{/if}}` conditional inclusion
//!
//! Unknown variables render their literal token; iteration over a non-array
//! value renders zero repetitions.

use serde_json::Value;
use template_model::{display_value, is_truthy, TemplateData};

/// A lexed span of template text
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(String),
    Variable(String),
    EachOpen(String),
    IfOpen(String),
    EachClose,
    IfClose,
}

/// A parsed fragment of template content
#[derive(Debug, Clone, PartialEq)]
enum Fragment {
    Literal(String),
    Variable(String),
    Each { name: String, body: Vec<Fragment> },
    If { name: String, body: Vec<Fragment> },
}

/// Failure while parsing block structure
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderError(pub String);

impl std::fmt::Display for PlaceholderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = input;
    while let Some(start) = rest.find("{{") {
        if start > 0 {
            tokens.push(Token::Literal(rest[..start].to_string()));
        }
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let inner = after[..end].trim();
                tokens.push(classify(inner));
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated token: keep it as literal text
                tokens.push(Token::Literal(rest[start..].to_string()));
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        tokens.push(Token::Literal(rest.to_string()));
    }
    tokens
}

fn classify(inner: &str) -> Token {
    if let Some(name) = inner.strip_prefix("#each ") {
        Token::EachOpen(name.trim().to_string())
    } else if let Some(name) = inner.strip_prefix("#if ") {
        Token::IfOpen(name.trim().to_string())
    } else if inner == "/each" {
        Token::EachClose
    } else if inner == "/if" {
        Token::IfClose
    } else {
        Token::Variable(inner.to_string())
    }
}

fn parse(tokens: Vec<Token>) -> Result<Vec<Fragment>, PlaceholderError> {
    // Stack of open blocks: (is_each, name, accumulated body)
    let mut stack: Vec<(bool, String, Vec<Fragment>)> = Vec::new();
    let mut current = Vec::new();

    for token in tokens {
        match token {
            Token::Literal(text) => current.push(Fragment::Literal(text)),
            Token::Variable(name) => current.push(Fragment::Variable(name)),
            Token::EachOpen(name) => {
                stack.push((true, name, std::mem::take(&mut current)));
            }
            Token::IfOpen(name) => {
                stack.push((false, name, std::mem::take(&mut current)));
            }
            Token::EachClose => match stack.pop() {
                Some((true, name, outer)) => {
                    let body = std::mem::replace(&mut current, outer);
                    current.push(Fragment::Each { name, body });
                }
                Some((false, name, _)) => {
                    return Err(PlaceholderError(format!(
                        "{{{{/each}}}} closes {{{{#if {}}}}}",
                        name
                    )));
                }
                None => {
                    return Err(PlaceholderError("unmatched {{/each}}".to_string()));
                }
            },
            Token::IfClose => match stack.pop() {
                Some((false, name, outer)) => {
                    let body = std::mem::replace(&mut current, outer);
                    current.push(Fragment::If { name, body });
                }
                Some((true, name, _)) => {
                    return Err(PlaceholderError(format!(
                        "{{{{/if}}}} closes {{{{#each {}}}}}",
                        name
                    )));
                }
                None => {
                    return Err(PlaceholderError("unmatched {{/if}}".to_string()));
                }
            },
        }
    }

    if let Some((is_each, name, _)) = stack.pop() {
        let directive = if is_each { "#each" } else { "#if" };
        return Err(PlaceholderError(format!(
            "unclosed {{{{{} {}}}}}",
            directive, name
        )));
    }
    Ok(current)
}

/// Variable resolution scope: the root data, optionally shadowed by the
/// current `{{#each}}` element.
struct Scope<'a> {
    data: &'a TemplateData,
    element: Option<&'a Value>,
}

impl<'a> Scope<'a> {
    fn root(data: &'a TemplateData) -> Self {
        Self {
            data,
            element: None,
        }
    }

    fn lookup(&self, name: &str) -> Option<&'a Value> {
        if let Some(element) = self.element {
            if name == "this" {
                return Some(element);
            }
            if let Value::Object(map) = element {
                if let Some(value) = map.get(name) {
                    return Some(value);
                }
            }
        }
        self.data.get(name)
    }
}

fn evaluate(fragments: &[Fragment], scope: &Scope<'_>, out: &mut String) {
    for fragment in fragments {
        match fragment {
            Fragment::Literal(text) => out.push_str(text),
            Fragment::Variable(name) => match scope.lookup(name) {
                Some(value) => out.push_str(&display_value(value)),
                // Unknown variable: keep the literal token
                None => out.push_str(&format!("{{{{{}}}}}", name)),
            },
            Fragment::Each { name, body } => {
                if let Some(Value::Array(items)) = scope.lookup(name) {
                    for item in items {
                        let inner = Scope {
                            data: scope.data,
                            element: Some(item),
                        };
                        evaluate(body, &inner, out);
                    }
                }
                // Non-array or absent: zero repetitions
            }
            Fragment::If { name, body } => {
                if is_truthy(scope.lookup(name)) {
                    evaluate(body, scope, out);
                }
            }
        }
    }
}

/// Substitute placeholders in `content` against `data`.
pub fn render(content: &str, data: &TemplateData) -> Result<String, PlaceholderError> {
    let fragments = parse(tokenize(content))?;
    let mut out = String::with_capacity(content.len());
    evaluate(&fragments, &Scope::root(data), &mut out);
    Ok(out)
}

/// Collect the root-scope variable names referenced by `content`,
/// including block subjects. Names inside an `{{#each}}` body resolve
/// against the iterated element, so they are not collected; block subjects
/// themselves are. Used for lint and dependency tracking.
pub fn referenced_variables(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    match parse(tokenize(content)) {
        Ok(fragments) => collect_root_references(&fragments, &mut names),
        // Malformed block structure: fall back to a flat token scan so
        // lint still has something to report against
        Err(_) => {
            for token in tokenize(content) {
                match token {
                    Token::Variable(name)
                    | Token::EachOpen(name)
                    | Token::IfOpen(name) => push_unique(&mut names, name),
                    _ => {}
                }
            }
        }
    }
    names
}

fn collect_root_references(fragments: &[Fragment], names: &mut Vec<String>) {
    for fragment in fragments {
        match fragment {
            Fragment::Literal(_) => {}
            Fragment::Variable(name) => push_unique(names, name.clone()),
            // Body names are element fields, not root variables
            Fragment::Each { name, .. } => push_unique(names, name.clone()),
            Fragment::If { name, body } => {
                push_unique(names, name.clone());
                collect_root_references(body, names);
            }
        }
    }
}

fn push_unique(names: &mut Vec<String>, name: String) {
    if name != "this" && !names.contains(&name) {
        names.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> TemplateData {
        TemplateData::new()
            .set("name", json!("Acme"))
            .set("items", json!(["a", "b"]))
            .set("flag", json!(true))
            .set("rows", json!([{"label": "X", "qty": 2}]))
    }

    #[test]
    fn test_literal_substitution() {
        assert_eq!(render("Hello {{name}}!", &data()).unwrap(), "Hello Acme!");
    }

    #[test]
    fn test_unknown_variable_keeps_token() {
        assert_eq!(render("{{missing}}", &data()).unwrap(), "{{missing}}");
    }

    #[test]
    fn test_each_iterates_in_order() {
        let out = render("{{#each items}}<li>{{this}}</li>{{/each}}", &data()).unwrap();
        assert_eq!(out, "<li>a</li><li>b</li>");
    }

    #[test]
    fn test_each_empty_array_renders_nothing() {
        let data = TemplateData::new().set("items", json!([]));
        let out = render("{{#each items}}<li>{{this}}</li>{{/each}}", &data).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_each_non_array_renders_nothing() {
        let data = TemplateData::new().set("items", json!("not-an-array"));
        let out = render("{{#each items}}x{{/each}}", &data).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_each_object_fields() {
        let out = render(
            "{{#each rows}}{{label}}: {{qty}};{{/each}}",
            &data(),
        )
        .unwrap();
        assert_eq!(out, "X: 2;");
    }

    #[test]
    fn test_if_truthy_and_falsy() {
        assert_eq!(render("{{#if flag}}yes{{/if}}", &data()).unwrap(), "yes");
        let falsy = TemplateData::new().set("flag", json!(false));
        assert_eq!(render("{{#if flag}}yes{{/if}}", &falsy).unwrap(), "");
        assert_eq!(render("{{#if absent}}yes{{/if}}", &falsy).unwrap(), "");
    }

    #[test]
    fn test_nested_blocks() {
        let data = TemplateData::new()
            .set("show", json!(true))
            .set("items", json!([1, 2]));
        let out = render(
            "{{#if show}}<ul>{{#each items}}<li>{{this}}</li>{{/each}}</ul>{{/if}}",
            &data,
        )
        .unwrap();
        assert_eq!(out, "<ul><li>1</li><li>2</li></ul>");
    }

    #[test]
    fn test_unbalanced_blocks_error() {
        assert!(render("{{#each items}}x", &data()).is_err());
        assert!(render("x{{/if}}", &data()).is_err());
        assert!(render("{{#if a}}x{{/each}}", &data()).is_err());
    }

    #[test]
    fn test_unterminated_token_is_literal() {
        assert_eq!(render("oops {{name", &data()).unwrap(), "oops {{name");
    }

    #[test]
    fn test_referenced_variables() {
        let names = referenced_variables(
            "{{greeting}} {{#each items}}{{this}}{{/each}} {{#if flag}}{{greeting}}{{/if}}",
        );
        assert_eq!(names, vec!["greeting", "items", "flag"]);
    }

    #[test]
    fn test_referenced_variables_skip_each_body_fields() {
        let names = referenced_variables(
            "{{#each metrics}}<tr><td>{{label}}</td><td>{{value}}</td></tr>{{/each}}",
        );
        assert_eq!(names, vec!["metrics"]);
    }

    #[test]
    fn test_referenced_variables_malformed_falls_back_to_flat_scan() {
        let names = referenced_variables("{{#each items}}{{label}}");
        assert_eq!(names, vec!["items", "label"]);
    }
}
