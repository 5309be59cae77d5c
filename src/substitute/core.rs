use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{PanelError, Result};

/// Named values available to `{{...}}` placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    values: Map<String, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Register any serialisable value; struct fields become `.field` accessors.
    pub fn insert_serialized<T: Serialize>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> serde_json::Result<Option<Value>> {
        let value = serde_json::to_value(value)?;
        Ok(self.insert(name, value))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for Variables {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// Replace every `{{path}}` placeholder in `text` with its value.
///
/// Text without a complete `{{...}}` pair is copied through untouched.
pub fn substitute(text: &str, vars: &Variables) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];

        match placeholder_body(after) {
            Some(body) => {
                let value = resolve(body, vars)?;
                out.push_str(&display(value));
                rest = &after[body.len() + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// The non-empty run before `}}` that contains no `}` itself.
fn placeholder_body(after: &str) -> Option<&str> {
    let close = after.find('}')?;
    if close == 0 || !after[close..].starts_with("}}") {
        return None;
    }
    Some(&after[..close])
}

fn resolve<'a>(path: &str, vars: &'a Variables) -> Result<&'a Value> {
    let first = path.chars().next().unwrap_or(' ');
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(PanelError::bad_placeholder(
            path,
            "names must start with a letter or underscore",
        ));
    }

    let head_end = path.find(['.', '[']).unwrap_or(path.len());
    let head = &path[..head_end];
    let mut current = vars.get(head).ok_or_else(|| {
        PanelError::bad_placeholder(path, format!("`{head}` is not defined"))
    })?;

    let mut accessors = &path[head_end..];
    while !accessors.is_empty() {
        let (accessor, tail) = next_accessor(accessors)
            .ok_or_else(|| PanelError::bad_placeholder(path, "malformed accessor"))?;
        current = accessor.lookup(current).ok_or_else(|| {
            PanelError::bad_placeholder(path, format!("{accessor} does not resolve"))
        })?;
        accessors = tail;
    }

    Ok(current)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accessor<'a> {
    Attribute(&'a str),
    Item(&'a str),
    Key(&'a str),
}

impl Accessor<'_> {
    fn lookup<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match (*self, value) {
            (Accessor::Attribute(name), Value::Object(map))
            | (Accessor::Key(name), Value::Object(map)) => map.get(name),
            (Accessor::Item(item), Value::Object(map)) => map.get(item),
            (Accessor::Item(item), Value::Array(items)) => {
                item.parse::<usize>().ok().and_then(|idx| items.get(idx))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Accessor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accessor::Attribute(name) => write!(f, "`.{name}`"),
            Accessor::Item(item) => write!(f, "`[{item}]`"),
            Accessor::Key(key) => write!(f, "`['{key}']`"),
        }
    }
}

fn next_accessor(input: &str) -> Option<(Accessor<'_>, &str)> {
    if let Some(tail) = input.strip_prefix('.') {
        let end = tail.find(|ch: char| !is_word_char(ch)).unwrap_or(tail.len());
        if end == 0 {
            return None;
        }
        return Some((Accessor::Attribute(&tail[..end]), &tail[end..]));
    }

    let tail = input.strip_prefix('[')?;
    let close = tail.find(']')?;
    let inner = &tail[..close];
    let rest = &tail[close + 1..];

    for quote in ['\'', '"'] {
        if let Some(key) = inner
            .strip_prefix(quote)
            .and_then(|key| key.strip_suffix(quote))
        {
            return Some((Accessor::Key(key), rest));
        }
    }

    if inner.is_empty() || !inner.chars().all(is_word_char) {
        return None;
    }
    Some((Accessor::Item(inner), rest))
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars() -> Variables {
        Variables::new()
            .with("x", "foo")
            .with("n", 99)
            .with("user", json!({ "name": "Rob", "tags": ["a", "b"] }))
    }

    #[test]
    fn replaces_simple_names() {
        assert_eq!(substitute("hello {{x}}", &vars()).unwrap(), "hello foo");
        assert_eq!(substitute("hello {{n}}", &vars()).unwrap(), "hello 99");
    }

    #[test]
    fn follows_attribute_and_index_chains() {
        let vars = vars();
        assert_eq!(substitute("{{user.name}}", &vars).unwrap(), "Rob");
        assert_eq!(substitute("{{user.tags[1]}}", &vars).unwrap(), "b");
        assert_eq!(substitute("{{user['name']}}", &vars).unwrap(), "Rob");
        assert_eq!(substitute("{{user[\"tags\"][0]}}", &vars).unwrap(), "a");
    }

    #[test]
    fn serialised_structs_expose_fields() {
        #[derive(Serialize)]
        struct Status {
            cpu: u8,
        }

        let mut vars = Variables::new();
        vars.insert_serialized("status", &Status { cpu: 42 }).unwrap();
        assert_eq!(substitute("cpu={{status.cpu}}%", &vars).unwrap(), "cpu=42%");
    }

    #[test]
    fn rejects_bad_leading_character() {
        let err = substitute("{{1abc}}", &vars()).unwrap_err();
        assert!(matches!(err, PanelError::BadPlaceholder { .. }));
    }

    #[test]
    fn rejects_unknown_names_and_paths() {
        assert!(matches!(
            substitute("{{missing}}", &vars()),
            Err(PanelError::BadPlaceholder { .. })
        ));
        assert!(matches!(
            substitute("{{user.age}}", &vars()),
            Err(PanelError::BadPlaceholder { .. })
        ));
        assert!(matches!(
            substitute("{{user.tags[7]}}", &vars()),
            Err(PanelError::BadPlaceholder { .. })
        ));
    }

    #[test]
    fn leaves_incomplete_braces_alone() {
        let vars = vars();
        assert_eq!(substitute("{{x", &vars).unwrap(), "{{x");
        assert_eq!(substitute("{{}} {x}", &vars).unwrap(), "{{}} {x}");
        assert_eq!(substitute("{{x}}{{x}}", &vars).unwrap(), "foofoo");
    }
}
