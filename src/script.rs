//! A line-oriented command language driving an [`App`] with the stash plugin.
//!
//! ```text
//! # comments and blank lines are skipped
//! set options {"foo": "bar"}
//! stash options before something
//! set options.foo "baz"; show options
//! restore options
//! ```

use thiserror::Error;

use crate::{
    host::{App, Host, HostError},
    Value,
};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: invalid JSON value: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: {source}")]
    Host {
        line: usize,
        #[source]
        source: HostError,
    },
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    Set {
        property: String,
        key: Option<String>,
        value: Value,
    },
    Stash {
        property: String,
        name: Option<String>,
    },
    Restore {
        property: String,
        name: Option<String>,
    },
    Show {
        property: String,
    },
}

/// Parse `source` into commands, each paired with its 1-based line number.
pub fn parse_script(source: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
    let mut commands = vec![];
    for (i, text) in source.lines().enumerate() {
        let line = i + 1;
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        for statement in split_statements(text) {
            if !statement.is_empty() {
                commands.push((line, parse_command(line, statement)?));
            }
        }
    }
    Ok(commands)
}

/// Run `source` against `app`, returning the values printed by `show`.
///
/// `app` is expected to carry the `stash` and `restore` operations, see
/// [`crate::plugin::install`].
pub fn run_script(app: &mut App, source: &str) -> Result<Vec<Value>, ScriptError> {
    let mut shown = vec![];
    for (line, command) in parse_script(source)? {
        log::debug!("Run line {}: {:?}", line, command);
        let host_error = |source| ScriptError::Host { line, source };
        match command {
            Command::Set {
                property,
                key: None,
                value,
            } => app.set_property(&property, value),
            Command::Set {
                property,
                key: Some(key),
                value,
            } => app.set_key(&property, &key, value).map_err(host_error)?,
            Command::Stash { property, name } => {
                invoke(app, "stash", &property, name.as_deref()).map_err(host_error)?
            }
            Command::Restore { property, name } => {
                invoke(app, "restore", &property, name.as_deref()).map_err(host_error)?
            }
            Command::Show { property } => {
                shown.push(app.property(&property).cloned().unwrap_or(Value::Null))
            }
        }
    }
    Ok(shown)
}

fn invoke(
    app: &mut App,
    operation: &str,
    property: &str,
    name: Option<&str>,
) -> Result<(), HostError> {
    match name {
        Some(name) => app.invoke(operation, &[property, name])?,
        None => app.invoke(operation, &[property])?,
    };
    Ok(())
}

fn parse_command(line: usize, statement: &str) -> Result<Command, ScriptError> {
    let parse_error = |message: String| ScriptError::Parse { line, message };
    let (word, rest) = split_word(statement);
    let (target, rest) = split_word(rest);
    if target.is_empty() {
        return Err(parse_error(format!("`{}` expects a property", word)));
    }
    let name = (!rest.is_empty()).then(|| rest.to_string());
    match word {
        "set" => {
            if rest.is_empty() {
                return Err(parse_error("`set` expects a value".to_string()));
            }
            let value = serde_json::from_str(rest)
                .map_err(|source| ScriptError::Json { line, source })?;
            let (property, key) = match target.split_once('.') {
                Some((property, key)) => (property, Some(key.to_string())),
                None => (target, None),
            };
            Ok(Command::Set {
                property: property.to_string(),
                key,
                value,
            })
        }
        "stash" => Ok(Command::Stash {
            property: target.to_string(),
            name,
        }),
        "restore" => Ok(Command::Restore {
            property: target.to_string(),
            name,
        }),
        "show" if name.is_none() => Ok(Command::Show {
            property: target.to_string(),
        }),
        "show" => Err(parse_error("`show` takes only a property".to_string())),
        _ => Err(parse_error(format!("Unknown command `{}`", word))),
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

/// Split on `;` outside of JSON string literals. Only `set` carries JSON, so
/// quotes anywhere else are plain characters.
fn split_statements(text: &str) -> Vec<&str> {
    let mut statements = vec![];
    let mut start = 0;
    let mut json = carries_json(text);
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_string => escaped = true,
            '"' if json => in_string = !in_string,
            ';' if !in_string => {
                statements.push(text[start..i].trim());
                start = i + 1;
                json = carries_json(&text[start..]);
            }
            _ => {}
        }
    }
    statements.push(text[start..].trim());
    statements
}

fn carries_json(statement: &str) -> bool {
    split_word(statement).0 == "set"
}
