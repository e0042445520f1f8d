//! User answers: the yes/no value type, the running answer state, and the
//! small-vocabulary token parser.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A committed yes/no answer. Serialized as `1` / `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Answer {
    No,
    Yes,
}

impl Answer {
    pub fn is_yes(self) -> bool {
        self == Self::Yes
    }
}

impl From<Answer> for u8 {
    fn from(a: Answer) -> u8 {
        match a {
            Answer::No => 0,
            Answer::Yes => 1,
        }
    }
}

impl From<bool> for Answer {
    fn from(b: bool) -> Self {
        if b { Self::Yes } else { Self::No }
    }
}

impl TryFrom<u8> for Answer {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::No),
            1 => Ok(Self::Yes),
            other => Err(format!("answer must be 0 or 1, got {other}")),
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// The user's running commitments, attribute → yes/no.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerState(BTreeMap<String, Answer>);

impl AnswerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Answer> {
        self.0.get(key).copied()
    }

    pub fn is_yes(&self, key: &str) -> bool {
        self.get(key) == Some(Answer::Yes)
    }

    pub fn is_no(&self, key: &str) -> bool {
        self.get(key) == Some(Answer::No)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Record (or overwrite) an answer.
    pub fn set(&mut self, key: impl Into<String>, answer: Answer) {
        self.0.insert(key.into(), answer);
    }

    /// Record an answer only if the key has none yet.
    pub fn set_default(&mut self, key: impl Into<String>, answer: Answer) {
        self.0.entry(key.into()).or_insert(answer);
    }

    pub fn remove(&mut self, key: &str) -> Option<Answer> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Answer)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Answer)> for AnswerState {
    fn from_iter<I: IntoIterator<Item = (K, Answer)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Parse a raw answer token. `None` means "unknown", which is not an error.
///
/// Booleans map directly, numbers are yes only when they round to 1, and
/// text tokens are matched case-insensitively against a fixed vocabulary.
pub fn parse_answer(raw: &Value) -> Option<Answer> {
    match raw {
        Value::Bool(b) => Some(Answer::from(*b)),
        Value::Number(n) => {
            let x = n.as_f64()?;
            Some(Answer::from(x.round() == 1.0))
        }
        Value::String(s) => parse_token(s),
        _ => None,
    }
}

/// Text half of [`parse_answer`].
pub fn parse_token(token: &str) -> Option<Answer> {
    match token.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "oui" | "y" | "ok" => Some(Answer::Yes),
        "0" | "false" | "no" | "non" | "n" => Some(Answer::No),
        _ => None,
    }
}
