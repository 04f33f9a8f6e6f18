//! Caller-supplied variable values
//!
//! Seeds come either as JSON, keyed by name:
//!
//! ```json
//! { "y": [ { "line": 0, "conditions": [], "value": 2 } ],
//!   "arr": [ { "line": 0, "value": [1, 2, 3] } ] }
//! ```
//!
//! or as form text, one `name=value` pair per line (or `&`-separated), where
//! a bracketed value is a comma-separated list.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::syntax::Literal;
use crate::term::Term;
use crate::value::{format_number, parse_number};

/// A seed value: a scalar or a list of seed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedValue {
    /// `true` / `false`
    Bool(bool),
    /// Any number
    Number(f64),
    /// Any string
    Str(String),
    /// An array
    List(Vec<SeedValue>),
}

impl SeedValue {
    /// Read form text: numbers, booleans, bracketed lists, else strings.
    pub fn from_form(text: &str) -> Self {
        let text = text.trim();
        if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            if inner.trim().is_empty() {
                return SeedValue::List(Vec::new());
            }
            return SeedValue::List(inner.split(',').map(SeedValue::from_form).collect());
        }
        match text {
            "true" => SeedValue::Bool(true),
            "false" => SeedValue::Bool(false),
            _ => match parse_number(text) {
                Some(n) => SeedValue::Number(n),
                None => SeedValue::Str(text.to_string()),
            },
        }
    }

    /// The term this value stands for in substituted output.
    pub fn to_term(&self) -> Term {
        match self {
            SeedValue::Bool(b) => Term::Literal(Literal::boolean(*b)),
            SeedValue::Number(n) => Term::Literal(Literal::number(*n, format_number(*n))),
            SeedValue::Str(s) => {
                let raw = serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s));
                Term::Literal(Literal::string(s.clone(), raw))
            }
            SeedValue::List(items) => Term::Sequence(items.iter().map(SeedValue::to_term).collect()),
        }
    }
}

/// One recorded value for a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedRecord {
    /// Line the value is considered declared on; usually 0
    pub line: u32,
    /// Condition lines the value is scoped to
    #[serde(default)]
    pub conditions: Vec<u32>,
    /// The value
    pub value: SeedValue,
}

impl SeedRecord {
    /// Unscoped record at line 0.
    pub fn constant(value: SeedValue) -> Self {
        Self {
            line: 0,
            conditions: Vec::new(),
            value,
        }
    }
}

/// Seed records by name, in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seeds(IndexMap<String, Vec<SeedRecord>>);

impl Seeds {
    /// No seeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON seed format.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidSeed(e.to_string()))
    }

    /// Parse form text: `name=value` pairs separated by newlines or `&`.
    pub fn from_form(text: &str) -> Result<Self> {
        let mut seeds = Seeds::new();
        for pair in text.split(|c: char| c == '\n' || c == '&') {
            if pair.trim().is_empty() {
                continue;
            }
            seeds.insert_form(pair)?;
        }
        Ok(seeds)
    }

    /// Add one `name=value` pair as a line-0 constant.
    pub fn insert_form(&mut self, pair: &str) -> Result<()> {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::InvalidSeed(format!("expected name=value, found `{}`", pair)))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidSeed(format!("missing name in `{}`", pair)));
        }
        self.set(name, SeedValue::from_form(value));
        Ok(())
    }

    /// Add a line-0 constant for `name`.
    pub fn set(&mut self, name: impl Into<String>, value: SeedValue) {
        self.push(name, SeedRecord::constant(value));
    }

    /// Append a record for `name`.
    pub fn push(&mut self, name: impl Into<String>, record: SeedRecord) {
        self.0.entry(name.into()).or_default().push(record);
    }

    /// Append every record of `other` after this table's records.
    pub fn merge(&mut self, other: Seeds) {
        for (name, records) in other.0 {
            self.0.entry(name).or_default().extend(records);
        }
    }

    /// Records by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SeedRecord])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_conditions_default_to_empty() {
        let seeds = Seeds::from_json(r#"{"x": [{"line": 0, "value": 5}]}"#).unwrap();
        let (name, records) = seeds.iter().next().unwrap();
        assert_eq!(name, "x");
        assert_eq!(records, &[SeedRecord::constant(SeedValue::Number(5.0))]);
    }

    #[test]
    fn test_json_list_values() {
        let seeds = Seeds::from_json(r#"{"arr": [{"line": 0, "value": [5, "a", true]}]}"#).unwrap();
        let (_, records) = seeds.iter().next().unwrap();
        assert_eq!(records[0].value.to_term().to_string(), "[5,\"a\",true]");
    }

    #[test]
    fn test_form_text() {
        let seeds = Seeds::from_form("x=15\narr=[1, 2, 3]&name=bob").unwrap();
        let values: Vec<_> = seeds
            .iter()
            .map(|(n, r)| (n.to_string(), r[0].value.clone()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("x".to_string(), SeedValue::Number(15.0)),
                (
                    "arr".to_string(),
                    SeedValue::List(vec![
                        SeedValue::Number(1.0),
                        SeedValue::Number(2.0),
                        SeedValue::Number(3.0)
                    ])
                ),
                ("name".to_string(), SeedValue::Str("bob".into())),
            ]
        );
    }

    #[test]
    fn test_form_numbers_use_js_syntax() {
        assert_eq!(SeedValue::from_form("0x10"), SeedValue::Number(16.0));
        assert_eq!(SeedValue::from_form("inf"), SeedValue::Str("inf".into()));
        assert_eq!(SeedValue::from_form("-2.5"), SeedValue::Number(-2.5));
    }

    #[test]
    fn test_merge_appends_after_existing_records() {
        let mut seeds = Seeds::from_json(r#"{"y": [{"line": 0, "value": 1}]}"#).unwrap();
        seeds.merge(Seeds::from_form("y=2&z=3").unwrap());
        let records: Vec<_> = seeds
            .iter()
            .map(|(n, r)| (n.to_string(), r.iter().map(|r| r.value.clone()).collect::<Vec<_>>()))
            .collect();
        assert_eq!(
            records,
            vec![
                ("y".to_string(), vec![SeedValue::Number(1.0), SeedValue::Number(2.0)]),
                ("z".to_string(), vec![SeedValue::Number(3.0)]),
            ]
        );
    }

    #[test]
    fn test_form_without_equals_is_invalid() {
        let err = Seeds::from_form("x").unwrap_err();
        assert_eq!(err, Error::InvalidSeed("expected name=value, found `x`".into()));
    }

    #[test]
    fn test_malformed_json_is_invalid_seed() {
        assert!(matches!(Seeds::from_json("{"), Err(Error::InvalidSeed(_))));
    }
}
