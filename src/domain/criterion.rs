//! Single key/value match criterion for key search

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::domain::error::{DomainError, DomainResult};

/// One field name and the value it must equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub key: String,
    pub value: Value,
}

impl Criterion {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build from a JSON object holding exactly one pair, e.g. `{"name": "A"}`.
    pub fn from_object(find: &Value) -> DomainResult<Self> {
        let object = find
            .as_object()
            .ok_or_else(|| DomainError::MalformedCriterion(find.to_string()))?;
        let mut pairs = object.iter();
        match (pairs.next(), pairs.next()) {
            (Some((key, value)), None) => Ok(Self::new(key.clone(), value.clone())),
            _ => Err(DomainError::MultipleKeys {
                found: object.len(),
            }),
        }
    }
}

impl TryFrom<&Value> for Criterion {
    type Error = DomainError;

    fn try_from(find: &Value) -> Result<Self, Self::Error> {
        Self::from_object(find)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl FromStr for Criterion {
    type Err = DomainError;

    /// Parses `key=value`. The value is read as JSON when possible
    /// (`level=3`, `active=true`, `name="3"`), otherwise taken as a plain string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, raw) = s
            .split_once('=')
            .ok_or_else(|| DomainError::MalformedCriterion(s.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(DomainError::MalformedCriterion(s.to_string()));
        }
        let raw = raw.trim();
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        Ok(Self::new(key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn given_single_pair_object_when_building_then_returns_criterion() {
        let criterion = Criterion::from_object(&json!({"name": "A"})).unwrap();
        assert_eq!(criterion, Criterion::new("name", "A"));
    }

    #[rstest]
    #[case(json!({"name": "A", "tier": 1}), 2)]
    #[case(json!({}), 0)]
    fn given_wrong_key_count_when_building_then_returns_multiple_keys(
        #[case] find: Value,
        #[case] found: usize,
    ) {
        assert_eq!(
            Criterion::from_object(&find),
            Err(DomainError::MultipleKeys { found })
        );
    }

    #[test]
    fn given_non_object_when_building_then_returns_malformed() {
        assert!(matches!(
            Criterion::from_object(&json!("name")),
            Err(DomainError::MalformedCriterion(_))
        ));
    }

    #[rstest]
    #[case("name=A", Criterion::new("name", "A"))]
    #[case("level=3", Criterion::new("level", 3))]
    #[case("active = true", Criterion::new("active", true))]
    #[case("name=\"3\"", Criterion::new("name", "3"))]
    #[case("title=Fire Ball", Criterion::new("title", "Fire Ball"))]
    fn given_key_value_string_when_parsing_then_infers_value(
        #[case] input: &str,
        #[case] expected: Criterion,
    ) {
        assert_eq!(input.parse::<Criterion>().unwrap(), expected);
    }

    #[rstest]
    #[case("name")]
    #[case("=A")]
    fn given_malformed_string_when_parsing_then_fails(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Criterion>(),
            Err(DomainError::MalformedCriterion(_))
        ));
    }
}
