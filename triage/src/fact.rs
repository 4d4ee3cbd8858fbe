//! Facts and condition patterns
//!
//! A [`Fact`] is a value: two facts are equal iff their kind and every
//! attribute are equal. Kinds the engine knows about (`symptom`, `diagnosis`)
//! are tagged variants with a fixed attribute shape; anything else is carried
//! as [`Fact::Other`] so rule files can introduce intermediate facts. An
//! [`OtherFact`] can only come out of [`Fact::new`], so a known kind never
//! hides inside it.

use crate::{TriageError, TriageResult};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub const SYMPTOM_KIND: &str = "symptom";
pub const DIAGNOSIS_KIND: &str = "diagnosis";

/// Discriminant of a fact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FactKind {
    Symptom,
    Diagnosis,
    Other(String),
}

impl FactKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            SYMPTOM_KIND => FactKind::Symptom,
            DIAGNOSIS_KIND => FactKind::Diagnosis,
            other => FactKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FactKind::Symptom => SYMPTOM_KIND,
            FactKind::Diagnosis => DIAGNOSIS_KIND,
            FactKind::Other(kind) => kind,
        }
    }

    /// Attribute names a fact of this kind must carry, `None` for free-form kinds
    pub fn shape(&self) -> Option<&'static [&'static str]> {
        match self {
            FactKind::Symptom => Some(&["name"]),
            FactKind::Diagnosis => Some(&["result"]),
            FactKind::Other(_) => None,
        }
    }
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An assertion held in working memory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Fact {
    Symptom {
        name: String,
    },
    Diagnosis {
        result: String,
    },
    Other(OtherFact),
}

/// Fact of a kind the engine has no fixed shape for
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OtherFact {
    kind: String,
    attributes: BTreeMap<String, String>,
}

impl OtherFact {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

impl Fact {
    pub fn symptom(name: impl Into<String>) -> Self {
        Fact::Symptom { name: name.into() }
    }

    pub fn diagnosis(result: impl Into<String>) -> Self {
        Fact::Diagnosis {
            result: result.into(),
        }
    }

    /// Build a fact from a kind and attribute list.
    ///
    /// Known kinds are canonicalised into their tagged variant, so
    /// `Fact::new("symptom", [("name", "fever")])` equals `Fact::symptom("fever")`.
    /// Missing, extra or repeated attributes on a known kind are rejected, as
    /// are attribute names the rule file grammar can't spell and empty values.
    pub fn new<K, V>(kind: &str, attributes: impl IntoIterator<Item = (K, V)>) -> TriageResult<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        if !is_identifier(kind) {
            return Err(TriageError::InvalidFact(format!(
                "'{}' is not a valid fact kind",
                kind
            )));
        }

        let mut map = BTreeMap::new();
        for (name, value) in attributes {
            let name = name.into();
            let value = value.into();
            if !is_identifier(&name) {
                return Err(TriageError::InvalidFact(format!(
                    "'{}' is not a valid attribute name for {}",
                    name, kind
                )));
            }
            if value.is_empty() {
                return Err(TriageError::InvalidFact(format!(
                    "attribute '{}' of {} must not be empty",
                    name, kind
                )));
            }
            if map.insert(name.clone(), value).is_some() {
                return Err(TriageError::InvalidFact(format!(
                    "attribute '{}' given twice for {}",
                    name, kind
                )));
            }
        }

        let fact_kind = FactKind::parse(kind);
        if let Some(shape) = fact_kind.shape() {
            let actual: Vec<&str> = map.keys().map(String::as_str).collect();
            if actual != shape {
                return Err(TriageError::InvalidFact(format!(
                    "{} facts take exactly ({}), got ({})",
                    kind,
                    shape.join(", "),
                    actual.join(", ")
                )));
            }
        }

        Ok(match fact_kind {
            FactKind::Symptom => Fact::Symptom {
                name: map.remove("name").unwrap_or_default(),
            },
            FactKind::Diagnosis => Fact::Diagnosis {
                result: map.remove("result").unwrap_or_default(),
            },
            FactKind::Other(kind) => Fact::Other(OtherFact {
                kind,
                attributes: map,
            }),
        })
    }

    pub fn kind(&self) -> FactKind {
        match self {
            Fact::Symptom { .. } => FactKind::Symptom,
            Fact::Diagnosis { .. } => FactKind::Diagnosis,
            Fact::Other(other) => FactKind::Other(other.kind.clone()),
        }
    }

    pub fn kind_str(&self) -> &str {
        match self {
            Fact::Symptom { .. } => SYMPTOM_KIND,
            Fact::Diagnosis { .. } => DIAGNOSIS_KIND,
            Fact::Other(other) => &other.kind,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match (self, name) {
            (Fact::Symptom { name: value }, "name") => Some(value),
            (Fact::Diagnosis { result }, "result") => Some(result),
            (Fact::Other(other), name) => other.attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Attributes in name order
    pub fn attributes(&self) -> Vec<(&str, &str)> {
        match self {
            Fact::Symptom { name } => vec![("name", name.as_str())],
            Fact::Diagnosis { result } => vec![("result", result.as_str())],
            Fact::Other(other) => other
                .attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fact_expr(f, self.kind_str(), self.attributes())
    }
}

impl Serialize for Fact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attributes: BTreeMap<&str, &str> = self.attributes().into_iter().collect();
        let mut state = serializer.serialize_struct("Fact", 2)?;
        state.serialize_field("kind", self.kind_str())?;
        state.serialize_field("attributes", &attributes)?;
        state.end()
    }
}

/// A condition naming a fact that must be present
///
/// Matches any fact of `kind` whose attributes equal every constraint.
/// Unconstrained attributes match anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    kind: FactKind,
    constraints: BTreeMap<String, String>,
}

impl Pattern {
    pub fn new<K, V>(kind: &str, constraints: impl IntoIterator<Item = (K, V)>) -> TriageResult<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        if !is_identifier(kind) {
            return Err(TriageError::InvalidPattern(format!(
                "'{}' is not a valid fact kind",
                kind
            )));
        }

        let kind = FactKind::parse(kind);
        let mut map = BTreeMap::new();
        for (name, value) in constraints {
            let name = name.into();
            if !is_identifier(&name) {
                return Err(TriageError::InvalidPattern(format!(
                    "'{}' is not a valid attribute name for {}",
                    name, kind
                )));
            }
            if let Some(shape) = kind.shape() {
                if !shape.contains(&name.as_str()) {
                    return Err(TriageError::InvalidPattern(format!(
                        "{} facts have no attribute '{}' (expected: {})",
                        kind,
                        name,
                        shape.join(", ")
                    )));
                }
            }
            if map.insert(name.clone(), value.into()).is_some() {
                return Err(TriageError::InvalidPattern(format!(
                    "attribute '{}' constrained twice for {}",
                    name, kind
                )));
            }
        }

        Ok(Self {
            kind,
            constraints: map,
        })
    }

    /// `symptom(name = <name>)`
    pub fn symptom(name: impl Into<String>) -> Self {
        Self {
            kind: FactKind::Symptom,
            constraints: BTreeMap::from([("name".to_string(), name.into())]),
        }
    }

    /// Pattern matching exactly `fact` and nothing else
    pub fn exact(fact: &Fact) -> Self {
        Self {
            kind: fact.kind(),
            constraints: fact
                .attributes()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn kind(&self) -> &FactKind {
        &self.kind
    }

    pub fn constraints(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constraints
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn matches(&self, fact: &Fact) -> bool {
        if fact.kind_str() != self.kind.as_str() {
            return false;
        }
        self.constraints
            .iter()
            .all(|(name, value)| fact.attribute(name) == Some(value.as_str()))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fact_expr(f, self.kind.as_str(), self.constraints())
    }
}

fn write_fact_expr<'a>(
    f: &mut fmt::Formatter<'_>,
    kind: &str,
    attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> fmt::Result {
    write!(f, "{}(", kind)?;
    for (i, (name, value)) in attributes.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if is_identifier(value) {
            write!(f, "{} = {}", name, value)?;
        } else {
            write!(f, "{} = \"{}\"", name, escape(value))?;
        }
    }
    f.write_str(")")
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Identifiers as the rule file grammar accepts them unquoted
pub(crate) fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
