//! # Triage Engine
//!
//! **A small forward-chaining expert system**
//!
//! Observed symptoms go in as facts, declarative if-then rules fire until
//! nothing new can be derived, and the diagnosis facts they produced come out.
//!
//! ## Quick Start
//!
//! ```rust
//! use triage::{Engine, Symptom, SymptomSelection};
//!
//! let engine = Engine::new();
//! let selection: SymptomSelection = [Symptom::Fever, Symptom::DifficultyBreathing]
//!     .into_iter()
//!     .collect();
//!
//! let response = engine.diagnose(&selection);
//! assert_eq!(
//!     response.diagnoses,
//!     vec!["Possible severe COVID-19 - seek medical attention".to_string()]
//! );
//! assert_eq!(response.fired_rules, vec!["covid-severe".to_string()]);
//! ```
//!
//! ## Core Concepts
//!
//! ### Facts
//! Value-equal assertions of a kind plus attributes: `symptom(name = fever)`,
//! `diagnosis(result = "Likely COVID-19")`. Asserting a fact twice is a no-op.
//!
//! ### Rules
//! A conjunction of condition patterns and one conclusion fact. A rule fires
//! when every condition is present and its conclusion is not yet known.
//!
//! ### Rule files
//! Rule bases can be extended with text:
//!
//! ```text
//! rule covid-likely
//!   when symptom(name = fever)
//!    and symptom(name = cough)
//!    and symptom(name = loss_of_taste)
//!   then diagnosis(result = "Likely COVID-19")
//! ```

pub mod engine;
pub mod error;
pub mod evaluator;
pub mod fact;
pub mod fact_store;
pub mod parser;
pub mod resource_limits;
pub mod response;
pub mod rule;
pub mod serializers;
pub mod span;
pub mod symptoms;
pub mod validator;

pub use engine::Engine;
pub use error::{ErrorDetails, TriageError};
pub use evaluator::{Evaluator, FiredRule, RunReport};
pub use fact::{Fact, FactKind, OtherFact, Pattern};
pub use fact_store::FactStore;
pub use parser::parse;
pub use resource_limits::ResourceLimits;
pub use response::Response;
pub use rule::{Rule, RuleBase};
pub use span::Span;
pub use symptoms::{Symptom, SymptomSelection};
pub use validator::Validator;

/// Result type for triage operations
pub type TriageResult<T> = Result<T, TriageError>;
