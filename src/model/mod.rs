pub mod answers;
pub mod catalog;
pub mod classification;
pub mod config;
pub mod system;

pub use answers::{AnswerPrefill, AnswerSet, FlagMap, GeneralPurposeAnswers};
pub use catalog::Category;
pub use classification::{ClassificationResult, ComplianceStatus, RiskClass};
pub use config::{Config, EnrichmentConfig};
pub use system::{AiSystem, NewAiSystem};
