pub mod assessment;
pub mod classifier;
pub mod wizard;

pub use assessment::{AssessmentService, SessionView, SubmitOutcome};
pub use wizard::{WizardSession, WizardStep};
