/*!
 * Translation job submission and result interpretation.
 *
 * - `orchestrator`: owns the selection and the submission state machine
 * - `selection`: the target language set
 * - `state`: submission states
 * - `response`: result records and response interpretation
 */

pub mod orchestrator;
pub mod response;
pub mod selection;
pub mod state;

pub use orchestrator::{JobOrchestrator, JobOutcome};
pub use response::{interpret_response, ArtifactFormat, ArtifactLinks, TranslationResult};
pub use selection::TargetLanguageSet;
pub use state::SubmissionState;
