// Core exports
pub mod credentials;
pub mod decision;
pub mod orchestrator;
pub mod parser;
pub mod prompt;

pub use credentials::{CredentialError, CredentialPool, KeyPicker, RandomPicker, SequencePicker};
pub use decision::{DecisionClient, MAX_ATTEMPTS, REQUEST_TIMEOUT};
pub use orchestrator::{BatchReport, FilterError, Orchestrator};
pub use parser::parse_filter_output;
pub use prompt::{build_copy_prompt, build_filter_prompt};
