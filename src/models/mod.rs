pub mod prompt;
pub mod session;

pub use prompt::{Prompt, PromptDraft};
pub use session::{AdminSession, SessionToken};
