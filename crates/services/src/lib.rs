#![forbid(unsafe_code)]

pub mod error;
pub mod practice;
pub mod tutor;

pub use error::{PracticeError, TutorError};
pub use practice::{PracticeService, SubmitOutcome};
pub use tutor::{ChatCompletions, OpenAiChatClient, TutorConfig};
