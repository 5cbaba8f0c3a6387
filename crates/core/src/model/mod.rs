mod ids;
mod message;
mod session;
mod word;

pub use ids::RequestId;
pub use message::{Message, Role};
pub use session::{PendingRequest, RequestKind, Session, SessionError, SessionPhase};
pub use word::{WORDS_PER_ROUND, Word, WordSet, WordSetError};
