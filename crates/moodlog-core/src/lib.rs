pub mod config;
pub mod entry;
pub mod error;
pub mod question;
pub mod store;
pub mod table;

pub use config::AppConfig;
pub use entry::{Entry, EntryDraft, Violation};
pub use error::JournalError;
pub use question::{interpret, Answer, Question, QuestionKind};
pub use store::EntryStore;
pub use table::{Table, Value};
