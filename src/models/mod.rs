//! Data models for Library Pulse

pub mod ack;
pub mod book;
pub mod borrow;
pub mod document;
pub mod session;

// Re-export commonly used types
pub use ack::{DeleteAck, InsertAck, UpdateOutcome};
pub use book::{Book, BookPatch};
pub use borrow::{BorrowRecord, CreateBorrow};
pub use document::JsonMap;
pub use session::SessionClaims;
