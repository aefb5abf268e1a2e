//! Client-side conversation state for the regulatory assistant.
//!
//! This module owns everything between user input and the relay endpoint:
//! - The append-only conversation log (greeting-seeded)
//! - The submit lifecycle with its in-flight gate
//! - The transport seam to the relay's `POST /api/chat`

pub mod conversation;
pub mod message;
pub mod prompt;
pub mod session;
pub mod transport;

pub use conversation::Conversation;
pub use message::{Message, Role};
pub use session::{ChatSession, SubmitOutcome};
pub use transport::{HttpRelay, RelayTransport, TransportError};
