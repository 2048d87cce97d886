//! Public façade for the engine layer.

pub mod captioner;
pub mod conversation;
pub mod gallery;
pub mod orchestrator;
pub mod retrieval;
pub mod types;


pub use captioner::{Captioner, Captioning, CaptionError};
pub use conversation::{ConversationEngine, ConversationError, Responding};
pub use gallery::GalleryEntry;
pub use orchestrator::{Orchestrator, TurnOutcome};
pub use retrieval::{Retriever, RetrievalError, Retrieving};
pub use types::{ConversationState, RetrievedItem, Turn};
