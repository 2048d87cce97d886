//! Top-level coordinator: user action → caption → conversation → retrieval
//! → gallery, merging results into session state.

use crate::engine::captioner::Captioning;
use crate::engine::conversation::Responding;
use crate::engine::gallery::{self, GalleryEntry};
use crate::engine::retrieval::Retrieving;
use crate::engine::types::{ConversationState, Turn};
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Assistant text substituted when captioning fails.
pub const CAPTION_FAILURE_SENTINEL: &str = "Error generating description";

/// Assistant text substituted when the conversation engine fails.
pub const CHAT_FAILURE_SENTINEL: &str = "Error processing chat input";

/// Everything one invocation produces: the advanced session state, the
/// latest assistant message, and the rendered gallery.
#[derive(Debug)]
pub struct TurnOutcome {
    pub state: ConversationState,
    pub reply: String,
    pub gallery: Vec<GalleryEntry>,
}

/// Drives one session. Downstream services are injected at construction;
/// the orchestrator itself holds no mutable state and never lets a
/// downstream failure escape a turn.
pub struct Orchestrator {
    captioner: Arc<dyn Captioning>,
    conversation: Arc<dyn Responding>,
    retriever: Arc<dyn Retrieving>,
    images_root: PathBuf,
    retrieval_limit: usize,
}

impl Orchestrator {
    pub fn new(
        captioner: Arc<dyn Captioning>,
        conversation: Arc<dyn Responding>,
        retriever: Arc<dyn Retrieving>,
        images_root: PathBuf,
        retrieval_limit: usize,
    ) -> Self {
        Self {
            captioner,
            conversation,
            retriever,
            images_root,
            retrieval_limit,
        }
    }

    /// Drive one turn. Chat input wins over an image when both are present,
    /// so the retrieval probe is the assistant's reply, not a caption; with
    /// neither input the call is a no-op.
    #[instrument(skip_all, fields(history_len = state.turns.len(), has_image = image.is_some(), chat_len = chat_input.len()))]
    pub async fn turn(
        &self,
        state: ConversationState,
        image: Option<&DynamicImage>,
        chat_input: &str,
    ) -> TurnOutcome {
        if !chat_input.is_empty() {
            self.chat_turn(state, chat_input).await
        } else if let Some(image) = image {
            self.image_turn(state, image).await
        } else {
            debug!("no input provided; turn is a no-op");
            TurnOutcome {
                state,
                reply: String::new(),
                gallery: Vec::new(),
            }
        }
    }

    /// Chat turns probe the index with the assistant's elaborated reply,
    /// not the raw user input.
    async fn chat_turn(&self, mut state: ConversationState, chat_input: &str) -> TurnOutcome {
        let reply = match self.conversation.respond(&state.turns, chat_input).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "conversation engine failed; substituting sentinel");
                CHAT_FAILURE_SENTINEL.to_string()
            }
        };

        let gallery = self.retrieve_gallery(&reply).await;

        state.turns.push(Turn::new(chat_input, reply.clone()));
        TurnOutcome {
            state,
            reply,
            gallery,
        }
    }

    /// Image turns search on the raw caption, not the assistant reply, and
    /// the caption becomes the carried topic description.
    async fn image_turn(&self, mut state: ConversationState, image: &DynamicImage) -> TurnOutcome {
        let description = match self.captioner.caption(image).await {
            Ok(description) => description,
            Err(e) => {
                warn!(error = %e, "captioning failed; substituting sentinel");
                CAPTION_FAILURE_SENTINEL.to_string()
            }
        };

        let user_message = format!("I've uploaded an image. The description is: {description}");
        let reply = match self.conversation.respond(&state.turns, &user_message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "conversation engine failed; substituting sentinel");
                CHAT_FAILURE_SENTINEL.to_string()
            }
        };

        let gallery = self.retrieve_gallery(&description).await;

        state.turns.push(Turn::new(user_message, reply.clone()));
        state.topic_description = description;
        TurnOutcome {
            state,
            reply,
            gallery,
        }
    }

    /// Retrieval failure is never fatal: the conversation proceeds and the
    /// gallery simply renders empty.
    async fn retrieve_gallery(&self, probe: &str) -> Vec<GalleryEntry> {
        match self.retriever.retrieve(probe, self.retrieval_limit).await {
            Ok(items) => gallery::render(&items, &self.images_root),
            Err(e) => {
                warn!(error = %e, "retrieval failed; rendering empty gallery");
                Vec::new()
            }
        }
    }
}
