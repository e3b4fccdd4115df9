//! Payload normalization into the provider's chat-message wire format.
//!
//! Every supported input shape (a raw upload, a list of pre-encoded base64
//! strings, a free-text string) becomes a two-message list: the fixed policy
//! prompt as the system message, then the caller's content as the user
//! message. Uploads are base64-transcoded and wrapped in `data:` URLs; the
//! bytes themselves are never decoded, resized or validated here.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use super::prompts::{PHOTO_POLICY, TEXT_POLICY};

/// One message of the provider's chat API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

/// One content block within a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

fn system(policy: &str) -> ChatMessage {
    ChatMessage {
        role: "system".to_string(),
        content: vec![ContentPart::Text { text: policy.to_string() }],
    }
}

fn image_part(encoded: String) -> ContentPart {
    ContentPart::ImageUrl {
        image_url: ImageUrl {
            url: format!("data:image/jpeg;base64,{encoded}"),
        },
    }
}

/// Messages for a single uploaded photo.
pub fn photo_messages(image: &[u8]) -> Vec<ChatMessage> {
    let encoded = STANDARD.encode(image);
    vec![
        system(PHOTO_POLICY),
        ChatMessage {
            role: "user".to_string(),
            content: vec![image_part(encoded)],
        },
    ]
}

/// Messages for a batch of pre-encoded photos, one image block per entry.
///
/// Callers are responsible for rejecting an empty batch before reaching this.
pub fn photo_batch_messages(images_base64: &[String]) -> Vec<ChatMessage> {
    vec![
        system(PHOTO_POLICY),
        ChatMessage {
            role: "user".to_string(),
            content: images_base64.iter().map(|encoded| image_part(encoded.clone())).collect(),
        },
    ]
}

/// Messages for a free-text "reason for calling" check.
pub fn text_messages(text: &str) -> Vec<ChatMessage> {
    vec![
        system(TEXT_POLICY),
        ChatMessage {
            role: "user".to_string(),
            content: vec![ContentPart::Text { text: text.to_string() }],
        },
    ]
}
