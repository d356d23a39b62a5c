use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, `None` when it is missing or empty.
    pub(crate) fn into_text(self) -> Option<String> {
        let text = self
            .choices
            .into_iter()
            .next()?
            .message
            .content?
            .into_text();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize, Default)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<MessageContent>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageContent {
    Blocks(Vec<ContentPart>),
    Text(String),
}

impl MessageContent {
    fn into_text(self) -> String {
        match self {
            Self::Blocks(parts) => parts.into_iter().map(ContentPart::into_text).collect(),
            Self::Text(text) => text,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text { text: String },
    Inline(String),
}

impl ContentPart {
    fn into_text(self) -> String {
        match self {
            Self::Text { text } | Self::Inline(text) => text,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Extracts `error.message` from an error body, falling back to the raw text.
pub fn api_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ApiErrorBody>(body).map_or_else(
        |_| String::from_utf8_lossy(body).trim().to_string(),
        |parsed| parsed.error.message,
    )
}
