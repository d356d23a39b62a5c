use pdfqa_core::llm::{Message, Parameters};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessagePayload<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    pub(crate) fn new(model: &'a str, messages: &'a [Message], parameters: &Parameters) -> Self {
        Self {
            model,
            messages: to_chat_messages(messages),
            stream: false,
            temperature: parameters.temperature,
            top_p: parameters.top_p,
            max_tokens: parameters.max_tokens,
            seed: parameters.seed,
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct ChatMessagePayload<'a> {
    role: &'static str,
    content: &'a str,
}

pub fn to_chat_messages(messages: &[Message]) -> Vec<ChatMessagePayload<'_>> {
    messages
        .iter()
        .map(|message| ChatMessagePayload {
            role: message.role().as_str(),
            content: message.content(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_roles_in_order() {
        let messages = [
            Message::system("doc"),
            Message::user("q1"),
            Message::assistant("a1"),
            Message::user("q2"),
        ];
        let body = ChatCompletionRequest::new("llama3-8b-8192", &messages, &Parameters::default());

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "model": "llama3-8b-8192",
                "messages": [
                    {"role": "system", "content": "doc"},
                    {"role": "user", "content": "q1"},
                    {"role": "assistant", "content": "a1"},
                    {"role": "user", "content": "q2"},
                ],
                "stream": false,
            })
        );
    }

    #[test]
    fn includes_set_parameters_only() {
        let messages = [Message::user("q")];
        let parameters = Parameters::default().temperature(0.5).max_tokens(256);
        let value =
            serde_json::to_value(ChatCompletionRequest::new("m", &messages, &parameters)).unwrap();

        assert_eq!(value["temperature"], json!(0.5));
        assert_eq!(value["max_tokens"], json!(256));
        assert!(value.get("top_p").is_none());
        assert!(value.get("seed").is_none());
    }
}
