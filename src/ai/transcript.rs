use crate::models::chat::{ChatMessage, ChatRole};

const EMPTY_REPLY_PLACEHOLDER: &str = "(no reply)";

/// Ordered conversation state for the solving assistant. One exchange at
/// a time: the user turn is pushed up front, the assistant message is
/// created lazily on the first delta, and a failed exchange is rolled
/// back so the visible log matches what the backend actually recorded.
#[derive(Debug, Default)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    /// Index of the assistant message currently receiving deltas.
    streaming: Option<usize>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Replace the transcript with server-side history.
    pub fn load(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
        self.streaming = None;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.streaming = None;
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn push_user(&mut self, content: impl Into<String>, images: Option<Vec<String>>) {
        self.push(ChatMessage::user(content, images));
    }

    /// First delta creates the assistant message; later deltas append.
    pub fn append_delta(&mut self, delta: &str) {
        match self.streaming {
            Some(index) => {
                if let Some(message) = self.messages.get_mut(index) {
                    message.content.push_str(delta);
                }
            }
            None => {
                self.messages.push(ChatMessage::assistant(delta));
                self.streaming = Some(self.messages.len() - 1);
            }
        }
    }

    /// Settle the exchange with the final text. When no delta ever
    /// arrived, a placeholder reply keeps the transcript balanced.
    pub fn finish(&mut self, full_content: String) {
        match self.streaming.take() {
            Some(index) => {
                if let Some(message) = self.messages.get_mut(index) {
                    message.content = full_content;
                }
            }
            None => {
                let content = if full_content.is_empty() {
                    EMPTY_REPLY_PLACEHOLDER.to_string()
                } else {
                    full_content
                };
                self.messages.push(ChatMessage::assistant(content));
            }
        }
    }

    /// Discard the in-progress assistant message. When no assistant
    /// content had appeared at all, the trailing user turn is rolled
    /// back too: the backend never stored a reply for it.
    pub fn rollback_failed_exchange(&mut self) {
        match self.streaming.take() {
            Some(index) => {
                if index < self.messages.len() {
                    self.messages.remove(index);
                }
            }
            None => {
                if self.messages.last().map(|m| m.role) == Some(ChatRole::User) {
                    self.messages.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_build_one_assistant_message() {
        let mut transcript = ChatTranscript::new();
        transcript.push_user("1+1?", None);
        transcript.append_delta("The answer ");
        transcript.append_delta("is 2.");
        transcript.finish("The answer is 2.".into());

        let messages = transcript.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[1].role, ChatRole::Assistant);
        assert_eq!(messages[1].content, "The answer is 2.");
    }

    #[test]
    fn test_finish_without_deltas_pushes_placeholder() {
        let mut transcript = ChatTranscript::new();
        transcript.push_user("hello", None);
        transcript.finish(String::new());

        let messages = transcript.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, EMPTY_REPLY_PLACEHOLDER);
    }

    #[test]
    fn test_finish_prefers_server_full_content() {
        let mut transcript = ChatTranscript::new();
        transcript.push_user("q", None);
        transcript.append_delta("partial");
        transcript.finish("partial plus tail".into());

        assert_eq!(transcript.messages()[1].content, "partial plus tail");
    }

    #[test]
    fn test_rollback_discards_partial_assistant_message() {
        let mut transcript = ChatTranscript::new();
        transcript.push_user("old question", None);
        transcript.append_delta("old answer");
        transcript.finish("old answer".into());

        transcript.push_user("new question", None);
        transcript.append_delta("par");
        transcript.rollback_failed_exchange();

        // Content had appeared, so only the partial reply is discarded.
        let messages = transcript.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].content, "new question");
        assert_eq!(messages[2].role, ChatRole::User);
    }

    #[test]
    fn test_rollback_without_deltas_pops_user_turn() {
        let mut transcript = ChatTranscript::new();
        transcript.push_user("doomed question", None);
        transcript.rollback_failed_exchange();
        assert!(transcript.messages().is_empty());
    }

    #[test]
    fn test_rollback_keeps_earlier_history() {
        let mut transcript = ChatTranscript::new();
        transcript.load(vec![
            ChatMessage::user("kept", None),
            ChatMessage::assistant("kept reply"),
        ]);
        transcript.push_user("failing", None);
        transcript.rollback_failed_exchange();
        assert_eq!(transcript.messages().len(), 2);
    }
}
