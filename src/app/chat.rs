//! Chat screen state: the assistant conversation, its composer, and the
//! context the assistant answers in.
//!
//! The transcript is append-only. Message ids are assigned from a local
//! monotonic counter, so ordering is stable regardless of timestamps.

use crate::domain::{BookRef, ChatMessage, Sender};

/// The page the assistant is being asked about, when reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    pub number: u32,
    pub title: String,
}

/// What the assistant currently knows the user is doing.
///
/// Three levels of specificity: nothing selected, a book selected, or a
/// particular page open in the reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatContext {
    pub book: Option<BookRef>,
    pub page: Option<PageRef>,
}

impl ChatContext {
    /// Greeting posted by the assistant when this context becomes active.
    #[must_use]
    pub fn welcome(&self) -> String {
        match (&self.book, &self.page) {
            (Some(book), Some(page)) => format!(
                "Hi! I can see you are reading page {} of \"{}\". Ask me anything about \"{}\" and I will help you understand it.",
                page.number, book.title, page.title
            ),
            (Some(book), None) => format!(
                "Hi! You picked \"{}\" by {}. What would you like to know about it?",
                book.title, book.author
            ),
            (None, _) => {
                "Hi! I am your reading assistant. Pick a book from the library, or ask me anything about reading and learning.".to_string()
            }
        }
    }

    /// Suggested prompts shown under the composer for this context.
    #[must_use]
    pub fn quick_actions(&self) -> Vec<&'static str> {
        match (&self.book, &self.page) {
            (Some(_), Some(_)) => vec![
                "Summarize this page",
                "Explain the key idea",
                "Quiz me on this page",
                "Define the hard words",
            ],
            (Some(_), None) => vec![
                "What is this book about?",
                "Who is it for?",
                "Give me a reading plan",
                "What will I learn?",
            ],
            (None, _) => vec![
                "Recommend a book",
                "How do I study better?",
                "What is popular right now?",
            ],
        }
    }
}

/// Conversation state for the assistant screen.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    /// Append-only transcript, oldest first.
    messages: Vec<ChatMessage>,
    /// Next message id to hand out.
    next_id: u64,
    /// Composer buffer.
    pub input: String,
    /// A reply is pending; the typing indicator is shown and sends are
    /// suppressed until it lands.
    pub is_typing: bool,
    /// Context the last welcome was posted for.
    context: ChatContext,
}

impl ChatState {
    /// Fresh chat with the no-context welcome already posted.
    #[must_use]
    pub fn new() -> Self {
        let mut chat = Self::default();
        let welcome = chat.context.welcome();
        chat.push(Sender::Bot, welcome);
        chat
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn context(&self) -> &ChatContext {
        &self.context
    }

    /// Appends a message and returns its id.
    pub fn push(&mut self, sender: Sender, text: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage::now(id, sender, text));
        id
    }

    /// Switches the assistant context, posting a new welcome if it changed.
    ///
    /// Re-setting the identical context is a no-op so that revisiting the
    /// chat screen does not spam greetings.
    pub fn set_context(&mut self, context: ChatContext) {
        if context == self.context {
            return;
        }
        self.context = context;
        let welcome = self.context.welcome();
        self.push(Sender::Bot, welcome);
    }

    /// Takes the composer text for sending.
    ///
    /// Returns `None` without touching the transcript when the buffer is
    /// blank or a reply is already pending; otherwise appends the user
    /// message, clears the composer, sets the typing indicator, and returns
    /// the sent text.
    pub fn send(&mut self) -> Option<String> {
        if self.is_typing {
            return None;
        }
        let text = self.input.trim().to_string();
        if text.is_empty() {
            self.input.clear();
            return None;
        }
        self.input.clear();
        self.push(Sender::User, text.clone());
        self.is_typing = true;
        Some(text)
    }

    /// Lands an assistant reply, clearing the typing indicator.
    pub fn receive_reply(&mut self, text: String) {
        self.is_typing = false;
        self.push(Sender::Bot, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> BookRef {
        BookRef {
            id: "1".to_string(),
            title: "Fun Science Adventures".to_string(),
            author: "Dr. Wichai".to_string(),
        }
    }

    #[test]
    fn new_chat_starts_with_welcome() {
        let chat = ChatState::new();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].sender, Sender::Bot);
    }

    #[test]
    fn blank_send_is_a_no_op() {
        let mut chat = ChatState::new();
        chat.input = "   \t ".to_string();
        assert!(chat.send().is_none());
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.is_typing);
        assert!(chat.input.is_empty());
    }

    #[test]
    fn send_appends_user_message_and_sets_typing() {
        let mut chat = ChatState::new();
        chat.input = "  what is gravity?  ".to_string();
        let sent = chat.send().unwrap();
        assert_eq!(sent, "what is gravity?");
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].sender, Sender::User);
        assert_eq!(chat.messages()[1].text, "what is gravity?");
        assert!(chat.is_typing);
        assert!(chat.input.is_empty());
    }

    #[test]
    fn send_suppressed_while_reply_pending() {
        let mut chat = ChatState::new();
        chat.input = "first".to_string();
        assert!(chat.send().is_some());
        chat.input = "second".to_string();
        assert!(chat.send().is_none());
        chat.receive_reply("answer".to_string());
        assert!(!chat.is_typing);
        chat.input = "second".to_string();
        assert!(chat.send().is_some());
    }

    #[test]
    fn context_change_posts_new_welcome() {
        let mut chat = ChatState::new();
        chat.set_context(ChatContext {
            book: Some(book()),
            page: None,
        });
        assert_eq!(chat.messages().len(), 2);
        assert!(chat.messages()[1].text.contains("Fun Science Adventures"));
    }

    #[test]
    fn identical_context_does_not_repeat_welcome() {
        let mut chat = ChatState::new();
        let ctx = ChatContext {
            book: Some(book()),
            page: None,
        };
        chat.set_context(ctx.clone());
        chat.set_context(ctx);
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn page_context_mentions_page_number() {
        let ctx = ChatContext {
            book: Some(book()),
            page: Some(PageRef {
                number: 7,
                title: "Forces".to_string(),
            }),
        };
        assert!(ctx.welcome().contains("page 7"));
        assert_eq!(ctx.quick_actions().len(), 4);
    }

    #[test]
    fn message_ids_are_monotonic() {
        let mut chat = ChatState::new();
        let a = chat.push(Sender::User, "a".to_string());
        let b = chat.push(Sender::Bot, "b".to_string());
        assert!(b > a);
    }
}
