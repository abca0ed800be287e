use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub recipient: String,
    pub timestamp: String,
    pub body: String,
    #[serde(default)]
    pub is_read: bool,
}

/// Owns the message log and the unread counter. `is_read` is the only
/// mutable field in the data model and only the inbox flips it, so the
/// counter always equals the number of unread entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inbox {
    messages: Vec<Message>,
    unread: usize,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn's worth of messages, all unread.
    pub fn push_batch(&mut self, batch: Vec<Message>) {
        for mut message in batch {
            message.is_read = false;
            self.unread += 1;
            self.messages.push(message);
        }
    }

    pub fn mark_read(&mut self, index: usize) {
        if let Some(message) = self.messages.get_mut(index) {
            if !message.is_read {
                message.is_read = true;
                self.unread -= 1;
            }
        }
    }

    pub fn mark_all_read(&mut self) {
        for message in &mut self.messages {
            message.is_read = true;
        }
        self.unread = 0;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn unread(&self) -> usize {
        self.unread
    }

    pub(crate) fn restore(messages: Vec<Message>, unread: usize) -> Self {
        Self { messages, unread }
    }
}
