use crate::message::Message;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingReply,
}

/// A user message accepted by [`Conversation::append_user`], together with
/// the transcript as it stood before that message.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingTurn {
    pub text: String,
    pub history: Vec<Message>,
}

/// Append-only transcript of one session.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<Message>,
    phase: Phase,
}

impl Conversation {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self { messages: vec![Message::model(greeting)], phase: Phase::Idle }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::AwaitingReply
    }

    /// Returns `None` without touching the transcript for blank input or
    /// while a reply is still outstanding.
    pub fn append_user(&mut self, text: &str) -> Option<PendingTurn> {
        let text = text.trim();
        if text.is_empty() || self.is_busy() {
            return None;
        }
        let history = self.messages.clone();
        self.messages.push(Message::user(text));
        self.phase = Phase::AwaitingReply;
        Some(PendingTurn { text: text.to_string(), history })
    }

    pub fn append_model(&mut self, text: impl Into<String>) {
        self.messages.push(Message::model(text));
        self.phase = Phase::Idle;
    }
}
