use crate::{
    conversation::{Conversation, PendingTurn, Phase},
    gateway::{Gateway, TextGenerator},
    message::Message,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetState {
    pub visibility: Visibility,
    pub phase: Phase,
}

/// The chat box: a transcript plus the gateway answering into it.
pub struct ChatWidget<G> {
    visibility: Visibility,
    conversation: Conversation,
    gateway: Gateway<G>,
}

impl<G: TextGenerator> ChatWidget<G> {
    pub fn new(gateway: Gateway<G>) -> Self {
        let conversation = Conversation::new(gateway.profile().greeting.clone());
        Self { visibility: Visibility::Closed, conversation, gateway }
    }

    pub fn state(&self) -> WidgetState {
        WidgetState { visibility: self.visibility, phase: self.conversation.phase() }
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub fn open(&mut self) {
        self.visibility = Visibility::Open;
    }

    pub fn close(&mut self) {
        self.visibility = Visibility::Closed;
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    /// Accepts the visitor's input into the transcript. The returned turn
    /// must be passed to [`ChatWidget::resolve`] to release the busy gate.
    pub fn send(&mut self, input: &str) -> Option<PendingTurn> {
        if !self.is_open() {
            return None;
        }
        self.conversation.append_user(input)
    }

    pub fn resolve(&mut self, turn: PendingTurn) -> String {
        let reply = self.gateway.reply(&turn.text, &turn.history);
        self.conversation.append_model(reply.clone());
        reply
    }
}
