//! The string channel between host and embedded contexts.
//!
//! Delivery is ordered per direction and fire-and-forget; inbound messages
//! are handed to `MapSession::handle_message` / `EmbeddedMapState::receive`
//! by whoever owns the transport.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Outbound half of the channel.
pub trait MessageSink {
    fn send(&mut self, message: String);
}

impl<F: FnMut(String)> MessageSink for F {
    fn send(&mut self, message: String) {
        self(message)
    }
}

/// FIFO queue of sent messages. Clones share the same queue, so one clone
/// can be given to a sender while another drains it.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queue: Rc<RefCell<VecDeque<String>>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&self) -> Option<String> {
        self.queue.borrow_mut().pop_front()
    }

    /// Takes every queued message, oldest first.
    pub fn drain(&self) -> Vec<String> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl MessageSink for Outbox {
    fn send(&mut self, message: String) {
        self.queue.borrow_mut().push_back(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbox_clones_share_queue() {
        let reader = Outbox::new();
        let mut writer = reader.clone();
        writer.send("a".to_string());
        writer.send("b".to_string());
        assert_eq!(reader.len(), 2);
        assert_eq!(reader.pop().as_deref(), Some("a"));
        assert_eq!(reader.drain(), vec!["b".to_string()]);
        assert!(writer.is_empty());
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |m: String| seen.push(m);
            sink.send("x".to_string());
        }
        assert_eq!(seen, vec!["x".to_string()]);
    }
}
