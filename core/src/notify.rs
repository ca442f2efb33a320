// SPDX-FileCopyrightText: 2026 Tempo contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The global notification channel, an external collaborator: mutation
/// failures surface here as generic messages.
pub trait Notifier: fmt::Debug {
    /// Surfaces one message to the user.
    fn notify(&mut self, message: &str);
}

/// A notifier that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _message: &str) {}
}

/// A notifier that buffers messages behind a shared handle, for tests and
/// embedders that render notifications themselves.
#[derive(Debug, Default, Clone)]
pub struct BufferedNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl BufferedNotifier {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle observing the same buffer.
    #[must_use]
    pub fn handle(&self) -> Self {
        self.clone()
    }

    /// Snapshot of the messages surfaced so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for BufferedNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
