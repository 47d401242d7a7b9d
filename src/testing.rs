// Test doubles for the console and the HTTP API.

use crate::api::{ApplicationApi, ApplicationPayload, HttpReply};
use crate::error::TransportError;
use crate::ui::Console;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

/// Console fed from a fixed list of answers; records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    prompts: Vec<String>,
    lines: Vec<(Level, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warn,
    Error,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            input: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.clone()
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    pub fn lines(&self, level: Level) -> Vec<String> {
        self.lines
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines(Level::Error)
    }

    /// Every rendered message, in order, one per line.
    pub fn transcript(&self) -> String {
        self.lines
            .iter()
            .map(|(_, msg)| msg.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.input.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "script ran out of answers")
        })
    }

    fn info(&mut self, msg: &str) {
        self.lines.push((Level::Info, msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.lines.push((Level::Success, msg.to_string()));
    }

    fn warn(&mut self, msg: &str) {
        self.lines.push((Level::Warn, msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.lines.push((Level::Error, msg.to_string()));
    }
}

/// API double with queued replies that records every call.
#[derive(Debug, Default)]
pub struct FakeApi {
    token_replies: RefCell<VecDeque<Result<HttpReply, TransportError>>>,
    submit_replies: RefCell<VecDeque<Result<HttpReply, TransportError>>>,
    token_calls: RefCell<usize>,
    submissions: RefCell<Vec<(String, ApplicationPayload)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_reply(self, status: u16, body: &str) -> Self {
        self.token_replies.borrow_mut().push_back(Ok(HttpReply::new(status, body)));
        self
    }

    pub fn token_failure(self, detail: &str) -> Self {
        self.token_replies
            .borrow_mut()
            .push_back(Err(TransportError(detail.to_string())));
        self
    }

    pub fn submit_reply(self, status: u16, body: &str) -> Self {
        self.submit_replies.borrow_mut().push_back(Ok(HttpReply::new(status, body)));
        self
    }

    pub fn submit_failure(self, detail: &str) -> Self {
        self.submit_replies
            .borrow_mut()
            .push_back(Err(TransportError(detail.to_string())));
        self
    }

    pub fn token_calls(&self) -> usize {
        *self.token_calls.borrow()
    }

    /// (token, payload) for every submission made.
    pub fn submissions(&self) -> Vec<(String, ApplicationPayload)> {
        self.submissions.borrow().clone()
    }
}

impl ApplicationApi for FakeApi {
    fn fetch_token(&self) -> Result<HttpReply, TransportError> {
        *self.token_calls.borrow_mut() += 1;
        self.token_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no token reply queued".into())))
    }

    fn submit(&self, token: &str, payload: &ApplicationPayload) -> Result<HttpReply, TransportError> {
        self.submissions
            .borrow_mut()
            .push((token.to_string(), payload.clone()));
        self.submit_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no submit reply queued".into())))
    }
}
