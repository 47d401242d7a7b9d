// The submission loop: collect fields, resolve the token, POST, report,
// ask whether to go again.
//
// Network problems are reported and never end the session. Only a field
// running out of attempts (or the input closing) does.

use crate::api::{ApplicationApi, ApplicationPayload, HttpReply};
use crate::error::{SessionError, TokenError, TransportError};
use crate::fields::{collect_extra_fields, Email, NonEmpty, YesNo, MAX_EXTRA_FIELDS};
use crate::prompt::{prompt, MAX_ATTEMPTS};
use crate::token::TokenCache;
use crate::ui::Console;

/// How one submission attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No token, so nothing was POSTed.
    TokenFailed(TokenError),
    /// The POST completed with some HTTP status.
    Submitted(HttpReply),
    /// The POST never got a response.
    SubmitFailed(TransportError),
}

/// One interactive session. Owns the token cache for its whole lifetime.
pub struct Session<C, A> {
    console: C,
    api: A,
    token: TokenCache,
}

impl<C: Console, A: ApplicationApi> Session<C, A> {
    pub fn new(console: C, api: A) -> Self {
        Session {
            console,
            api,
            token: TokenCache::new(),
        }
    }

    /// Loop until the user declines another submission.
    pub fn run(&mut self) -> Result<(), SessionError> {
        self.console.info("Job application submission");
        loop {
            self.submit_once()?;
            let again = prompt(
                &mut self.console,
                "Submit another application? [y/n]",
                &YesNo::new("submit another"),
                MAX_ATTEMPTS,
            )?;
            if !again {
                break;
            }
        }
        self.console.info("Goodbye.");
        Ok(())
    }

    /// One pass: collect, resolve token, submit, report.
    pub fn submit_once(&mut self) -> Result<Outcome, SessionError> {
        let payload = self.collect_payload()?;
        let outcome = match self.resolve_token() {
            Ok(token) => self.submit(&token, &payload),
            Err(err) => Outcome::TokenFailed(err),
        };
        self.report(&outcome);
        Ok(outcome)
    }

    fn collect_payload(&mut self) -> Result<ApplicationPayload, SessionError> {
        let console = &mut self.console;
        let name = prompt(console, "Full name", &NonEmpty::new("name"), MAX_ATTEMPTS)?;
        let email = prompt(console, "Email", &Email, MAX_ATTEMPTS)?;
        let job_title = prompt(console, "Job title", &NonEmpty::new("job title"), MAX_ATTEMPTS)?;
        let final_attempt = prompt(
            console,
            "Is this your final attempt? [y/n]",
            &YesNo::new("final attempt"),
            MAX_ATTEMPTS,
        )?;
        let extra_information = collect_extra_fields(console, MAX_EXTRA_FIELDS)?;

        Ok(ApplicationPayload {
            name,
            email,
            job_title,
            final_attempt,
            extra_information,
        })
    }

    fn resolve_token(&mut self) -> Result<String, TokenError> {
        let spinner = self.console.progress("Fetching token...");
        let mut warnings = Vec::new();
        let resolved = self
            .token
            .resolve(&self.api, |w| warnings.push(w.to_string()));
        spinner.finish_and_clear();

        for warning in &warnings {
            self.console.warn(&format!("Warning: {}", warning));
        }
        let token = resolved?;
        self.console.info(&format!("Using token: {}", token));
        Ok(token)
    }

    fn submit(&mut self, token: &str, payload: &ApplicationPayload) -> Outcome {
        let spinner = self.console.progress("Submitting application...");
        let result = self.api.submit(token, payload);
        spinner.finish_and_clear();

        match result {
            Ok(reply) => {
                tracing::info!(status = reply.status, "application submitted");
                Outcome::Submitted(reply)
            }
            Err(err) => {
                tracing::warn!(error = %err, "application submission failed");
                Outcome::SubmitFailed(err)
            }
        }
    }

    fn report(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::TokenFailed(err) => {
                self.console
                    .error(&format!("Failed to fetch token: {}", err));
                self.console.error("Application was not submitted.");
            }
            Outcome::Submitted(reply) => {
                let status = format!("POST returned status: {}", reply.status);
                if reply.is_success() {
                    self.console.success(&status);
                } else {
                    self.console.warn(&status);
                }
                self.console.info(&format!("Response body: {}", reply.body));
            }
            Outcome::SubmitFailed(err) => {
                self.console
                    .error(&format!("Failed to submit application: {}", err));
            }
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
