// Token extraction and the once-per-run token cache.

use crate::api::ApplicationApi;
use crate::error::TokenError;
use serde_json::Value;

/// Token pulled out of a token-endpoint body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub token: String,
    /// Set when the body parsed but had no `token` field.
    pub warning: Option<String>,
}

/// Pull the token out of a 200 body. Never fails.
///
/// `{"token": ...}` yields the field, a bare JSON string yields its contents,
/// anything else falls back to the trimmed raw body.
pub fn extract_token(body: &str) -> Extracted {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(mut map)) if map.contains_key("token") => {
            let token = match map.remove("token") {
                Some(Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => String::new(),
            };
            Extracted {
                token,
                warning: None,
            }
        }
        Ok(Value::String(s)) => Extracted {
            token: s.trim().to_string(),
            warning: None,
        },
        Ok(_) => Extracted {
            token: body.trim().to_string(),
            warning: Some("token response has no 'token' field, using the raw body".into()),
        },
        Err(_) => Extracted {
            token: body.trim().to_string(),
            warning: None,
        },
    }
}

/// Single-slot cache. Written once, on the first successful fetch.
#[derive(Debug, Default)]
pub struct TokenCache {
    token: Option<String>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Return the cached token, or fetch it once and remember it.
    ///
    /// On failure the cache stays empty so a later call fetches again.
    /// `on_warning` receives the extraction warning, if any.
    pub fn resolve<A, F>(&mut self, api: &A, mut on_warning: F) -> Result<String, TokenError>
    where
        A: ApplicationApi + ?Sized,
        F: FnMut(&str),
    {
        if let Some(token) = &self.token {
            tracing::debug!("reusing cached token");
            return Ok(token.clone());
        }

        let reply = api.fetch_token().map_err(|e| {
            tracing::warn!(error = %e, "token request failed");
            TokenError::Transport(e)
        })?;
        if reply.status != 200 {
            tracing::warn!(status = reply.status, "token endpoint refused");
            return Err(TokenError::Status {
                status: reply.status,
                body: reply.body,
            });
        }

        let extracted = extract_token(&reply.body);
        if let Some(warning) = &extracted.warning {
            tracing::warn!("{}", warning);
            on_warning(warning);
        }
        tracing::info!("token fetched");
        Ok(self.token.get_or_insert(extracted.token).clone())
    }
}
