// Library root
// -----------
// The binary (`main.rs`) wires these modules together into the interactive
// application workflow.
//
// Module responsibilities:
// - `config`: resolves endpoint URLs, timeout and log filter once per run.
// - `api`: HTTP interactions with the token and application endpoints.
// - `ui`: the console abstraction (prompts, colored messages, spinner).
// - `prompt`: the bounded-retry prompt loop every field goes through.
// - `fields`: the field validators and the extra-fields collector.
// - `token`: token extraction and the once-per-run token cache.
// - `session`: the submit / ask-again loop tying everything together.
pub mod api;
pub mod config;
pub mod error;
pub mod fields;
pub mod prompt;
pub mod session;
pub mod token;
pub mod ui;

#[cfg(test)]
pub mod testing;
