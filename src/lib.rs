// Library root
// -----------
// This crate exposes the library surface of the launcher bridge. The
// binary (`main.rs`) parses the command line, loads configuration and
// prints whatever the `bridge` handlers return.
//
// Module responsibilities:
// - `config`: Explicit configuration read once from the environment.
// - `api`: HTTP interactions with the image host (history, upload,
//   delete, thumbnail download) behind the `ImageHost` trait.
// - `thumbnail`: Write-once icon cache keyed by a hash of the image URL.
// - `desktop`: Clipboard and notification capabilities, one
//   implementation per platform plus an in-memory one for tests.
// - `bridge`: The three command handlers.
// - `items`: The launcher's result list schema.
// - `cli`: Command-line verbs, shared with the binary.
pub mod api;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod desktop;
pub mod items;
pub mod thumbnail;
