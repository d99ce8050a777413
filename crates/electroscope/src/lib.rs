#![forbid(unsafe_code)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # electroscope
//!
//! Terminal dashboard for browsing and managing the dispatches of a
//! workflow-orchestration server: debounced search, column sorting,
//! pagination, multi-select, and bulk delete behind a confirmation
//! dialog.
//!
//! Built on the `tea` Elm-architecture runtime and the `trinkets`
//! widget set. The server is consumed through the narrow
//! [`api::Client`] trait; [`api::HttpClient`] speaks the JSON API and
//! [`api::DemoClient`] serves a seeded in-memory dataset for demo mode
//! and tests.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod messages;
pub mod query;
pub mod selection;
pub mod theme;
pub mod view;

pub use api::{Client, ClientError, DemoClient, HttpClient};
pub use app::App;
pub use cli::Cli;
pub use config::Config;
