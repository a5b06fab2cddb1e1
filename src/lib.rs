//! # wearsuggest
//!
//! A personal wardrobe manager with a daily outfit suggestion engine.
//!
//! The engine itself (palette, filtering, assembly, history) lives in
//! `wearsuggest-core` and talks to storage through its `Store` trait. This
//! crate supplies the SQLite store, configuration, the `wear` CLI commands
//! and the HTTP server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────┐   ┌──────────┐
//! │  CLI / HTTP  │──▶│ OutfitAssembler │──▶│  Store   │
//! │ wear / axum  │   │ palette+filter  │   │  SQLite  │
//! └──────────────┘   └─────────────────┘   └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`sqlite_store`] | SQLite implementation of the core `Store` trait |
//! | [`items`] | Wardrobe catalogue commands |
//! | [`outfits`] | Suggestion and history commands |
//! | [`server`] | HTTP server |

pub mod config;
pub mod db;
pub mod items;
pub mod migrate;
pub mod outfits;
pub mod server;
pub mod sqlite_store;
