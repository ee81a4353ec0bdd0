//! A tiny interactive command shell.
//!
//! This crate provides the building blocks of `mysh`: a prompt that reads one
//! line at a time with tab-completion and persistent history, a classifier
//! that decides whether the line is `exit`, a built-in, an alias, or a
//! passthrough for the operating system's command interpreter, and an
//! execution engine that runs the result either synchronously or on a
//! fire-and-forget background task and renders captured output with syntax
//! highlighting.
//!
//! The main entry point is [`Session`], which owns one shell session from the
//! welcome prompt to history persistence on exit. The public modules expose
//! the individual pieces so they can be driven independently under test.

pub mod alias;
mod builtins;
pub mod classify;
pub mod error;
mod exec;
mod http;
mod io_adapters;
pub mod line_source;
pub mod render;
mod session;
mod task;

pub use exec::Engine;
pub use io_adapters::MemWriter;
pub use render::Renderer;
pub use session::Session;
