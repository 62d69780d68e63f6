//! Auto-RPPM backend library: form validation, one-shot Gemini generation,
//! and server-rendered lesson plan documents. The binary in `main.rs` wires
//! this into an axum server.

pub mod config;
pub mod domain;
pub mod gemini;
pub mod logic;
pub mod protocol;
pub mod render;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod util;
