//! InnerTube-backed implementation of the `VideoPlatform` trait.
//!
//! # Overview
//! Talks to YouTube's internal JSON API (the one the web player itself
//! uses) to serve search, video, and channel lookups. No API key
//! provisioning is required; the endpoints accept the public web-client
//! key embedded in every youtube.com page.
//!
//! # Design
//! - Request bodies are built by pure functions (`request` module) and
//!   response bytes are decoded by pure functions (`response` module), so
//!   the whole translation layer is unit-testable without network. Only
//!   the client's `call` method performs I/O.
//! - Upstream payloads are deeply nested and mostly optional; the decoders
//!   navigate to the few renderers the domain model needs and skip entry
//!   kinds they do not recognize (ads, shelves) rather than failing the
//!   page.

mod client;
mod request;
mod response;

pub use client::InnertubeClient;
