//! # IO Module
//!
//! The HTTP surface of the stock sheet server. Handlers translate requests
//! into domain calls and domain errors into status codes with
//! `{ "error", "code" }` bodies.

pub mod rest;
