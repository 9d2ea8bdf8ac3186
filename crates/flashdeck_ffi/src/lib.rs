//! FFI bindings for Flashdeck hosts.

pub mod api;
