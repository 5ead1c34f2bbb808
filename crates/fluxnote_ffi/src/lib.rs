//! Flutter bridge crate for FluxNote core.

pub mod api;
