// src/core/mod.rs — Request building, chat sessions and batch runs

pub mod batch;
pub mod formatter;
pub mod session;
pub mod types;
