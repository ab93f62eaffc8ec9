// src/lib.rs — Library root for sheetchat

pub mod cli;
pub mod core;
pub mod infra;
pub mod provider;
pub mod sheet;
pub mod util;
