//! Business-logic services, decoupled from the CLI surface

pub mod matching;
pub mod recon;
