//! Range scanner for perfect, amicable and sociable numbers.
//!
//! The binary wires a [`config::ScanConfig`] (TOML file and command line) to the
//! [`aliquot`] classifier and renders every cycle it finds.

pub mod cli;
pub mod config;
pub mod error;
pub mod scan;
