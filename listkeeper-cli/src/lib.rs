//! Command line front end for the Listkeeper server

pub mod cli;
pub mod commands;
pub mod exit_codes;
pub mod logging;
