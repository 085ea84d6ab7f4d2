//! Outer adapters that turn files into requests and results into files.

pub mod csv;
