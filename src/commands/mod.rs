//! Command entry points

pub mod merge;
