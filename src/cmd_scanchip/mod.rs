//! Subcommand modules for the `scanchip` binary.

pub mod call;
pub mod elbow;
pub mod features;
pub mod jaccard;
pub mod moc;
