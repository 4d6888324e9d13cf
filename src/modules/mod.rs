pub mod analysis;
pub mod auth;
pub mod submission;
pub mod transcode;
