//! Concrete collaborators for the comment source and removal seams.

pub mod github;

pub use github::GitHubClient;
