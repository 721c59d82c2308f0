// ABOUTME: Data models for attach targets

pub mod target;

pub use target::{SessionTarget, TargetDraft};
