//! File-level workflows behind the repokit binary

pub mod orchestration;
