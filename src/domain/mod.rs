//! Domain layer modules
//!
//! This module contains business domain logic:
//! - `template`: Template engine, storage, value drafts and import/export
//! - `storage`: Persistence backends for the template list

pub mod storage;
pub mod template;
