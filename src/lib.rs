//! Berth: immutable resource snapshots and the tools around them.
//!
//! The [`model`] module is the schema: a [`ResourceSnapshot`] describes a
//! managed resource at one point in time. [`diff`], [`render`] and
//! [`storage`] are consumers of that schema.

pub mod cli;
pub mod config;
pub mod diff;
pub mod model;
pub mod render;
pub mod storage;

pub use model::{
    EnvironmentVariableSnapshot, ResourcePropertySnapshot, ResourceSnapshot, ResourceState,
    UrlSnapshot, states, styles,
};
