//! Core data model for Berth.
//!
//! A resource snapshot is an immutable, point-in-time description of
//! something being managed (a container, a process, an endpoint):
//! what kind it is, what state it is in, and what it exposes.
//!
//! State and style names are open strings. The [`states`] and [`styles`]
//! catalogues list the well-known values, but producers may use any text.

mod environment;
mod property;
mod snapshot;
mod state;
mod url;

pub mod states;
pub mod styles;

pub use environment::EnvironmentVariableSnapshot;
pub use property::ResourcePropertySnapshot;
pub use snapshot::ResourceSnapshot;
pub use state::ResourceState;
pub use url::UrlSnapshot;
