pub mod adapter;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod extract;
pub mod fixture;
pub mod probe;
pub mod registry;
pub mod vertical_inference;

mod retailers;

pub use adapter::{AdapterHooks, DefaultHooks, LiveAdapter, SourceAdapter};
pub use config::AdapterConfig;
pub use errors::AdapterError;
pub use fixture::FixtureAdapter;
pub use registry::{AdapterRuntimeOptions, build_fixture_adapter, build_live_adapter, known_slugs};
