//! DocMeta Server — HTTP upload/analysis service over the metadata generator.

pub mod analytics;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::{build_generator, AppState};
