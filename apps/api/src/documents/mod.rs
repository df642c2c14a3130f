//! Document generation — the template → HTML → PDF → storage pipeline.

pub mod handlers;
pub mod pdf;
pub mod pipeline;
pub mod render;
pub mod store;
pub mod templates;
