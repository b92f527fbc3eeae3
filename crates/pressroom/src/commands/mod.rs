//! CLI command implementations.

pub(crate) mod fetch;
pub(crate) mod meta;
pub(crate) mod render;

pub(crate) use fetch::FetchArgs;
pub(crate) use meta::MetaArgs;
pub(crate) use render::RenderArgs;
