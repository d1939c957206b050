//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod languages;

pub(crate) use convert::ConvertArgs;
