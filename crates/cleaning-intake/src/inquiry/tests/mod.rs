pub(crate) mod common;
mod schema;
