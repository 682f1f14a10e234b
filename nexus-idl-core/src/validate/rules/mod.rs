pub(crate) mod document;
pub(crate) mod names;
pub(crate) mod service;
pub(crate) mod types;
