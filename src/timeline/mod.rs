pub(crate) mod reveal;
pub(crate) mod schedule;
