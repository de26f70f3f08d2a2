pub(crate) mod elapsed;
pub(crate) mod frame;
pub(crate) mod virtual_clock;
