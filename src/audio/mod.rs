pub(crate) mod compose;
pub(crate) mod media;
pub(crate) mod mix;
