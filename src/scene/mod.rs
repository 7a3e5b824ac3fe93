pub(crate) mod clips;
pub(crate) mod model;
