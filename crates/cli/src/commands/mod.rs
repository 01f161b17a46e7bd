pub(crate) mod groups;
pub(crate) mod serve;
