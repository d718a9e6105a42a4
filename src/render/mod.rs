pub mod composite;
pub(crate) mod pipeline;
pub mod post;
