pub mod http_rule;
pub mod naming;
pub mod registry;

pub use registry::Registry;
