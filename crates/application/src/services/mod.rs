pub mod probe_name;

pub use probe_name::probe_domain;
