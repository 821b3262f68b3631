pub mod providers;

pub use providers::{MovieProvider, RapidApiProvider, UpstreamParams};
