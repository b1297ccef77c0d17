pub mod config;
pub mod logging;

pub mod checksum;
pub mod http;
pub mod indicator;
pub mod lookup;
pub mod normalize;
pub mod validate;
