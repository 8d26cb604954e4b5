//! Configuration module

mod site;

pub use site::GateConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
