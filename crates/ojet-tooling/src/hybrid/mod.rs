//! Hybrid (Cordova) mobile app support

mod config_xml;
mod cordova;

pub use config_xml::ConfigXml;
pub use cordova::{HybridWrapper, ListKind, DEFAULT_PREFERENCES};
