pub mod config;
pub mod network;
pub mod ops;

pub use network::{
    select_identity, Browser, BrowserFamily, BrowserIdentity, HeaderError, HeaderProfile,
    HeaderProfileBuilder, HeaderSet,
};
