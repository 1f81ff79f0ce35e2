// * Browser header profile generation
// * Identity selection, derived field synthesis, and header-set assembly

pub mod derive;
pub mod errors;
pub mod identity;
pub mod profile;

// * Re-exports for convenient access
pub use errors::HeaderError;
pub use identity::{select_identity, Browser, BrowserFamily, BrowserIdentity};
pub use profile::{HeaderProfile, HeaderProfileBuilder, HeaderSet};
