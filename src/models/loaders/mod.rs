pub mod batch_loader;
pub mod credential_loader;

pub use batch_loader::{extract_identifiers, list_batches};
pub use credential_loader::load_credentials;
