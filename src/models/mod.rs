pub mod batch;
pub mod credential;
pub mod loaders;
pub mod product;
pub mod record;

pub use batch::Batch;
pub use credential::{assign_credential, CredentialPair};
pub use loaders::{extract_identifiers, list_batches, load_credentials};
pub use product::ProductDetailsResponse;
pub use record::{FailureRecord, OutputRow, OUTPUT_HEADERS};
