pub mod ast;
pub mod builtins;
pub mod eval;
pub mod label;
pub mod provider;
pub mod value;

pub use label::Label;
pub use provider::{ProviderSource, resolve_dataset_names, resolve_provider_labels};
