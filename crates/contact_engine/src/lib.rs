//! Contact engine: delivery collaborator, submission runner and state files.
mod deliver;
mod engine;
mod persist;
mod submit;
mod types;

pub use deliver::{Deliverer, DeliverySettings, EmailJsDeliverer, EMAILJS_ENDPOINT};
pub use engine::EngineHandle;
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use submit::ContactSubmitter;
pub use types::{DeliveryError, EngineEvent, FailureKind, SettingsError};
