// VisionCraft - Core Library
//
// Data model, image intake, request composition, error taxonomy and the
// session controller. Network access lives in the gemini-client crate.

pub mod composer;
pub mod controller;
pub mod credentials;
pub mod errors;
pub mod intake;
pub mod models;
pub mod validation;

pub use composer::*;
pub use controller::*;
pub use credentials::*;
pub use errors::*;
pub use intake::*;
pub use models::*;
pub use validation::*;
