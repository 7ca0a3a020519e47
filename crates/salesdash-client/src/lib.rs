pub mod analysis;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod dataset;
pub mod error;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult, LoadError};
