//! Toggle Xamarin PCL profiles on and off by renaming their
//! `Xamarin.*.xml` metadata files to and from `*.xml.disabled`.

pub mod cancel;
pub mod config;
pub mod engine;
pub mod error;
pub mod fs;
pub mod pattern;
pub mod result;
pub mod utils;
pub mod worker;

pub use cancel::CancelFlag;
pub use engine::{ToggleEngine, ToggleEvent};
pub use error::{Error, Result};
pub use result::{Failure, FailureReason, ToggleMode, ToggleRequest, ToggleResult};
