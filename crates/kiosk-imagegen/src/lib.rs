//! Image generation clients.
//!
//! [`ImageGenerator`] is the seam the service calls. [`OpenAiImages`] talks to
//! an OpenAI-compatible `/images/generations` endpoint; [`FixedImageGenerator`]
//! returns a canned URL for tests and offline runs.

pub mod error;
pub mod fixed;
pub mod openai;
pub mod traits;

pub use error::{ImageGenError, ImageGenResult};
pub use fixed::FixedImageGenerator;
pub use openai::{OpenAiConfig, OpenAiImages};
pub use traits::{ImageGenerator, ImageRequest};
