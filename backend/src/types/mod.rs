mod environment;
mod error;
mod extractors;

pub use environment::{Environment, SpotifyCredentials};
pub use error::{ApiErrorResponse, AppError};
pub use extractors::{non_blank, ValidatedJson};
