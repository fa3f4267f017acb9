//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod cache;
mod mailer;
mod media;
mod repository;
mod session;

pub use cache::{Cache, CacheError};
pub use mailer::{MailError, MailMessage, Mailer};
pub use media::{ImageUpload, MediaError, MediaStore, UploadError, UploadPolicy};
pub use repository::PostRepository;
pub use session::{SessionError, SessionStore};
