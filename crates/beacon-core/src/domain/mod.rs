//! Domain entities - the core business objects.

mod forms;

mod post;

pub use forms::{FormField, FormRegistry, FormSpec, escape_html};
pub use post::{PLACEHOLDER_IMAGE_URL, Post, PostDraft, is_absolute_http_url};
