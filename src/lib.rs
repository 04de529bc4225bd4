//! Fluent card builder and workflow templates for Lark webhook
//! notifications.
//!
//! Cards are assembled with [`CardBuilder`], either directly or through the
//! pre-built factories in [`templates`], then posted to a bot webhook with
//! [`LarkNotifier`]:
//!
//! ```
//! use lark_notify::CardBuilder;
//!
//! # fn main() -> Result<(), lark_notify::BuildError> {
//! let card = CardBuilder::new()
//!     .header("Task Complete", Some("success"), None, None)
//!     .metadata("Task Name", "data-processing")?
//!     .metadata("Duration", "5 minutes")?
//!     .build()?;
//! assert_eq!(card.header().template(), "green");
//! # Ok(())
//! # }
//! ```

pub mod blocks;
pub mod builder;
pub mod card;
pub mod notify;
pub mod status;
pub mod templates;

pub use builder::{BuildError, CardBuilder, DEFAULT_LANGUAGE};
pub use card::{Card, SCHEMA_VERSION};
pub use notify::{Ack, LarkNotifier, NotifyError};
pub use status::status_color;
