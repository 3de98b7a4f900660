//! Error types for the ifoodapp client.
//!
//! Every fallible operation returns [`Error`], categorized by [`ErrorKind`].
//!
//! ## List screens never fail hard
//!
//! A failed list fetch is not propagated out of the
//! [`ListSyncController`](crate::list_sync::ListSyncController) as a panic or a
//! torn state. The error is stored on the list and exposed through
//! [`ListState::error`](crate::list_sync::ListState::error) so the view can
//! render a warning in place of the table:
//!
//! ```rust,ignore
//! controller.refresh().await;
//! if let Some(err) = controller.state().error() {
//!     eprintln!("could not load dishes: {}", err);
//! }
//! ```
//!
//! Malformed pagination headers are not errors at all: they degrade to an
//! empty link set and a total count of zero.

mod core;
mod kind;

pub use self::core::Error;
pub use self::kind::ErrorKind;

/// A specialized `Result` type for ifoodapp operations.
pub type Result<T> = std::result::Result<T, Error>;
