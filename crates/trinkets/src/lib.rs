#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::doc_markdown)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Trinkets
//!
//! Reusable widgets for [`tea`] terminal applications:
//!
//! - **binding** - key binding definitions and matching
//! - **textinput** - single-line text input
//! - **spinner** - animated loading indicator
//! - **paginator** - page arithmetic and pagination display
//! - **table** - sortable, selectable data table with a skeleton
//!   loading state
//!
//! Widgets own their local state and expose `update`/`view` methods the
//! host model calls from its own update and view functions.
//!
//! ## Example
//!
//! ```rust
//! use trinkets::paginator::Paginator;
//!
//! let mut pager = Paginator::new().per_page(10);
//! pager.set_total_items(35);
//! assert_eq!(pager.total_pages(), 4);
//! assert_eq!(pager.offset(), 0);
//! ```

pub mod binding;
pub mod paginator;
pub mod spinner;
pub mod table;
pub mod textinput;

pub use binding::{Binding, matches};
pub use paginator::Paginator;
pub use spinner::{Spinner, SpinnerModel};
pub use table::{Column, Row, Table};
pub use textinput::TextInput;
