//! Selection, filtering and windowing core.
//!
//! # Overview
//!
//! This module holds everything about picking that does not touch the
//! terminal:
//! - [`choice`]: the identity-stable [`ChoiceStore`]
//! - [`filter`]: substring filtering ([`ChoiceStore::apply_query`])
//! - [`navigator`]: clamped movement ([`ChoiceStore::move_selection`])
//! - [`viewport`]: the render window and page size
//! - [`session`]: choices, query and outcome of one session
//!
//! # Example
//!
//! ```
//! use listpick::picker::Session;
//!
//! let mut session = Session::new(["apple", "banana", "cherry"]).unwrap();
//! session.push_char('a');
//! session.push_char('n');
//! session.confirm();
//!
//! let picked = session.result().unwrap();
//! assert_eq!((picked.value.as_str(), picked.id), ("banana", 1));
//! ```

pub mod choice;
pub mod filter;
pub mod navigator;
pub mod session;
pub mod viewport;

pub use choice::{Choice, ChoiceStore};
pub use navigator::Direction;
pub use session::{Outcome, Picked, Session};
pub use viewport::{compute_page_size, Viewport};
