pub mod collection;
pub mod grid;
pub mod session;
pub mod store;
pub mod view;

pub use session::{Outcome, Session};
pub use store::{Store, StoreError};
pub use view::ConfirmDeleteViewModel;
