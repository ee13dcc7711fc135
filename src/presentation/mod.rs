//! Terminal rendering of the user directory: a paginated table, a profile
//! view and a create form, driven by a [`Session`] over any [`UserApi`].
//!
//! [`UserApi`]: crate::client::UserApi

mod form;
mod notice;
mod profile;
mod session;
mod table;

pub use form::CreateUserForm;
pub use notice::Notice;
pub use profile::render_profile;
pub use session::{Session, View, PAGE_SIZE};
pub use table::render_user_table;
