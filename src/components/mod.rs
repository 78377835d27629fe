pub mod confirm_delete;
pub mod login;
pub mod month_view;
pub mod name_form;
pub mod selector_bar;
pub mod status_bar;
pub mod tab_bar;

pub use confirm_delete::ConfirmDelete;
pub use login::Login;
pub use month_view::MonthView;
pub use name_form::NameForm;
pub use selector_bar::SelectorBar;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;
