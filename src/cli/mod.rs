pub mod add;
pub mod categories;
pub mod edit;
pub mod home;
pub mod list;
pub mod months;
pub mod remove;
pub mod setup;
pub mod ui;
