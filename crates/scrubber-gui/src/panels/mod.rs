pub mod menu_bar;
pub mod page;
pub mod status;
