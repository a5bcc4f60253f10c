pub mod menu;
pub mod music;
pub mod nav;
pub mod orders;
pub mod session;
pub mod shopping;
