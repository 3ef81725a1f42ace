//! Small building blocks shared by the windows

pub mod rating_dialog;
pub mod speech_bubble;
pub mod title_bar;

pub use title_bar::TitleBar;
