pub mod contact;
pub mod content;
pub mod mailer;
pub mod pages;
pub mod templates;
