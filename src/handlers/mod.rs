pub mod auth;
pub mod examples;
pub mod flashcards;
pub mod lists;
pub mod translation;
