pub mod example;
pub mod flashcard;
pub mod list;
pub mod user;

pub use example::ExampleRepository;
pub use flashcard::FlashcardRepository;
pub use list::ListRepository;
pub use user::UserRepository;
