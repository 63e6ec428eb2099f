pub mod auth_models;
pub mod example_models;
pub mod flashcard_models;
pub mod list_models;
pub mod user_models;

pub use auth_models::{LoginError, LoginForm, RegisterError, RegisterForm};
pub use example_models::{
    Example, ExampleError, ExamplesResponse, FlashcardWithExamples, GenerateExamplesRequest,
};
pub use flashcard_models::{
    CreateFlashcardRequest, Flashcard, FlashcardError, FlashcardRow, NewFlashcard,
};
pub use list_models::{
    ApiResponse, CreateListRequest, List, ListError, ListWithFlashcards, UpdateListRequest,
};
pub use user_models::{NewUser, User, UserResponse};
