pub mod session;

pub use session::{get_current_user_id, is_logged_in, set_user_session};
