/// Command handlers (`/start`, `/help`)
pub mod handlers;
/// Inline query handler
pub mod inline;
