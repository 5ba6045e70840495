// Admin-only reporting: usage analytics and the user CSV export.
// Every route checks the `x-admin-token` header first.

pub mod analytics;
pub mod auth;
pub mod export;
pub mod handlers;
