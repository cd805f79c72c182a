// handlers/mod.rs - one module per resource
//
// Every handler follows the same shape: extract path/body, open a request
// transaction, run existence checks and validation through the services,
// commit once, and return JSON. Failures convert into ApiError via `?`.

pub mod favorites;
pub mod people;
pub mod planets;
pub mod root;
pub mod users;
