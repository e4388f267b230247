//! Per-resource API controllers.

mod base;
mod pet;
mod store;
mod user;

pub use base::BaseController;
pub use pet::PetController;
pub use store::StoreController;
pub use user::UserController;
