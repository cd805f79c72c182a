pub mod favorite_service;
pub mod people_service;
pub mod planet_service;
pub mod user_service;

pub use favorite_service::{FavoriteService, UserFavorites};
pub use people_service::PeopleService;
pub use planet_service::PlanetService;
pub use user_service::UserService;
