pub mod account;

pub mod auth;

pub mod bookings;

pub mod courses;

pub mod directory;

pub mod notifications;

pub mod system;

pub mod users;

pub mod frontend;

pub use account::configure_account_routes;
pub use auth::configure_auth_routes;
pub use bookings::configure_bookings_routes;
pub use courses::configure_courses_routes;
pub use directory::configure_directory_routes;
pub use frontend::configure_frontend_routes;
pub use notifications::configure_notifications_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
