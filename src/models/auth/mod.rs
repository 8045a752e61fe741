pub mod requests;
pub mod responses;

pub use requests::{GuardQuery, LoginRequest, UpdateProfileRequest};
pub use responses::{GuardResponse, LoginResponse};
