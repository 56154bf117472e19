pub mod advertisement;
pub mod review;
pub mod user;

pub use advertisement::{Advertisement, CreateAdvertisementRequest, UpdateAdvertisementRequest};
pub use review::{CreateReviewRequest, Review, UpdateReviewRequest};
pub use user::{
    LoginRequest, NewUser, PublicUser, RefreshTokenRequest, RegisterRequest,
    RequestPasswordResetRequest, ResetPasswordRequest, UpdateProfileRequest, User,
};
