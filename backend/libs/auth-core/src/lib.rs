/// Shared authentication library for the ads backend
///
/// Provides JWT token issuance/validation, the user role enumeration, and
/// the actix extractor that resolves the acting `(identity, role)` pair for
/// a request.
///
/// ## Modules
///
/// - `jwt`: HS256 token pair generation and validation
/// - `role`: user role enumeration
/// - `extract`: `AuthenticatedUser` request extractor
pub mod extract;
pub mod jwt;
pub mod role;

// Re-export commonly used types
pub use extract::AuthenticatedUser;
pub use jwt::{Claims, TokenPair};
pub use role::UserRole;
