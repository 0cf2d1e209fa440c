pub mod authorizer;
pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod utils;

pub use authorizer::{authorize_request, AuthorizerRequest, AuthorizerResponse};
pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
pub use utils::{authorize, Capability};
