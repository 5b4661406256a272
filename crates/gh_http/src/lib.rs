pub mod exec;
pub mod model;
pub mod token;

pub use exec::{HttpExec, ReqwestExecutor};
pub use model::{parse_rate_limit, RateLimitUpdate};
pub use token::GithubToken;
