//! Genesys Cloud endpoint constants

/// Region domain used when none is configured (US East)
pub const DEFAULT_REGION: &str = "mypurecloud.com";

pub const TOKEN_PATH: &str = "/oauth/token";
pub const USERS_SEARCH_PATH: &str = "/api/v2/users/search";
pub const ROUTING_USERS_PATH: &str = "/api/v2/routing/users";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const USER_AGENT: &str = concat!("utilization-cli/", env!("CARGO_PKG_VERSION"));
