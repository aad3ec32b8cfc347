// Cross-cutting HTTP layers applied by `routes::build_router`.

pub mod cors;
pub mod rate_limit;
pub mod security_headers;
