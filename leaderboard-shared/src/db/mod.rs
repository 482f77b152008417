/// Database plumbing
///
/// - `pool`: PostgreSQL connection pool with health check
/// - `migrations`: embedded schema migrations
///
/// Table-level operations live next to their records in `models`.

pub mod migrations;
pub mod pool;
