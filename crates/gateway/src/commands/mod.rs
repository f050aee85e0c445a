//! Command implementations, one module per CLI subcommand.

pub mod create_superuser;
pub mod migrate;
pub mod seed;
pub mod serve;
