//! Byte-level data sources behind the repositories.

pub mod file;
pub mod local;
pub mod remote;
pub mod snapshot;

pub use file::FileRemoteDataSource;
pub use local::{
    EntityKind, InMemoryLocalDataSource, LocalDataSource, LocalStore, WritableLocalDataSource,
};
pub use remote::{
    LeagueDataSource, PlayerProfileSource, RemoteDataSource, RemoteSources, TeamProfileSource,
};
pub use snapshot::SnapshotLocalDataSource;
