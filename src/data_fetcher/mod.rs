pub mod api;
pub mod cache;
pub mod dto;
pub mod sources;
pub mod storage;

pub use api::HttpRemoteDataSource;
pub use cache::{CacheService, CacheServiceExt, CachedValue, Cacheable, MemoryCache};
pub use dto::{IntoDomain, MappingError};
pub use sources::{
    EntityKind, FileRemoteDataSource, InMemoryLocalDataSource, LocalDataSource, LocalStore,
    RemoteDataSource, RemoteSources, SnapshotLocalDataSource, WritableLocalDataSource,
};
pub use storage::{InMemoryStorage, JsonFileStorage, StorageService, StorageServiceExt};
