use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::cache::errors::CacheError;

pub trait ValueSerializer: Send + Sync {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CacheError>;

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CacheError>;
}
