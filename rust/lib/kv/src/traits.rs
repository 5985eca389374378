use crate::error::KVError;

/// KVStore provides a byte-oriented key-value storage interface.
///
/// Keys are namespaced: a worksheet lives under `sheet:{store_id}:{worksheet}`.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;
}
