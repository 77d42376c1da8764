/// Metadata trailing every cache file written by the file backend.
///
/// Layout: `payload`, then the space separated tags, then the expiry
/// timestamp padded to 14 characters, then the payload length padded to
/// 10 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub tags: Vec<String>,
    pub expiry: u64,
    pub data_size: u64,
}
