// btree-persist/src/error.rs

use thiserror::Error;

/// Boxed failure raised by an item codec.
pub type BoxedCodecError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for saving and loading trees.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to write to stream: {0}")]
    IoWrite(#[source] std::io::Error),

    #[error("Failed to read from stream: {0}")]
    IoRead(#[source] std::io::Error),

    #[error("Item codec failed to encode an item: {0}")]
    ItemEncode(#[source] BoxedCodecError),

    #[error("Item codec failed to decode an item: {0}")]
    ItemDecode(#[source] BoxedCodecError),

    #[error("Node holds {items} items, the format allows at most 255")]
    NodeTooLarge { items: usize },

    #[error("Tree is deeper than the configured limit of {max_depth} levels")]
    TooDeep { max_depth: usize },

    #[error("Invalid tree header: {0}")]
    InvalidHeader(String),

    #[error("Invalid node: {0}")]
    InvalidNode(String),
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistError>;

/// Errors raised by the stock item codecs in [`crate::codec`].
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bincode serialization/deserialization error: {source}")]
    Bincode {
        #[from]
        source: bincode::Error,
    },

    #[error("Item payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Item payload of {len} bytes does not fit a u32 length prefix")]
    LengthOverflow { len: usize },
}
