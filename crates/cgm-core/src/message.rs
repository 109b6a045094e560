//! Inbound graph update payload
//!
//! The phone sends readings as a keyed dictionary. Decoding the transport
//! format is the host's job; this module only pulls the graph fields out of
//! an already-decoded [`Dictionary`].

use thiserror_no_std::Error;

/// Age of the newest reading in seconds (`Int32`, optional)
pub const APP_KEY_RECENCY: u32 = 1;

/// Number of readings in [`APP_KEY_SGVS`] (`Int32`)
pub const APP_KEY_SGV_COUNT: u32 = 2;

/// Readings, newest first, one byte each (`Bytes`)
pub const APP_KEY_SGVS: u32 = 3;

/// Error types for payload extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MessageError {
    /// A required key is absent
    #[error("Missing key: {key}")]
    MissingKey {
        /// The absent key
        key: u32,
    },

    /// A key holds a value of the wrong type
    #[error("Unexpected value type for key: {key}")]
    UnexpectedType {
        /// The offending key
        key: u32,
    },
}

/// Result type for payload extraction
pub type MessageResult<T> = Result<T, MessageError>;

/// A decoded dictionary value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictValue<'a> {
    /// Signed 32-bit integer
    Int32(i32),
    /// Raw byte array
    Bytes(&'a [u8]),
}

/// Read access to a decoded app message
pub trait Dictionary {
    /// Look up the value stored under `key`
    fn find(&self, key: u32) -> Option<DictValue<'_>>;
}

impl Dictionary for [(u32, DictValue<'_>)] {
    fn find(&self, key: u32) -> Option<DictValue<'_>> {
        self.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }
}

/// Graph fields of an update message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphUpdate<'a> {
    /// Reading count as sent, not yet clamped to the buffer capacity
    pub count: i32,
    /// Scaled readings, newest first
    pub sgvs: &'a [u8],
    /// Age of the newest reading in seconds, if the message carried it
    pub recency: Option<i32>,
}

impl<'a> GraphUpdate<'a> {
    /// Extract the graph fields from a decoded message
    pub fn from_dict<D: Dictionary + ?Sized>(dict: &'a D) -> MessageResult<Self> {
        let count = match dict.find(APP_KEY_SGV_COUNT) {
            Some(DictValue::Int32(count)) => count,
            Some(_) => {
                return Err(MessageError::UnexpectedType {
                    key: APP_KEY_SGV_COUNT,
                });
            }
            None => {
                return Err(MessageError::MissingKey {
                    key: APP_KEY_SGV_COUNT,
                });
            }
        };

        let sgvs = match dict.find(APP_KEY_SGVS) {
            Some(DictValue::Bytes(sgvs)) => sgvs,
            Some(_) => return Err(MessageError::UnexpectedType { key: APP_KEY_SGVS }),
            None => return Err(MessageError::MissingKey { key: APP_KEY_SGVS }),
        };

        let recency = match dict.find(APP_KEY_RECENCY) {
            Some(DictValue::Int32(recency)) => Some(recency),
            Some(_) => {
                return Err(MessageError::UnexpectedType {
                    key: APP_KEY_RECENCY,
                });
            }
            None => None,
        };

        Ok(Self {
            count,
            sgvs,
            recency,
        })
    }
}
