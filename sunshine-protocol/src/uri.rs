//! Data item URIs
//!
//! A URI names the node that owns an item and the item's path. The node
//! id doubles as the reply address for acknowledgments.

use core::fmt::{self, Write};

use heapless::String;

use crate::DecodeError;

/// URI scheme for data items
pub const SCHEME: &str = "wear://";

/// Maximum node id length
pub const MAX_NODE_LEN: usize = 32;

/// Maximum item path length
pub const MAX_PATH_LEN: usize = 32;

/// Maximum rendered URI length (scheme + node + path)
pub const MAX_URI_LEN: usize = SCHEME.len() + MAX_NODE_LEN + MAX_PATH_LEN;

/// Address of a data item
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataUri {
    node: String<MAX_NODE_LEN>,
    path: String<MAX_PATH_LEN>,
}

impl DataUri {
    /// Build a URI from a node id and a path
    pub fn new(node: &str, path: &str) -> Result<Self, DecodeError> {
        if node.is_empty() {
            return Err(DecodeError::MissingHost);
        }
        Ok(Self {
            node: String::try_from(node).map_err(|_| DecodeError::BufferOverflow)?,
            path: String::try_from(path).map_err(|_| DecodeError::BufferOverflow)?,
        })
    }

    /// Parse a rendered URI such as `wear://node-1/temp`
    ///
    /// A URI without a path yields an empty path.
    pub fn parse(uri: &str) -> Result<Self, DecodeError> {
        let rest = uri.strip_prefix(SCHEME).ok_or(DecodeError::MissingScheme)?;
        let (node, path) = match rest.find('/') {
            Some(split) => rest.split_at(split),
            None => (rest, ""),
        };
        Self::new(node, path)
    }

    /// Node id of the peer that owns this item
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Item path, including the leading `/`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Render the URI into a fixed-capacity string
    pub fn to_heapless(&self) -> String<MAX_URI_LEN> {
        let mut out = String::new();
        // Capacity covers the longest node and path, so this cannot fail
        let _ = write!(out, "{}", self);
        out
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", SCHEME, self.node, self.path)
    }
}
