//! # Chunk Id Module
//!
//! Chunks are identified by the string `"<worldX>,<worldZ>"`, where the two numbers are
//! the chunk's integer world-space origin. The format is stable so debug tooling can
//! print and parse it.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors produced when parsing a chunk id.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChunkIdError {
    #[error("chunk id `{0}` is missing the `,` separator")]
    MissingSeparator(String),
    #[error("chunk id `{id}` has an invalid coordinate `{coordinate}`")]
    InvalidCoordinate { id: String, coordinate: String },
}

/// Stable identifier of a chunk, derived from its world origin.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(String);

impl ChunkId {
    /// Builds the id of the chunk whose origin is `(world_x, world_z)`.
    pub fn from_origin(world_x: i32, world_z: i32) -> Self {
        ChunkId(format!("{},{}", world_x, world_z))
    }

    /// Decodes the world origin encoded in this id.
    pub fn origin(&self) -> (i32, i32) {
        // Ids can only be built through `from_origin` or a successful parse.
        parse_origin(&self.0).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChunkId {
    type Err = ChunkIdError;

    /// Parses and normalises an id, so `" 16, -32"` becomes `"16,-32"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, z) = parse_origin(s)?;
        Ok(ChunkId::from_origin(x, z))
    }
}

fn parse_origin(id: &str) -> Result<(i32, i32), ChunkIdError> {
    let (x, z) = id
        .split_once(',')
        .ok_or_else(|| ChunkIdError::MissingSeparator(id.to_string()))?;

    let parse = |coordinate: &str| {
        coordinate
            .trim()
            .parse::<i32>()
            .map_err(|_| ChunkIdError::InvalidCoordinate {
                id: id.to_string(),
                coordinate: coordinate.to_string(),
            })
    };

    Ok((parse(x)?, parse(z)?))
}
