#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use fuse_grid_core::{GridSize, Score, TileValue};
use serde::{Deserialize, Serialize};

const SNAPSHOT_DOMAIN: &str = "fuse";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "fuse:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Snapshot of a game in progress: grid contents plus the running score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct GameSnapshot {
    /// Side length of the square grid.
    pub(crate) size: u32,
    /// Grid contents in row-major order.
    pub(crate) cells: Vec<Option<TileValue>>,
    /// Running score total at capture time.
    pub(crate) score: Score,
}

impl GameSnapshot {
    /// Encodes the snapshot into a single-line string suitable for clipboard
    /// transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializableSnapshot {
            cells: self.cells.clone(),
            score: self.score,
        };
        let json = serde_json::to_vec(&payload).expect("game snapshot serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{SNAPSHOT_HEADER}:{}x{}:{encoded}", self.size, self.size)
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, SnapshotTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SnapshotTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(SnapshotTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(SnapshotTransferError::MissingVersion)?;
        let dimensions = parts
            .next()
            .ok_or(SnapshotTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(SnapshotTransferError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(SnapshotTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotTransferError::UnsupportedVersion(
                version.to_owned(),
            ));
        }

        let size = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(SnapshotTransferError::InvalidEncoding)?;
        let decoded: SerializableSnapshot =
            serde_json::from_slice(&bytes).map_err(SnapshotTransferError::InvalidPayload)?;

        let expected = size.cell_count();
        if decoded.cells.len() != expected {
            return Err(SnapshotTransferError::WrongCellCount {
                expected,
                actual: decoded.cells.len(),
            });
        }

        Ok(Self {
            size: size.get(),
            cells: decoded.cells,
            score: decoded.score,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableSnapshot {
    cells: Vec<Option<TileValue>>,
    score: Score,
}

/// Errors that can occur while decoding snapshot transfer strings.
#[derive(Debug)]
pub(crate) enum SnapshotTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    MissingVersion,
    /// The encoded snapshot did not include grid dimensions.
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed or cannot host a game.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
    /// The payload cell count disagreed with the declared dimensions.
    WrongCellCount {
        /// Cell count implied by the declared dimensions.
        expected: usize,
        /// Cell count actually present in the payload.
        actual: usize,
    },
}

impl fmt::Display for SnapshotTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "snapshot payload was empty"),
            Self::MissingPrefix => write!(f, "snapshot string is missing the prefix"),
            Self::MissingVersion => write!(f, "snapshot string is missing the version"),
            Self::MissingDimensions => write!(f, "snapshot string is missing the grid dimensions"),
            Self::MissingPayload => write!(f, "snapshot string is missing the payload"),
            Self::InvalidPrefix(prefix) => {
                write!(f, "snapshot prefix '{prefix}' is not supported")
            }
            Self::UnsupportedVersion(version) => {
                write!(f, "snapshot version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse grid dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode snapshot payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse snapshot payload: {error}")
            }
            Self::WrongCellCount { expected, actual } => {
                write!(
                    f,
                    "snapshot holds {actual} cells but the dimensions require {expected}"
                )
            }
        }
    }
}

impl Error for SnapshotTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<GridSize, SnapshotTransferError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| SnapshotTransferError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| SnapshotTransferError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| SnapshotTransferError::InvalidDimensions(dimensions.to_owned()))?;

    if columns != rows {
        return Err(SnapshotTransferError::InvalidDimensions(
            dimensions.to_owned(),
        ));
    }

    GridSize::new(columns)
        .map_err(|_| SnapshotTransferError::InvalidDimensions(dimensions.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_fresh_board() {
        let snapshot = GameSnapshot {
            size: 4,
            cells: vec![None; 16],
            score: Score::ZERO,
        };

        let encoded = snapshot.encode();
        assert!(encoded.starts_with(&format!("{SNAPSHOT_HEADER}:4x4:")));

        let decoded = GameSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn round_trip_populated_board() {
        let mut cells = vec![None; 16];
        cells[0] = TileValue::new(2);
        cells[5] = TileValue::new(64);
        cells[15] = TileValue::new(2048);
        let snapshot = GameSnapshot {
            size: 4,
            cells,
            score: Score::new(3116),
        };

        let encoded = snapshot.encode();
        let decoded = GameSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let snapshot = GameSnapshot {
            size: 4,
            cells: vec![None; 16],
            score: Score::ZERO,
        };
        let encoded = snapshot.encode().replace(":4x4:", ":4x5:");
        assert!(matches!(
            GameSnapshot::decode(&encoded),
            Err(SnapshotTransferError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        assert!(matches!(
            GameSnapshot::decode("fuse:v1:4x4"),
            Err(SnapshotTransferError::MissingPayload)
        ));
        assert!(matches!(
            GameSnapshot::decode("   "),
            Err(SnapshotTransferError::EmptyPayload)
        ));
        assert!(matches!(
            GameSnapshot::decode("grid:v1:4x4:e30"),
            Err(SnapshotTransferError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn rejects_wrong_cell_count() {
        let snapshot = GameSnapshot {
            size: 4,
            cells: vec![None; 16],
            score: Score::ZERO,
        };
        let encoded = snapshot.encode().replace(":4x4:", ":5x5:");
        assert!(matches!(
            GameSnapshot::decode(&encoded),
            Err(SnapshotTransferError::WrongCellCount { expected: 25, .. })
        ));
    }
}
