#![allow(clippy::missing_errors_doc)]

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use maze_search_core::{GridError, Tile};
use maze_search_world::{query, Maze};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SNAPSHOT_DOMAIN: &str = "maze";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded layout payload.
pub(crate) const SNAPSHOT_HEADER: &str = "maze:v1";
/// Delimiter used to separate the prefix, grid size and payload.
const FIELD_DELIMITER: char = ':';

/// Flat description of a maze: grid size, endpoints and walls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct MazeLayout {
    /// Number of tiles along each side of the grid.
    pub(crate) side_length: u32,
    /// Tile searches depart from.
    pub(crate) start: Tile,
    /// Tile searches try to reach.
    pub(crate) goal: Tile,
    /// Walled tiles in sorted order.
    pub(crate) walls: Vec<Tile>,
}

impl MazeLayout {
    /// Captures the layout of an existing maze.
    #[must_use]
    pub(crate) fn from_maze(maze: &Maze) -> Self {
        Self {
            side_length: query::side_length(maze),
            start: query::start(maze),
            goal: query::goal(maze),
            walls: query::walls(maze).iter().copied().collect(),
        }
    }

    /// Rebuilds a maze, validating every tile against the grid size.
    pub(crate) fn into_maze(self) -> Result<Maze, GridError> {
        Maze::from_parts(self.side_length, self.start, self.goal, self.walls)
    }

    /// Encodes the layout into a single-line string suitable for clipboard transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializableLayout {
            start: self.start,
            goal: self.goal,
            walls: self.walls.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("layout serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        let side = self.side_length;
        format!("{SNAPSHOT_HEADER}:{side}x{side}:{encoded}")
    }

    /// Decodes a layout from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let dimensions = parts.next().ok_or(LayoutTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;
        if parts.next().is_some() {
            return Err(LayoutTransferError::TrailingFields);
        }

        if domain != SNAPSHOT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let side_length = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let decoded: SerializableLayout =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        Ok(Self {
            side_length,
            start: decoded.start,
            goal: decoded.goal,
            walls: decoded.walls,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableLayout {
    start: Tile,
    goal: Tile,
    walls: Vec<Tile>,
}

/// Errors that can occur while decoding layout transfer strings.
#[derive(Debug, Error)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("layout string was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded layout.
    #[error("layout string is missing the prefix")]
    MissingPrefix,
    /// The encoded layout did not contain a version segment.
    #[error("layout string is missing the version")]
    MissingVersion,
    /// The encoded layout did not include the grid size.
    #[error("layout string is missing the grid size")]
    MissingDimensions,
    /// The encoded layout did not include the payload segment.
    #[error("layout string is missing the payload")]
    MissingPayload,
    /// The encoded layout carried fields after the payload.
    #[error("layout string has unexpected fields after the payload")]
    TrailingFields,
    /// The encoded layout used an unexpected prefix segment.
    #[error("layout prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded layout used an unsupported version identifier.
    #[error("layout version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid size could not be parsed or does not describe a square grid.
    #[error("could not parse square grid size '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode layout payload")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse layout payload")]
    InvalidPayload(#[source] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<u32, LayoutTransferError> {
    let invalid = || LayoutTransferError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;

    if columns == 0 || columns != rows {
        return Err(invalid());
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_layout() -> MazeLayout {
        MazeLayout {
            side_length: 6,
            start: Tile::new(1, 1),
            goal: Tile::new(4, 4),
            walls: vec![Tile::new(0, 0), Tile::new(2, 3), Tile::new(5, 1)],
        }
    }

    #[test]
    fn round_trip_populated_layout() {
        let layout = sample_layout();

        let encoded = layout.encode();
        assert!(encoded.starts_with(&format!("{SNAPSHOT_HEADER}:6x6:")));

        let decoded = MazeLayout::decode(&encoded).expect("layout decodes");
        assert_eq!(layout, decoded);
    }

    #[test]
    fn layout_survives_maze_conversion() {
        let maze = Maze::with_border(7).expect("valid size");

        let layout = MazeLayout::from_maze(&maze);
        assert_eq!(layout.walls.len(), 24);
        assert!(layout.walls.windows(2).all(|pair| pair[0] < pair[1]));

        let restored = layout.into_maze().expect("valid layout");
        assert_eq!(restored, maze);
    }

    #[test]
    fn json_form_is_flat() {
        let json = serde_json::to_value(sample_layout()).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "side_length": 6,
                "start": [1, 1],
                "goal": [4, 4],
                "walls": [[0, 0], [2, 3], [5, 1]],
            })
        );
    }

    #[test]
    fn decode_rejects_foreign_headers() {
        assert!(matches!(
            MazeLayout::decode("   "),
            Err(LayoutTransferError::EmptyPayload)
        ));
        assert!(matches!(
            MazeLayout::decode("tower:v1:5x5:e30"),
            Err(LayoutTransferError::InvalidPrefix(prefix)) if prefix == "tower"
        ));
        assert!(matches!(
            MazeLayout::decode("maze:v2:5x5:e30"),
            Err(LayoutTransferError::UnsupportedVersion(version)) if version == "v2"
        ));
        assert!(matches!(
            MazeLayout::decode("maze"),
            Err(LayoutTransferError::MissingVersion)
        ));
        assert!(matches!(
            MazeLayout::decode("maze:v1"),
            Err(LayoutTransferError::MissingDimensions)
        ));
        assert!(matches!(
            MazeLayout::decode("maze:v1:5x5"),
            Err(LayoutTransferError::MissingPayload)
        ));
    }

    #[test]
    fn decode_rejects_fields_after_the_payload() {
        let encoded = sample_layout().encode();
        assert!(MazeLayout::decode(&encoded).is_ok());

        assert!(matches!(
            MazeLayout::decode(&format!("{encoded}:junk")),
            Err(LayoutTransferError::TrailingFields)
        ));
    }

    #[test]
    fn oversized_grid_fails_conversion() {
        let layout = MazeLayout {
            side_length: 3_000_000_000,
            start: Tile::new(0, 0),
            goal: Tile::new(1, 1),
            walls: Vec::new(),
        };

        let decoded = MazeLayout::decode(&layout.encode()).expect("header is well formed");
        assert_eq!(
            decoded.into_maze(),
            Err(GridError::InvalidSideLength {
                side_length: 3_000_000_000
            })
        );
    }

    #[test]
    fn decode_requires_square_grid() {
        let encoded = sample_layout().encode().replace("6x6", "6x4");
        assert!(matches!(
            MazeLayout::decode(&encoded),
            Err(LayoutTransferError::InvalidDimensions(size)) if size == "6x4"
        ));

        let encoded = sample_layout().encode().replace("6x6", "0x0");
        assert!(matches!(
            MazeLayout::decode(&encoded),
            Err(LayoutTransferError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn decode_rejects_malformed_payloads() {
        assert!(matches!(
            MazeLayout::decode("maze:v1:5x5:***"),
            Err(LayoutTransferError::InvalidEncoding(_))
        ));

        let malformed_tile = STANDARD_NO_PAD.encode(r#"{"start":[1],"goal":[2,2],"walls":[]}"#);
        assert!(matches!(
            MazeLayout::decode(&format!("maze:v1:5x5:{malformed_tile}")),
            Err(LayoutTransferError::InvalidPayload(_))
        ));
    }

    #[test]
    fn out_of_bounds_walls_fail_conversion() {
        let mut layout = sample_layout();
        layout.walls.push(Tile::new(6, 0));

        assert_eq!(
            layout.into_maze(),
            Err(GridError::InvalidTile {
                tile: Tile::new(6, 0),
                side_length: 6,
            })
        );
    }
}
