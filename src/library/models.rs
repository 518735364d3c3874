//! Library entities and the request bodies that create or replace them.

use crate::validation::{InputSchema, ObjectReader, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub grammy: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub name: String,
    pub year: i64,
    pub artist_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist_id: Option<String>,
    pub album_id: Option<String>,
    /// Seconds.
    pub duration: i64,
}

/// The resolved favorites of the library.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorites {
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub tracks: Vec<Track>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FavoriteKind {
    Artist,
    Album,
    Track,
}

impl FavoriteKind {
    /// Value stored in the `entity_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteKind::Artist => "artist",
            FavoriteKind::Album => "album",
            FavoriteKind::Track => "track",
        }
    }

    /// Capitalized name used in user facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            FavoriteKind::Artist => "Artist",
            FavoriteKind::Album => "Album",
            FavoriteKind::Track => "Track",
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FavoriteKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artist" => Ok(FavoriteKind::Artist),
            "album" => Ok(FavoriteKind::Album),
            "track" => Ok(FavoriteKind::Track),
            other => anyhow::bail!("Unknown favorite entity type '{}'", other),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub grammy: bool,
}

impl InputSchema for ArtistInput {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = ObjectReader::new(value)?;
        let input = ArtistInput {
            name: reader.required_string("name"),
            grammy: reader.required_bool("grammy"),
        };
        reader.finish(input)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumInput {
    pub name: String,
    pub year: i64,
    pub artist_id: Option<String>,
}

impl InputSchema for AlbumInput {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = ObjectReader::new(value)?;
        let input = AlbumInput {
            name: reader.required_string("name"),
            year: reader.required_integer("year"),
            artist_id: reader.optional_string("artistId"),
        };
        reader.finish(input)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackInput {
    pub name: String,
    pub artist_id: Option<String>,
    pub album_id: Option<String>,
    pub duration: i64,
}

impl InputSchema for TrackInput {
    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = ObjectReader::new(value)?;
        let input = TrackInput {
            name: reader.required_string("name"),
            artist_id: reader.optional_string("artistId"),
            album_id: reader.optional_string("albumId"),
            duration: reader.required_integer("duration"),
        };
        reader.finish(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn track_serializes_camel_case() {
        let track = Track {
            id: "t".to_string(),
            name: "Song".to_string(),
            artist_id: None,
            album_id: Some("a".to_string()),
            duration: 180,
        };
        assert_eq!(
            serde_json::to_value(&track).unwrap(),
            json!({"id": "t", "name": "Song", "artistId": null, "albumId": "a", "duration": 180})
        );
    }

    #[test]
    fn artist_input_requires_grammy() {
        let err = ArtistInput::from_json(&json!({"name": "Queen"}))
            .err()
            .unwrap();
        assert_eq!(err.violations, vec!["grammy must be a boolean value"]);
    }

    #[test]
    fn album_input_accepts_missing_artist() {
        let input = AlbumInput::from_json(&json!({"name": "Jazz", "year": 1978})).unwrap();
        assert_eq!(input.artist_id, None);
    }

    #[test]
    fn track_input_rejects_unknown_property() {
        let err = TrackInput::from_json(&json!({"name": "x", "duration": 3, "genre": "rock"}))
            .err()
            .unwrap();
        assert_eq!(err.violations, vec!["property genre should not exist"]);
    }

    #[test]
    fn favorite_kind_round_trips_through_str() {
        for kind in [FavoriteKind::Artist, FavoriteKind::Album, FavoriteKind::Track] {
            assert_eq!(kind.as_str().parse::<FavoriteKind>().unwrap(), kind);
        }
        assert!("playlist".parse::<FavoriteKind>().is_err());
    }
}
