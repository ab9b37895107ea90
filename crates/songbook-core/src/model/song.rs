use serde::{Deserialize, Serialize};

use super::entity::{check_row_shape, Entity};
use crate::errors::Result;

/// Song - a track persisted as one row of the `songs` table
///
/// A freshly built Song has no identity. The identity is filled in by the
/// store after the first successful persist and is the only field the
/// mapper ever writes back. Later edits to `name` or `album` are not
/// reflected in the stored row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Store-assigned primary key, `None` until persisted
    pub id: Option<i64>,

    /// Track title
    pub name: String,

    /// Album the track appears on
    pub album: String,
}

impl Song {
    /// Create an unsaved Song
    ///
    /// # Arguments
    /// * `name` - Track title
    /// * `album` - Album title
    pub fn new(name: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            album: album.into(),
        }
    }

    /// Check whether this Song has been persisted at least once
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}

impl Entity for Song {
    const TYPE_NAME: &'static str = "Song";
    const DATA_FIELDS: &'static [&'static str] = &["name", "album"];

    type Fields = (String, String);

    fn from_fields((name, album): Self::Fields) -> Self {
        Song::new(name, album)
    }

    fn from_row(id: i64, values: Vec<String>) -> Result<Self> {
        check_row_shape::<Self>(&values)?;
        let mut values = values.into_iter();
        let name = values.next().unwrap_or_default();
        let album = values.next().unwrap_or_default();
        Ok(Self {
            id: Some(id),
            name,
            album,
        })
    }

    fn field_values(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.album.as_str()]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_new_song_is_unsaved() {
        let song = Song::new("Hold On", "Born to Sing");

        assert_eq!(song.id, None);
        assert_eq!(song.name, "Hold On");
        assert_eq!(song.album, "Born to Sing");
        assert!(!song.is_saved());
    }

    #[test]
    fn test_song_maps_to_songs_table() {
        assert_eq!(Song::table_name(), "songs");
        assert_eq!(Song::DATA_FIELDS, &["name", "album"]);
    }

    #[test]
    fn test_field_values_follow_declaration_order() {
        let song = Song::new("Hello", "25");
        assert_eq!(song.field_values(), vec!["Hello", "25"]);
    }

    #[test]
    fn test_assign_id_only_touches_identity() {
        let mut song = Song::from_fields(("Despacito".to_string(), "Vida".to_string()));
        song.assign_id(2);

        assert_eq!(song.id(), Some(2));
        assert_eq!(song.name, "Despacito");
        assert_eq!(song.album, "Vida");
    }

    #[test]
    fn test_from_row_rejects_wrong_column_count() {
        let err = Song::from_row(1, vec!["only-one".to_string()]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert_eq!(err.entity(), Some("Song"));
    }

    #[test]
    fn test_serializes_with_null_id_when_unsaved() {
        let json = serde_json::to_value(Song::new("Hello", "25")).unwrap();
        assert_eq!(json["id"], serde_json::Value::Null);
        assert_eq!(json["name"], "Hello");
    }
}
