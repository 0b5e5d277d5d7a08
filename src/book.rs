use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// The mutable attributes of a book. Doubles as the request-body shape
/// (missing keys deserialize to `None`) and as the replacement document
/// written to the store. None of the attributes is required; the store
/// enforces nothing beyond `_id` uniqueness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookFields {
    pub(crate) title: Option<String>,
    pub(crate) author_name: Option<String>,
    pub(crate) review: Option<String>,
    // Untagged JSON numbers: an integer isbn stays an integer on the
    // wire instead of picking up a `.0`.
    pub(crate) isbn: Option<Number>,
    pub(crate) img: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) rating: Option<Number>,
}

/// A stored book as it appears on the wire: the store-assigned identifier
/// in its 24-char hex form plus all attributes, absent ones as null.
/// Deserialized from BSON query results, serialized into JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Book {
    #[serde(rename = "_id", deserialize_with = "object_id_as_hex")]
    pub(crate) id: String,
    pub(crate) title: Option<String>,
    pub(crate) author_name: Option<String>,
    pub(crate) review: Option<String>,
    pub(crate) isbn: Option<Number>,
    pub(crate) img: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) rating: Option<Number>,
}

impl Book {
    pub(crate) fn with_id(id: ObjectId, fields: BookFields) -> Self {
        Self {
            id: id.to_hex(),
            title: fields.title,
            author_name: fields.author_name,
            review: fields.review,
            isbn: fields.isbn,
            img: fields.img,
            category: fields.category,
            description: fields.description,
            rating: fields.rating,
        }
    }
}

fn object_id_as_hex<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(ObjectId::deserialize(deserializer)?.to_hex())
}
