//! Conversions between client JSON and stored BSON documents

use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Open-ended JSON record as accepted from and returned to clients
pub type JsonMap = serde_json::Map<String, Value>;

/// Primary key field of every stored document
pub const ID_FIELD: &str = "_id";

/// Parse a path identifier into an object id
pub fn parse_id(raw: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw)
        .map_err(|_| AppError::BadRequest(format!("Invalid identifier: {}", raw)))
}

/// Convert a client record into a storable document.
///
/// Identifiers are generated by the store and never accepted from clients.
pub fn from_json(map: JsonMap) -> AppResult<Document> {
    if map.contains_key(ID_FIELD) {
        return Err(AppError::BadRequest(format!(
            "{} is assigned by the server and cannot be set",
            ID_FIELD
        )));
    }
    object_to_document(map)
}

/// Convert a JSON object field by field.
///
/// Keys are stored literally: `{"$oid": ..}` or `{"$numberLong": ..}` stay
/// nested objects rather than being read as extended JSON.
pub fn object_to_document(map: JsonMap) -> AppResult<Document> {
    let mut document = Document::new();
    for (key, value) in map {
        document.insert(key, json_to_bson(value)?);
    }
    Ok(document)
}

fn json_to_bson(value: Value) -> AppResult<Bson> {
    Ok(match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::String(s) => Bson::String(s),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Bson::Int64(i)
            } else if let Some(u) = n.as_u64() {
                return Err(AppError::BadRequest(format!(
                    "Integer {} is out of range",
                    u
                )));
            } else {
                Bson::Double(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::Array(items) => Bson::Array(
            items
                .into_iter()
                .map(json_to_bson)
                .collect::<AppResult<Vec<_>>>()?,
        ),
        Value::Object(map) => Bson::Document(object_to_document(map)?),
    })
}

/// Convert a stored document into client JSON; object ids become hex strings
pub fn to_json(document: Document) -> JsonMap {
    document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => Value::Object(to_json(doc)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Split a stored document into its identifier and remaining fields
pub fn split_id(document: Document) -> AppResult<(String, JsonMap)> {
    let mut fields = to_json(document);
    match fields.remove(ID_FIELD) {
        Some(Value::String(id)) => Ok((id, fields)),
        other => Err(AppError::Internal(format!(
            "stored document has unusable {}: {:?}",
            ID_FIELD, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use serde_json::json;

    fn object(value: Value) -> JsonMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_json_survives_storage() {
        let input = object(json!({
            "title": "Dune",
            "quantity": 5,
            "rating": 4.5,
            "tags": ["sf", "classic"],
            "publisher": { "name": "Chilton", "year": 1965 },
            "available": true,
            "note": null
        }));
        let document = from_json(input.clone()).unwrap();
        assert_eq!(to_json(document), input);
    }

    #[test]
    fn test_extended_json_keys_stored_literally() {
        let input = object(json!({
            "title": "Dune",
            "meta": { "$oid": "652f1c2e9b1d4a3f8c0e1a2b" },
            "n": { "$numberLong": "5" },
            "published": [{ "$date": "1965-08-01T00:00:00Z" }]
        }));
        let document = from_json(input.clone()).unwrap();
        assert!(document.get_document("meta").unwrap().contains_key("$oid"));
        assert_eq!(to_json(document), input);
    }

    #[test]
    fn test_out_of_range_integer_rejected() {
        let err = from_json(object(json!({ "n": u64::MAX }))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_object_id_renders_as_hex() {
        let oid = ObjectId::new();
        let (id, fields) = split_id(doc! { "_id": oid, "title": "Dune" }).unwrap();
        assert_eq!(id, oid.to_hex());
        assert_eq!(fields.get("title"), Some(&json!("Dune")));
        assert!(!fields.contains_key(ID_FIELD));
    }

    #[test]
    fn test_client_identifier_rejected() {
        let err = from_json(object(json!({ "_id": "abc", "title": "Dune" }))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_parse_id() {
        let oid = ObjectId::new();
        assert_eq!(parse_id(&oid.to_hex()).unwrap(), oid);
        assert!(matches!(parse_id("not-a-valid-id"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_document_without_id_is_internal_error() {
        assert!(matches!(split_id(doc! { "title": "x" }), Err(AppError::Internal(_))));
    }
}
