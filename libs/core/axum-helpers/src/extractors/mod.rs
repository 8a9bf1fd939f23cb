//! Extractors that reject with the shared error envelope.

pub mod object_id_path;
pub mod validated_json;

pub use object_id_path::{ObjectIdPath, parse_object_id};
pub use validated_json::ValidatedJson;
