/// A dynamically-shaped row as returned by the storage collaborator.
///
/// Column names map to JSON values (string | number | boolean | null |
/// sequence); no fixed schema is assumed anywhere in this crate.
pub type Row = serde_json::Map<String, serde_json::Value>;
