//! Schema digests.
//!
//! A digest is sha256 over the schema's serialized JSON bytes, lowercase
//! hex. Serialization order is fixed (struct fields serialize in
//! declaration order, all maps in this crate are `BTreeMap`s), so equal
//! schemas always digest equally. The store records digests in its index
//! and re-checks them on load; callers can also use digests for cheap
//! change detection.

use sha2::{Digest, Sha256};

use crate::errors::{FormaError, FormaResult};
use crate::model::FormSchema;

/// Hash raw bytes and return lowercase hex.
pub fn digest_bytes_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Digest a schema's serialized form.
pub fn schema_digest_hex(schema: &FormSchema) -> FormaResult<String> {
    let bytes = serde_json::to_vec(schema)
        .map_err(|e| FormaError::serialization(format!("failed to serialize schema: {e}")))?;
    Ok(digest_bytes_hex(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDef, FieldKind};

    #[test]
    fn digest_is_stable_for_equal_schemas() {
        let schema = FormSchema::new("demo");
        let mut copy = schema.clone();

        let a = schema_digest_hex(&schema).unwrap();
        let b = schema_digest_hex(&copy).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        copy.fields.push(FieldDef {
            id: "f".to_string(),
            kind: FieldKind::Text,
            label: "F".to_string(),
            required: false,
            default_value: None,
            validation_rules: vec![],
        });
        assert_ne!(schema_digest_hex(&copy).unwrap(), a);
    }
}
