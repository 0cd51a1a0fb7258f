//! Operation catalog and documentation map.

use crate::api_def::ApiDef;
use crate::error::{CatalogError, ParseError};
use crate::op_def::{OpDef, OpList};
use crate::parser::parse_api_defs;
use crate::validation::validate_catalog;
use prost::Message;
use std::collections::HashMap;

/// Decoded operation catalog.
#[derive(Debug, Clone, Default)]
pub struct OpCatalog {
    ops: Vec<OpDef>,
}

impl OpCatalog {
    /// Decodes a serialized `OpList` and validates it.
    ///
    /// # Errors
    /// Returns `CatalogError` if the bytes are not a valid operation list or
    /// the list contains empty or duplicate operation names.
    pub fn decode(bytes: &[u8]) -> Result<Self, CatalogError> {
        let list = OpList::decode(bytes)?;
        Self::from_ops(list.op)
    }

    /// Builds a catalog from already decoded operations.
    ///
    /// # Errors
    /// Returns `CatalogError` if the operations fail validation.
    pub fn from_ops(ops: Vec<OpDef>) -> Result<Self, CatalogError> {
        validate_catalog(&ops)?;
        tracing::debug!("Decoded catalog with {} operations", ops.len());
        Ok(Self { ops })
    }

    /// Operations in catalog order.
    #[must_use]
    pub fn ops(&self) -> &[OpDef] {
        &self.ops
    }

    /// Operations sorted by name in byte order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&OpDef> {
        let mut ops: Vec<&OpDef> = self.ops.iter().collect();
        ops.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        ops
    }

    /// Number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if the catalog holds no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Documentation entries keyed by operation name.
#[derive(Debug, Clone, Default)]
pub struct ApiDefMap {
    entries: HashMap<String, ApiDef>,
}

impl ApiDefMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the map from the documentation carried by each operation.
    #[must_use]
    pub fn from_catalog(catalog: &OpCatalog) -> Self {
        let entries = catalog
            .ops()
            .iter()
            .map(|op| (op.name.clone(), ApiDef::from_op_def(op)))
            .collect();
        Self { entries }
    }

    /// Looks up the documentation of an operation.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ApiDef> {
        self.entries.get(name)
    }

    /// Inserts an entry, replacing any previous entry for the same operation.
    pub fn insert(&mut self, api: ApiDef) {
        self.entries.insert(api.graph_op_name.clone(), api);
    }

    /// Parses a text-format override document and merges every entry in it.
    ///
    /// Later entries replace earlier ones for the same operation name.
    ///
    /// # Returns
    /// The number of entries merged.
    ///
    /// # Errors
    /// Returns `ParseError` if the document is malformed; the map is left
    /// unchanged in that case.
    pub fn put(&mut self, text: &str) -> Result<usize, ParseError> {
        let defs = parse_api_defs(text)?;
        let count = defs.len();
        for api in defs {
            self.insert(api);
        }
        Ok(count)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op_def::ArgDef;

    fn create_test_catalog() -> OpCatalog {
        let list = OpList {
            op: vec![
                OpDef::new("Sub").with_summary("Subtracts."),
                OpDef::new("Add").with_summary("Adds."),
                OpDef::new("Mul").with_input(ArgDef::new("x")),
            ],
        };
        OpCatalog::decode(&list.encode_to_vec()).expect("Failed to decode")
    }

    #[test]
    fn test_decode_keeps_catalog_order() {
        let catalog = create_test_catalog();
        let names: Vec<&str> = catalog.ops().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Sub", "Add", "Mul"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_sorted_is_ordinal() {
        let catalog = OpCatalog::from_ops(vec![
            OpDef::new("add"),
            OpDef::new("Sub"),
            OpDef::new("_Recv"),
            OpDef::new("Add"),
            OpDef::new("Mul"),
        ])
        .expect("valid catalog");

        let names: Vec<&str> = catalog.sorted().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Add", "Mul", "Sub", "_Recv", "add"]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = OpCatalog::decode(&[0x0a, 0xff, 0xff]);
        assert!(matches!(result, Err(CatalogError::Decode(_))));
    }

    #[test]
    fn test_api_map_seeded_from_catalog() {
        let catalog = create_test_catalog();
        let map = ApiDefMap::from_catalog(&catalog);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("Add").map(|a| a.summary.as_str()), Some("Adds."));
        assert!(!map.get("Mul").expect("Mul").is_documented());
        assert!(map.get("Div").is_none());
    }

    #[test]
    fn test_put_replaces_entries() {
        let catalog = create_test_catalog();
        let mut map = ApiDefMap::from_catalog(&catalog);

        let merged = map
            .put(r#"op { graph_op_name: "Mul" summary: "Multiplies." }"#)
            .expect("Failed to merge");
        assert_eq!(merged, 1);
        assert_eq!(map.get("Mul").map(|a| a.summary.as_str()), Some("Multiplies."));

        map.put(r#"op { graph_op_name: "Mul" summary: "Later wins." }"#)
            .expect("Failed to merge");
        assert_eq!(map.get("Mul").map(|a| a.summary.as_str()), Some("Later wins."));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_put_invalid_leaves_map_unchanged() {
        let catalog = create_test_catalog();
        let mut map = ApiDefMap::from_catalog(&catalog);

        let result = map.put(r#"op { graph_op_name: "Add" summary: "x" } op {"#);
        assert!(result.is_err());
        assert_eq!(map.get("Add").map(|a| a.summary.as_str()), Some("Adds."));
    }
}
