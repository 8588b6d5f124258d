use toml::{Table, Value};

/// Overlay `doc` onto `base` in place.
///
/// Where both sides hold a table under the same key the merge recurses, so a
/// file that sets one field of a nested section keeps the record's other
/// fields. Any other value in `doc` replaces what `base` had.
pub fn merge_into(base: &mut Table, doc: &Table) {
    for (key, value) in doc {
        match (base.get_mut(key), value) {
            (Some(Value::Table(base_tbl)), Value::Table(doc_tbl)) => merge_into(base_tbl, doc_tbl),
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}
