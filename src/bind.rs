//! Assign values from the layered source into record fields.
//!
//! Only non-zero values are written: a non-empty string or sequence, a
//! non-zero integer, `true`. Anything else leaves the field as it was, so a
//! field can never be reset to its zero value through this path.

use tracing::debug;

use crate::layers::Layers;
use crate::separator::{DEFAULT_SEPARATOR, resolve_separator};
use crate::types::{Record, Slot};
use crate::walk::{FieldDescriptor, walk};

/// Bind every leaf of `record` (nested records included) using `separator`
/// for sequence fields.
pub fn bind(layers: &Layers, record: &mut dyn Record, separator: &str) {
    walk(record, &mut |field| bind_field(layers, field, separator));
}

/// Bind each record in order.
///
/// The separator starts at [`DEFAULT_SEPARATOR`]; each record's resolved
/// separator becomes the fallback for the records after it.
pub fn bind_all(layers: &Layers, records: &mut [&mut dyn Record]) {
    let mut separator = DEFAULT_SEPARATOR.to_string();
    for record in records.iter_mut() {
        separator = resolve_separator(layers, &**record, &separator);
        bind(layers, &mut **record, &separator);
    }
}

fn bind_field(layers: &Layers, field: FieldDescriptor<'_>, separator: &str) {
    match field.slot {
        Slot::Sequence(target) => {
            let values = layers.get_sequence(&field.key, separator);
            if !values.is_empty() {
                *target = values;
            }
        }
        Slot::String(target) => {
            let value = layers.get_string(&field.key);
            let value = value.trim();
            if !value.is_empty() {
                *target = value.to_string();
            }
        }
        Slot::Int(target) => {
            let value = layers.get_int(&field.key);
            if value != 0 && !target.set_i64(value) {
                debug!(event = "cnf.bind.int_out_of_range", key = %field.key, value = value);
            }
        }
        Slot::Bool(target) => {
            if layers.get_bool(&field.key) {
                *target = true;
            }
        }
        Slot::Struct(_) => {}
    }
}
