//! Flag declaration from record fields.

use tracing::debug;

use crate::error::CnfError;
use crate::flags::{FlagKind, FlagSet};
use crate::types::{Record, Slot};
use crate::walk::{FieldDescriptor, walk};

/// Register one flag per leaf field of `record`.
///
/// String and sequence fields become string flags (sequences are split at
/// bind time), integers integer flags, booleans boolean flags. Usage text is
/// the tag's main text and the shorthand comes from its `shorthand` option.
/// Stops at the first registration failure.
pub fn declare_flags(flags: &mut FlagSet, record: &mut dyn Record) -> Result<(), CnfError> {
    let mut result = Ok(());
    walk(record, &mut |field| {
        if result.is_ok() {
            result = declare_field(flags, &field);
        }
    });
    result
}

fn declare_field(flags: &mut FlagSet, field: &FieldDescriptor<'_>) -> Result<(), CnfError> {
    let kind = match field.slot {
        Slot::String(_) | Slot::Sequence(_) => FlagKind::String,
        Slot::Int(_) => FlagKind::Int,
        Slot::Bool(_) => FlagKind::Bool,
        Slot::Struct(_) => return Ok(()),
    };

    let short = match field.tag.get_opt("shorthand") {
        None | Some("") => None,
        Some(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => {
                    return Err(CnfError::InvalidShorthand {
                        key: field.key.clone(),
                        shorthand: s.to_string(),
                    });
                }
            }
        }
    };

    debug!(event = "cnf.declare.flag", key = %field.key, kind = ?kind);
    flags.add(&field.key, short, &field.tag.main, kind)
}
