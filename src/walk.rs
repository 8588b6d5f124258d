//! Recursive descent over a record's fields.
//!
//! Nested records are flattened: their leaves are reported as if declared on
//! the outer record, with no key prefix, and the nested field itself is never
//! reported.

use crate::case::to_camel_lower;
use crate::tag::Tag;
use crate::types::{FieldKind, Record, Slot};

/// A leaf field with its derived external key and parsed tag.
pub struct FieldDescriptor<'a> {
    pub name: &'static str,
    pub key: String,
    pub tag: Tag,
    pub slot: Slot<'a>,
}

impl FieldDescriptor<'_> {
    pub fn kind(&self) -> FieldKind {
        self.slot.kind()
    }
}

/// Call `leaf` for every leaf field of `record`, descending into nested records.
pub fn walk(record: &mut dyn Record, leaf: &mut dyn FnMut(FieldDescriptor<'_>)) {
    record.visit_fields(&mut |field| match field.slot {
        Slot::Struct(nested) => walk(nested, &mut *leaf),
        slot => leaf(FieldDescriptor {
            name: field.name,
            key: to_camel_lower(field.name),
            tag: Tag::parse(field.tag),
            slot,
        }),
    });
}

/// External keys of every leaf, in walk order.
pub fn keys(record: &mut dyn Record) -> Vec<String> {
    let mut keys = Vec::new();
    walk(record, &mut |field| keys.push(field.key));
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{App, Server};

    #[test]
    fn flat_record_keys() {
        assert_eq!(keys(&mut App::default()), vec!["name", "tags", "port"]);
    }

    #[test]
    fn nested_record_is_flattened_without_prefix() {
        assert_eq!(
            keys(&mut Server::default()),
            vec![
                "name", "tags", "port", "debug", "bindAddr", "maxConns", "aliases"
            ]
        );
    }

    #[test]
    fn descriptors_carry_kind_and_tag() {
        let mut seen = Vec::new();
        walk(&mut Server::default(), &mut |field| {
            seen.push((
                field.name,
                field.kind(),
                field.tag.main.clone(),
                field.tag.get_opt("shorthand").map(String::from),
            ));
        });
        assert_eq!(
            seen[2],
            (
                "port",
                FieldKind::Int,
                "listen port".to_string(),
                Some("p".to_string())
            )
        );
        assert_eq!(seen[4].1, FieldKind::String);
        assert!(seen.iter().all(|(_, kind, _, _)| *kind != FieldKind::Struct));
    }

    #[test]
    fn slots_reach_nested_fields() {
        let mut server = Server::default();
        walk(&mut server, &mut |field| {
            if let (Slot::String(s), "bindAddr") = (field.slot, field.key.as_str()) {
                *s = "0.0.0.0".into();
            }
        });
        assert_eq!(server.listener.bind_addr, "0.0.0.0");
    }
}
