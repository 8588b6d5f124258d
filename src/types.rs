//! The schema-description API records implement instead of runtime reflection.
//!
//! A [`Record`] hands every participating field to a visitor as a [`Field`]:
//! its Rust name, its raw tag string, and a [`Slot`] giving mutable access to
//! the value. Fields a record does not visit are invisible to the engine.
//!
//! Most records don't implement the trait by hand; the [`record!`](crate::record)
//! macro generates it from a field list:
//!
//! ```ignore
//! #[derive(Default, Serialize, Deserialize)]
//! pub struct Server {
//!     pub name: String,
//!     pub port: u16,
//!     pub tags: Vec<String>,
//!     pub db: Db,
//! }
//!
//! cnf::record!(Server {
//!     name = "server name,shorthand=n",
//!     port = "listen port,shorthand=p",
//!     tags,
//!     db,
//! });
//! ```
//!
//! `db` is itself a record, so its fields are flattened into `Server`'s key
//! space. A trailing `separator = ";"` sets the record's custom separator.

/// A configurable record type.
pub trait Record {
    /// Call `visit` once for every participating field, in declaration order.
    fn visit_fields(&mut self, visit: &mut dyn FnMut(Field<'_>));

    /// Custom separator for sequence fields. `None` defers to the caller's fallback.
    fn separator(&self) -> Option<&str> {
        None
    }
}

/// One field as handed out by [`Record::visit_fields`].
pub struct Field<'a> {
    pub name: &'static str,
    /// Raw tag string, e.g. `"listen port,shorthand=p"`.
    pub tag: &'static str,
    pub slot: Slot<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, tag: &'static str, slot: Slot<'a>) -> Self {
        Self { name, tag, slot }
    }
}

/// Mutable access to a field, tagged by kind.
pub enum Slot<'a> {
    String(&'a mut String),
    Int(&'a mut dyn IntField),
    Bool(&'a mut bool),
    Sequence(&'a mut Vec<String>),
    /// A nested or embedded record, walked in place.
    Struct(&'a mut dyn Record),
}

impl Slot<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            Slot::String(_) => FieldKind::String,
            Slot::Int(_) => FieldKind::Int,
            Slot::Bool(_) => FieldKind::Bool,
            Slot::Sequence(_) => FieldKind::Sequence,
            Slot::Struct(_) => FieldKind::Struct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Int,
    Bool,
    Sequence,
    Struct,
}

/// Integer field of any primitive width.
pub trait IntField {
    /// Store `value` if it fits the field's width. Returns whether it was stored.
    fn set_i64(&mut self, value: i64) -> bool;
}

/// Maps a field type to its [`Slot`]. Implemented for the supported leaf
/// types and for every [`Record`].
pub trait IntoSlot {
    fn slot(&mut self) -> Slot<'_>;
}

impl IntoSlot for String {
    fn slot(&mut self) -> Slot<'_> {
        Slot::String(self)
    }
}

impl IntoSlot for bool {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Bool(self)
    }
}

impl IntoSlot for Vec<String> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self)
    }
}

impl<R: Record> IntoSlot for R {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Struct(self)
    }
}

macro_rules! int_fields {
    ($($t:ty),*) => {
        $(
            impl IntField for $t {
                fn set_i64(&mut self, value: i64) -> bool {
                    match <$t>::try_from(value) {
                        Ok(v) => {
                            *self = v;
                            true
                        }
                        Err(_) => false,
                    }
                }
            }

            impl IntoSlot for $t {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Int(self)
                }
            }
        )*
    };
}

int_fields!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Implement [`Record`] for a struct from a list of its fields.
///
/// Each entry is a field name, optionally followed by `= "tag"`. Unlisted
/// fields are invisible. See the [`types`](crate::types) module docs.
#[macro_export]
macro_rules! record {
    (@tag) => {
        ""
    };
    (@tag $tag:literal) => {
        $tag
    };
    ($ty:ty { $($field:ident $(= $tag:literal)?),* $(,)? } $(separator = $sep:literal)?) => {
        impl $crate::Record for $ty {
            #[allow(unused_variables)]
            fn visit_fields(&mut self, visit: &mut dyn FnMut($crate::Field<'_>)) {
                $(
                    visit($crate::Field::new(
                        stringify!($field),
                        $crate::record!(@tag $($tag)?),
                        $crate::IntoSlot::slot(&mut self.$field),
                    ));
                )*
            }

            $(
                fn separator(&self) -> Option<&str> {
                    Some($sep)
                }
            )?
        }
    };
}
