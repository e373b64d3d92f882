//! Records that are a flat run of fixed-size fields.
//!
//! Most tables store their records as a name field followed by words in
//! declaration order. [`table_record!`] declares such a record once: the
//! document keys, the Rust fields and the binary order all come from the same
//! list, so the three cannot drift apart.

use common::{ByteCursor, ByteSink};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A value stored inline in a record.
pub trait Field: Sized {
    fn read_field(cursor: &mut ByteCursor<'_>) -> Result<Self>;

    fn write_field(&self, sink: &mut ByteSink);
}

impl Field for i32 {
    fn read_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(cursor.read_i32()?)
    }

    fn write_field(&self, sink: &mut ByteSink) {
        sink.write_i32(*self);
    }
}

impl Field for f32 {
    fn read_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(cursor.read_f32()?)
    }

    fn write_field(&self, sink: &mut ByteSink) {
        sink.write_f32(*self);
    }
}

impl Field for i64 {
    fn read_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(cursor.read_i64()?)
    }

    fn write_field(&self, sink: &mut ByteSink) {
        sink.write_i64(*self);
    }
}

impl<T: Field + Copy + Default, const N: usize> Field for [T; N] {
    fn read_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let mut out = [T::default(); N];
        for slot in &mut out {
            *slot = T::read_field(cursor)?;
        }
        Ok(out)
    }

    fn write_field(&self, sink: &mut ByteSink) {
        for value in self {
            value.write_field(sink);
        }
    }
}

/// Declares a record struct with document keys and its [`Field`] codec.
///
/// Fields are read and written in the listed order. A leading `name[width]`
/// adds a `Name` string stored in a NUL-padded field of `width` bytes.
macro_rules! table_record {
    (
        $(#[$meta:meta])*
        pub struct $record:ident {
            name[$width:expr],
            $($key:literal => $field:ident: $ty:ty,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq)]
        #[serde(default)]
        pub struct $record {
            #[serde(rename = "Name")]
            pub name: String,
            $(#[serde(rename = $key)] pub $field: $ty,)*
        }

        impl $crate::record::Field for $record {
            fn read_field(cursor: &mut common::ByteCursor<'_>) -> $crate::Result<Self> {
                Ok(Self {
                    name: cursor.read_fixed_str($width)?,
                    $($field: $crate::record::Field::read_field(cursor)?,)*
                })
            }

            fn write_field(&self, sink: &mut common::ByteSink) {
                sink.write_fixed_str(&self.name, $width);
                $($crate::record::Field::write_field(&self.$field, sink);)*
            }
        }
    };
    (
        $(#[$meta:meta])*
        pub struct $record:ident {
            $($key:literal => $field:ident: $ty:ty,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(serde::Serialize, serde::Deserialize, Clone, Debug, Default, PartialEq)]
        #[serde(default)]
        pub struct $record {
            $(#[serde(rename = $key)] pub $field: $ty,)*
        }

        impl $crate::record::Field for $record {
            fn read_field(cursor: &mut common::ByteCursor<'_>) -> $crate::Result<Self> {
                Ok(Self {
                    $($field: $crate::record::Field::read_field(cursor)?,)*
                })
            }

            fn write_field(&self, sink: &mut common::ByteSink) {
                $($crate::record::Field::write_field(&self.$field, sink);)*
            }
        }
    };
}

pub(crate) use table_record;

/// Attribute reference shared by items and affixes. Eight unused bytes sit
/// between the parameter and the formula pointer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AttributeSpecifier {
    #[serde(rename = "AttributeId")]
    pub attribute_id: i32,
    #[serde(rename = "SNOParam")]
    pub sno_param: i32,
    #[serde(rename = "FormulaCount")]
    pub formula_count: i32,
    #[serde(rename = "FormulaOffset")]
    pub formula_offset: i32,
}

pub const ATTRIBUTE_SPECIFIER_SIZE: usize = 24;

impl Field for AttributeSpecifier {
    fn read_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let [attribute_id, sno_param] = cursor.read_i32_array::<2>()?;
        cursor.skip(8)?;
        let [formula_count, formula_offset] = cursor.read_i32_array::<2>()?;
        Ok(Self {
            attribute_id,
            sno_param,
            formula_count,
            formula_offset,
        })
    }

    fn write_field(&self, sink: &mut ByteSink) {
        sink.write_i32_slice(&[self.attribute_id, self.sno_param]);
        sink.write_zeros(8);
        sink.write_i32_slice(&[self.formula_count, self.formula_offset]);
    }
}
