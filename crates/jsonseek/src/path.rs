use alloc::{borrow::Cow, string::String};

use crate::ValueKind;

/// One step of a lookup path.
///
/// A key selects an object member. Against an array, a key made of decimal
/// digits (optionally bracketed, as in `"[3]"`) selects the element at that
/// index, so paths read from text work on both container kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector<'p> {
    /// An object member name.
    Key(Cow<'p, str>),
    /// An array index.
    Index(usize),
}

impl Selector<'_> {
    /// The index this selector stands for when applied to an array.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Key(key) => {
                let digits = key
                    .strip_prefix('[')
                    .and_then(|k| k.strip_suffix(']'))
                    .unwrap_or(key.as_ref());
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                digits.parse().ok()
            }
        }
    }

    /// The member name this selector stands for when applied to an object.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key.as_ref()),
            Self::Index(_) => None,
        }
    }

    /// The container kind this selector naturally applies to.
    pub(crate) fn container_kind(&self) -> ValueKind {
        match self {
            Self::Key(_) => ValueKind::Object,
            Self::Index(_) => ValueKind::Array,
        }
    }
}

impl<'p> From<&'p str> for Selector<'p> {
    fn from(key: &'p str) -> Self {
        Self::Key(Cow::Borrowed(key))
    }
}

impl From<String> for Selector<'_> {
    fn from(key: String) -> Self {
        Self::Key(Cow::Owned(key))
    }
}

impl From<usize> for Selector<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

#[doc(hidden)]
pub trait SelectorFrom<'p, T> {
    fn from_selector(value: T) -> Selector<'p>;
}

// A negative index selects nothing rather than wrapping to the front.
macro_rules! impl_integer_as_selector {
    ($($t:ty),+) => {
        $(
            impl<'p> SelectorFrom<'p, $t> for Selector<'p> {
                fn from_selector(value: $t) -> Self {
                    Selector::Index(usize::try_from(value).unwrap_or(usize::MAX))
                }
            }
        )+
    };
}
impl_integer_as_selector!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<'p> SelectorFrom<'p, &'p str> for Selector<'p> {
    fn from_selector(value: &'p str) -> Self {
        Selector::from(value)
    }
}

impl<'p> SelectorFrom<'p, String> for Selector<'p> {
    fn from_selector(value: String) -> Self {
        Selector::from(value)
    }
}

// Custom (de)serialization so that a `Vec<Selector>` becomes e.g.
// `["foo", 0, "bar"]` instead of the default tagged representation.
#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use alloc::{borrow::Cow, string::String};
    use core::fmt;

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{Error, Unexpected, Visitor},
    };

    use super::Selector;

    impl Serialize for Selector<'_> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Selector::Key(k) => serializer.serialize_str(k),
                Selector::Index(i) => serializer.serialize_u64(*i as u64),
            }
        }
    }

    struct SelectorVisitor;

    impl<'de> Visitor<'de> for SelectorVisitor {
        type Value = Selector<'de>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or unsigned integer")
        }

        fn visit_borrowed_str<E>(self, value: &'de str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Selector::Key(Cow::Borrowed(value)))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Selector::Key(Cow::Owned(value.into())))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Selector::Key(Cow::Owned(value)))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            usize::try_from(value).map(Selector::Index).map_err(|_| {
                Error::invalid_value(Unexpected::Unsigned(value), &"index within usize")
            })
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            usize::try_from(value).map(Selector::Index).map_err(|_| {
                Error::invalid_value(Unexpected::Signed(value), &"non-negative index")
            })
        }
    }

    impl<'de> Deserialize<'de> for Selector<'de> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(SelectorVisitor)
        }
    }
}
