//! `serde` support: a [`RingBuffer`] is a plain sequence, front to back.

use core::fmt;
use core::marker::PhantomData;

use ::serde::de::{Deserialize, Deserializer, Error as _, SeqAccess, Visitor};
use ::serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::RingBuffer;

/// Upper bound on the capacity preallocated from an untrusted size hint.
const MAX_PREALLOCATED: usize = 4096;

impl<T: Serialize> Serialize for RingBuffer<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for RingBuffer<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RingBufferVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for RingBufferVisitor<T> {
            type Value = RingBuffer<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let hint = seq.size_hint().unwrap_or(1).clamp(1, MAX_PREALLOCATED);
                let mut deque = RingBuffer::with_capacity(hint);
                while let Some(item) = seq.next_element()? {
                    deque.try_push_back(item).map_err(A::Error::custom)?;
                }
                Ok(deque)
            }
        }

        deserializer.deserialize_seq(RingBufferVisitor(PhantomData))
    }
}
