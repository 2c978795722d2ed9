use crate::{Error, SyntaxError, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpectedLiteral {
    Null,
    True,
    False,
}

impl ExpectedLiteral {
    /// The literal a leading `n`, `t` or `f` commits to.
    pub fn from_first(first: u8) -> Option<Self> {
        match first {
            b'n' => Some(Self::Null),
            b't' => Some(Self::True),
            b'f' => Some(Self::False),
            _ => None,
        }
    }

    fn text(self) -> &'static [u8] {
        match self {
            Self::Null => b"null",
            Self::True => b"true",
            Self::False => b"false",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::True | Self::False => ValueKind::Boolean,
        }
    }

    /// Matches the whole literal at `pos` and returns the offset just past
    /// it. Any deviation is reported at the first byte that differs.
    pub fn match_at(self, buf: &[u8], pos: usize) -> Result<usize, Error> {
        for (i, &expected) in self.text().iter().enumerate() {
            match buf.get(pos + i) {
                Some(&b) if b == expected => {}
                Some(_) => return Err(Error::malformed(pos + i, SyntaxError::InvalidLiteral)),
                None => {
                    return Err(Error::malformed(
                        buf.len(),
                        SyntaxError::UnexpectedEndOfInput,
                    ));
                }
            }
        }
        Ok(pos + self.text().len())
    }
}
