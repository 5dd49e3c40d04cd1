//! Immutable string payload.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Shared immutable text. Characters are Unicode scalar values; indexing and
/// length count `char`s, not bytes.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct StrValue(Rc<str>);

impl StrValue {
    pub fn new(s: &str) -> Self {
        Self(Rc::from(s))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.0.chars().nth(index)
    }

    #[inline]
    pub fn as_rc(&self) -> &Rc<str> {
        &self.0
    }
}

impl Deref for StrValue {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StrValue {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StrValue {
    fn from(s: String) -> Self {
        Self(Rc::from(s))
    }
}

impl From<Rc<str>> for StrValue {
    fn from(s: Rc<str>) -> Self {
        Self(s)
    }
}

impl fmt::Debug for StrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for StrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
