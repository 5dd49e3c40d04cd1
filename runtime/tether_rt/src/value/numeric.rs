//! Numeric payload: one number, two cached representations.

/// A 64-bit integer or float, tagged by `is_integer`.
///
/// Both representations are computed at construction and never diverge:
/// the integer form of a float is the float truncated toward zero
/// (saturating at the `i64` bounds, `NaN` → 0); the float form of an
/// integer is the integer widened.
#[derive(Clone, Copy, Debug)]
pub struct Numeric {
    int: i64,
    float: f64,
    is_integer: bool,
}

impl Numeric {
    #[expect(
        clippy::cast_precision_loss,
        reason = "float representation of an integer is its widening"
    )]
    #[inline]
    pub fn from_int(n: i64) -> Self {
        Self {
            int: n,
            float: n as f64,
            is_integer: true,
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "integer representation of a float truncates toward zero"
    )]
    #[inline]
    pub fn from_float(f: f64) -> Self {
        Self {
            int: f as i64,
            float: f,
            is_integer: false,
        }
    }

    #[inline]
    pub fn as_i64(&self) -> i64 {
        self.int
    }

    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.float
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.is_integer
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_integer, other.is_integer) {
            (true, true) => self.int == other.int,
            (false, false) => self.float == other.float,
            _ => false,
        }
    }
}

impl From<i64> for Numeric {
    fn from(n: i64) -> Self {
        Numeric::from_int(n)
    }
}

impl From<f64> for Numeric {
    fn from(f: f64) -> Self {
        Numeric::from_float(f)
    }
}
