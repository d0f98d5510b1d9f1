use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{HuntmapError, HuntmapResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// A 2-component position in map or pixel space.
///
/// Arithmetic goes through explicit named operations that take an [`Operand`]: either another
/// pair or a scalar applied to both components. Values coming from untyped sources (config JSON)
/// are converted with [`Operand::try_from`], which rejects anything that is neither a number nor
/// a numeric pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Right-hand side of a [`Position`] operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Pair(f64, f64),
}

impl Operand {
    fn components(self) -> (f64, f64) {
        match self {
            Self::Scalar(v) => (v, v),
            Self::Pair(x, y) => (x, y),
        }
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<f32> for Operand {
    fn from(v: f32) -> Self {
        Self::Scalar(f64::from(v))
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Self::Scalar(f64::from(v))
    }
}

impl From<u32> for Operand {
    fn from(v: u32) -> Self {
        Self::Scalar(f64::from(v))
    }
}

impl From<(f64, f64)> for Operand {
    fn from((x, y): (f64, f64)) -> Self {
        Self::Pair(x, y)
    }
}

impl From<(i32, i32)> for Operand {
    fn from((x, y): (i32, i32)) -> Self {
        Self::Pair(f64::from(x), f64::from(y))
    }
}

impl From<[f64; 2]> for Operand {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::Pair(x, y)
    }
}

impl From<Position> for Operand {
    fn from(p: Position) -> Self {
        Self::Pair(p.x, p.y)
    }
}

impl TryFrom<&serde_json::Value> for Operand {
    type Error = HuntmapError;

    fn try_from(value: &serde_json::Value) -> HuntmapResult<Self> {
        use serde_json::Value;

        fn number(v: &Value) -> Option<f64> {
            v.as_f64().filter(|n| n.is_finite())
        }

        match value {
            Value::Number(_) => number(value).map(Self::Scalar).ok_or_else(|| {
                HuntmapError::input("Position operand must be a finite number")
            }),
            Value::Array(items) if items.len() == 2 => match (number(&items[0]), number(&items[1]))
            {
                (Some(x), Some(y)) => Ok(Self::Pair(x, y)),
                _ => Err(HuntmapError::input(
                    "Position operand pair must hold two finite numbers",
                )),
            },
            Value::Object(map) => match (map.get("x").and_then(number), map.get("y").and_then(number))
            {
                (Some(x), Some(y)) if map.len() == 2 => Ok(Self::Pair(x, y)),
                _ => Err(HuntmapError::input(
                    "Position operand object must be exactly {x, y} with finite numbers",
                )),
            },
            other => Err(HuntmapError::input(format!(
                "Position expects a Position-like pair or a scalar, got {}",
                json_kind(other)
            ))),
        }
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array of the wrong shape",
        serde_json::Value::Object(_) => "an object",
    }
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: impl Into<f64>, y: impl Into<f64>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Elementwise sum.
    pub fn add(self, rhs: impl Into<Operand>) -> Self {
        let (x, y) = rhs.into().components();
        Self::new(self.x + x, self.y + y)
    }

    /// Elementwise difference.
    pub fn subtract(self, rhs: impl Into<Operand>) -> Self {
        let (x, y) = rhs.into().components();
        Self::new(self.x - x, self.y - y)
    }

    /// Elementwise product.
    pub fn scale(self, rhs: impl Into<Operand>) -> Self {
        let (x, y) = rhs.into().components();
        Self::new(self.x * x, self.y * y)
    }

    pub fn negate(self) -> Self {
        Self::new(-self.x, -self.y)
    }

    /// Component by index: `0` is x, `1` is y.
    pub fn get(self, index: usize) -> HuntmapResult<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(HuntmapError::input(format!(
                "Position index must be 0 or 1, got {index}"
            ))),
        }
    }

    /// Components in `(x, y)` order.
    pub fn iter(self) -> std::array::IntoIter<f64, 2> {
        [self.x, self.y].into_iter()
    }

    /// Rotate around the origin by `theta` radians.
    pub fn rotate(self, theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl<T: Into<Operand>> Add<T> for Position {
    type Output = Position;

    fn add(self, rhs: T) -> Position {
        Position::add(self, rhs)
    }
}

impl<T: Into<Operand>> Sub<T> for Position {
    type Output = Position;

    fn sub(self, rhs: T) -> Position {
        self.subtract(rhs)
    }
}

impl<T: Into<Operand>> Mul<T> for Position {
    type Output = Position;

    fn mul(self, rhs: T) -> Position {
        self.scale(rhs)
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Position {
        self.negate()
    }
}

impl Index<usize> for Position {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Position index out of range: {index}"),
        }
    }
}

impl IntoIterator for Position {
    type Item = f64;
    type IntoIter = std::array::IntoIter<f64, 2>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({},{})", self.x, self.y)
    }
}

impl Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match Operand::try_from(&value).map_err(serde::de::Error::custom)? {
            Operand::Pair(x, y) => Ok(Self::new(x, y)),
            Operand::Scalar(_) => Err(serde::de::Error::custom(
                "position must be an [x, y] pair, not a scalar",
            )),
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        use crate::foundation::math::mul_div255_u8;

        Self {
            r: mul_div255_u8(u16::from(r), u16::from(a)),
            g: mul_div255_u8(u16::from(g), u16::from(a)),
            b: mul_div255_u8(u16::from(b), u16::from(a)),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
