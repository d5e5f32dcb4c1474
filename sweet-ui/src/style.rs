//! # Style 模块
//!
//! 外观相关的值类型：颜色、圆角遮罩、阴影、字体与对齐方式。

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, lerp};

/// RGBA 颜色，各分量范围 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const CLEAR: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// 创建不透明颜色
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// 创建带透明度的颜色
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 修改透明度
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// 线性插值
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }
}

/// 单个角
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    fn bit(self) -> u8 {
        match self {
            Corner::TopLeft => 0b0001,
            Corner::TopRight => 0b0010,
            Corner::BottomLeft => 0b0100,
            Corner::BottomRight => 0b1000,
        }
    }
}

/// 圆角遮罩：哪些角应用圆角半径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CornerMask(u8);

impl CornerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0b1111);
    pub const TOP: Self = Self(0b0011);
    pub const BOTTOM: Self = Self(0b1100);
    pub const LEFT: Self = Self(0b0101);
    pub const RIGHT: Self = Self(0b1010);

    /// 由角的集合创建遮罩
    pub fn from_corners(corners: impl IntoIterator<Item = Corner>) -> Self {
        Self(corners.into_iter().fold(0, |acc, c| acc | c.bit()))
    }

    /// 是否包含某个角
    pub fn contains(&self, corner: Corner) -> bool {
        self.0 & corner.bit() != 0
    }

    /// 并集
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Default for CornerMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<Corner> for CornerMask {
    fn from(corner: Corner) -> Self {
        Self(corner.bit())
    }
}

/// 阴影
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub radius: f32,
    pub offset: Point,
    pub opacity: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            radius: 5.0,
            offset: Point::zero(),
            opacity: 0.7,
        }
    }
}

impl Shadow {
    pub fn new(color: Color, radius: f32, offset: Point, opacity: f32) -> Self {
        Self {
            color,
            radius,
            offset,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }
}

/// 文本对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Natural,
    Left,
    Center,
    Right,
    Justified,
}

/// 字重
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

/// 字体描述
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// 字体名称，`None` 表示系统字体
    pub name: Option<String>,
    pub size: f32,
    pub weight: FontWeight,
}

impl Default for Font {
    fn default() -> Self {
        Self::system(17.0, FontWeight::Regular)
    }
}

impl Font {
    /// 系统字体
    pub fn system(size: f32, weight: FontWeight) -> Self {
        Self {
            name: None,
            size,
            weight,
        }
    }

    /// 命名字体
    pub fn named(name: impl Into<String>, size: f32) -> Self {
        Self {
            name: Some(name.into()),
            size,
            weight: FontWeight::Regular,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_mask() {
        let mask = CornerMask::from_corners([Corner::TopLeft, Corner::BottomRight]);
        assert!(mask.contains(Corner::TopLeft));
        assert!(mask.contains(Corner::BottomRight));
        assert!(!mask.contains(Corner::TopRight));

        assert_eq!(CornerMask::TOP.union(CornerMask::BOTTOM), CornerMask::ALL);
        assert!(CornerMask::from_corners([]).is_empty());
    }

    #[test]
    fn test_color_lerp() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 0.001);
        assert_eq!(mid.a, 1.0);
    }

    #[test]
    fn test_shadow_clamps_opacity() {
        let shadow = Shadow::new(Color::BLACK, 3.0, Point::zero(), 1.5);
        assert_eq!(shadow.opacity, 1.0);
    }
}
