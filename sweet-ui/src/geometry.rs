//! # Geometry 模块
//!
//! 几何值类型：点、尺寸、矩形。所有类型都支持线性插值，供动画使用。

use serde::{Deserialize, Serialize};

use crate::environment::Environment;

/// 二维点
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// 创建新的点
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 原点
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// 线性插值
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: lerp(self.x, other.x, t),
            y: lerp(self.y, other.y, t),
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f32, f32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// 二维尺寸
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// 创建新的尺寸
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// 零尺寸
    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// 正方形尺寸
    pub const fn square(length: f32) -> Self {
        Self {
            width: length,
            height: length,
        }
    }

    /// 当前屏幕尺寸（由环境显式提供）
    pub fn screen(env: &Environment) -> Self {
        env.screen
    }

    /// 线性插值
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            width: lerp(self.width, other.width, t),
            height: lerp(self.height, other.height, t),
        }
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// 矩形（原点 + 尺寸）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// 创建新的矩形
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// 由原点和尺寸创建
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// 零矩形
    pub const fn zero() -> Self {
        Self {
            origin: Point::zero(),
            size: Size::zero(),
        }
    }

    /// 当前屏幕边界（由环境显式提供）
    pub fn screen(env: &Environment) -> Self {
        Self::from_origin_size(Point::zero(), env.screen)
    }

    /// 中心点
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// 以给定中心点和尺寸创建矩形
    pub fn centered(center: Point, size: Size) -> Self {
        Self::from_origin_size(
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        )
    }

    /// 最小 X
    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    /// 最小 Y
    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    /// 最大 X
    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// 最大 Y
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// 点是否落在矩形内（含左上边界，不含右下边界）
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    /// 线性插值
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            origin: self.origin.lerp(other.origin, t),
            size: self.size.lerp(other.size, t),
        }
    }
}

pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_lerp() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(10.0, 20.0);
        let mid = p1.lerp(p2, 0.5);
        assert_eq!(mid.x, 5.0);
        assert_eq!(mid.y, 10.0);
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.center(), Point::new(60.0, 45.0));

        let centered = Rect::centered(Point::new(60.0, 45.0), Size::new(100.0, 50.0));
        assert_eq!(centered, rect);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(9.9, 9.9)));
        assert!(!rect.contains(Point::new(10.0, 5.0)));
    }

    #[test]
    fn test_screen_helpers_use_environment() {
        let env = Environment::new(Size::new(390.0, 844.0));
        assert_eq!(Size::screen(&env), Size::new(390.0, 844.0));
        assert_eq!(Rect::screen(&env), Rect::new(0.0, 0.0, 390.0, 844.0));
    }
}
