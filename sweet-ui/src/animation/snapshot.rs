//! # Snapshot 模块
//!
//! 节点可插值属性的快照，以及属性集合。

use crate::geometry::{Point, Rect, lerp};
use crate::node::Node;
use crate::style::Color;

/// 可插值属性集合（位掩码）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropertySet(u8);

impl PropertySet {
    pub const EMPTY: Self = Self(0);
    pub const OPACITY: Self = Self(1 << 0);
    pub const FRAME: Self = Self(1 << 1);
    pub const BOUNDS_ORIGIN: Self = Self(1 << 2);
    pub const CORNER_RADIUS: Self = Self(1 << 3);
    pub const BACKGROUND: Self = Self(1 << 4);
    pub const TINT: Self = Self(1 << 5);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// 移除 `other` 中的全部属性
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// 可插值属性快照
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub opacity: f32,
    pub frame: Rect,
    pub bounds_origin: Point,
    pub corner_radius: f32,
    pub background: Option<Color>,
    pub tint: Option<Color>,
}

impl Snapshot {
    /// 读取节点当前属性
    pub fn capture(node: &Node) -> Self {
        Self {
            opacity: node.opacity(),
            frame: node.frame(),
            bounds_origin: node.bounds().origin,
            corner_radius: node.corner_radius(),
            background: node.background_color(),
            tint: node.tint_color(),
        }
    }

    /// 插值
    ///
    /// 颜色从无到有（或反之）时没有中间值，在终点处切换。
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        Self {
            opacity: lerp(self.opacity, to.opacity, t),
            frame: self.frame.lerp(to.frame, t),
            bounds_origin: self.bounds_origin.lerp(to.bounds_origin, t),
            corner_radius: lerp(self.corner_radius, to.corner_radius, t),
            background: lerp_color(self.background, to.background, t),
            tint: lerp_color(self.tint, to.tint, t),
        }
    }

    /// 把 `props` 中的属性写回节点
    pub fn apply(&self, node: &Node, props: PropertySet) {
        if props.contains(PropertySet::OPACITY) {
            node.set_opacity(self.opacity);
        }
        if props.contains(PropertySet::FRAME) {
            node.set_frame(self.frame);
        }
        if props.contains(PropertySet::BOUNDS_ORIGIN) {
            node.set_bounds_origin(self.bounds_origin);
        }
        if props.contains(PropertySet::CORNER_RADIUS) {
            node.set_corner_radius(self.corner_radius);
        }
        if props.contains(PropertySet::BACKGROUND) {
            node.set_background_color(self.background);
        }
        if props.contains(PropertySet::TINT) {
            node.set_tint_color(self.tint);
        }
    }
}

fn lerp_color(from: Option<Color>, to: Option<Color>, t: f32) -> Option<Color> {
    match (from, to) {
        (Some(a), Some(b)) => Some(a.lerp(b, t)),
        _ if t >= 1.0 => to,
        _ => from,
    }
}
