//! # Sweet UI
//!
//! 可视节点树的声明式构建与链式修改，以及顺序/并行动画调度。
//!
//! ## 架构概述
//!
//! `sweet-ui` 是纯逻辑核心，不依赖任何渲染引擎。
//! 宿主负责按帧推进时间轴，并把节点树交给自己的渲染层：
//!
//! ```text
//! Host                              sweet-ui
//!   │                                  │
//!   │── combine / node.ui()... ───────►│ 构建、修改节点树
//!   │── scheduler.run(node, group) ───►│ 登记动画
//!   │── timeline.advance(dt) ─────────►│ 插值写回节点
//!   │◄── Vec<TimelineEvent> ───────────│
//!   │                                  │
//! ```
//!
//! ## 核心类型
//!
//! - [`Node`]：可变的可视节点（共享句柄），[`Label`] 与 [`Button`] 是更窄的能力
//! - [`Dsl`]：链式修改代理，由 `node.ui()` 获得
//! - [`Slot`] / [`combine`]：声明式组合
//! - [`Animation`] / [`AnimationGroup`] / [`Scheduler`]：动画描述与调度
//! - [`Timeline`]：帧驱动的插值原语
//! - [`UiConfig`]：可序列化的配置
//!
//! ## 使用示例
//!
//! ```ignore
//! use sweet_ui::prelude::*;
//!
//! let env = Environment::default();
//! let timeline = Rc::new(Timeline::new());
//! let scheduler = Scheduler::new(timeline.clone());
//!
//! let card = Node::new();
//! card.ui()
//!     .size(Size::square(100.0))
//!     .center(env.screen_center())
//!     .background(Color::RED)
//!     .alpha(0.0)
//!     .animate_sequence(&scheduler, [templates::fade_in(), templates::resize(Size::square(200.0))]);
//!
//! while timeline.has_active_animations() {
//!     timeline.advance(1.0 / 60.0);
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`node`]：节点树与能力收窄
//! - [`dsl`]：链式修改代理
//! - [`builder`]：组合构建
//! - [`animation`]：动画描述、调度与时间轴
//! - [`gesture`]：手势识别
//! - [`geometry`] / [`style`]：值类型
//! - [`environment`]：显式传递的屏幕信息
//! - [`config`]：配置
//! - [`error`]：错误类型定义

pub mod animation;
pub mod builder;
pub mod config;
pub mod dsl;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod node;
pub mod style;

// 重导出核心类型
pub use animation::{
    Animation, AnimationCurve, AnimationGroup, AnimationMode, AnimationRequest, Animator,
    ImmediateAnimator, Scheduler, Timeline, TimelineEvent, templates,
};
pub use builder::{Slot, ViewBuilder, branch, combine, when};
pub use config::{AnimationDefaults, ScreenConfig, TimelineConfig, UiConfig};
pub use dsl::Dsl;
pub use environment::Environment;
pub use error::{ConfigError, UiError, UiResult};
pub use geometry::{Point, Rect, Size};
pub use gesture::{GestureEvent, GestureRecognizer, TapGesture};
pub use node::{Button, Capability, Label, Node, NodeKind, WeakNode};
pub use style::{Color, Corner, CornerMask, Font, FontWeight, Shadow, TextAlignment};

/// 常用类型一次性导入
pub mod prelude {
    pub use std::rc::Rc;

    pub use crate::animation::templates;
    pub use crate::{
        Animation, AnimationCurve, AnimationGroup, Button, Color, CornerMask, Environment, Label,
        Node, Point, Rect, Scheduler, Size, Slot, Timeline, combine, when,
    };
}
