//! # Animation 模块
//!
//! 动画描述、动画组与调度。
//!
//! ## 核心设计理念
//!
//! 调度器只负责 **编排**：
//! - 顺序组：前一项完成后才开始下一项
//! - 并行组：所有项同时开始，各自完成
//! - **不做插值**，时间推进交给实现了 `Animator` 的原语
//!
//! ## 核心概念
//!
//! - `Animation`: 单个定时修改的不可变描述
//! - `AnimationGroup`: 以某种模式执行的一组动画
//! - `Scheduler`: 把动画组交给 `Animator`
//! - `Timeline`: 帧驱动的插值原语
//! - `ImmediateAnimator`: 不插值、立即完成的原语
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let timeline = Rc::new(Timeline::new());
//! let scheduler = Scheduler::new(timeline.clone());
//!
//! card.ui().animate_sequence(&scheduler, [
//!     templates::fade_in().with_duration(5.0).with_curve(AnimationCurve::EaseInOut),
//!     templates::resize(Size::square(200.0)),
//! ]);
//!
//! while timeline.has_active_animations() {
//!     timeline.advance(1.0 / 60.0);
//! }
//! ```

mod animator;
mod descriptor;
mod easing;
mod group;
mod scheduler;
mod snapshot;
mod timeline;

pub mod templates;

pub use animator::{AnimationRequest, Animator, ImmediateAnimator};
pub use descriptor::{Animation, Completion, DEFAULT_DURATION, Mutation};
pub use easing::AnimationCurve;
pub use group::{AnimationGroup, AnimationMode};
pub use scheduler::Scheduler;
pub use timeline::{Timeline, TimelineEvent, TrackId};

pub(crate) use snapshot::PropertySet;
