//! # Templates 模块
//!
//! 常用动画模板。默认时长 0.6 秒、无延迟、线性曲线，
//! 需要其他参数时在返回值上继续调用 `with_*`。
//!
//! ```rust,ignore
//! node.ui().animate_sequence(&scheduler, [
//!     templates::fade_in().with_duration(5.0).with_curve(AnimationCurve::EaseInOut),
//!     templates::resize(Size::square(200.0)),
//! ]);
//! ```

use super::Animation;
use crate::geometry::{Point, Size};
use crate::node::Node;

/// 模板默认时长（秒）
pub const TEMPLATE_DURATION: f32 = 0.6;

fn template(mutate: impl Fn(&Node) + 'static) -> Animation {
    Animation::new(mutate).with_duration(TEMPLATE_DURATION)
}

/// 淡入到完全不透明
pub fn fade_in() -> Animation {
    template(|node| node.set_opacity(1.0))
}

/// 淡出到完全透明
pub fn fade_out() -> Animation {
    template(|node| node.set_opacity(0.0))
}

/// 改变尺寸（保持中心点）
pub fn resize(size: Size) -> Animation {
    template(move |node| node.set_size(size))
}

/// 移动 frame 原点
pub fn move_origin(origin: Point) -> Animation {
    template(move |node| node.set_origin(origin))
}

/// 移动中心点
pub fn move_center(center: Point) -> Animation {
    template(move |node| node.set_center(center))
}
