//! # Easing 模块
//!
//! 动画曲线，用于时间插值。

use serde::{Deserialize, Serialize};

/// 动画曲线
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationCurve {
    /// 线性（匀速）
    #[default]
    Linear,
    /// 缓入（先慢后快）
    EaseIn,
    /// 缓出（先快后慢）
    EaseOut,
    /// 缓入缓出（两头慢中间快）
    EaseInOut,
}

impl AnimationCurve {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值 (0.0 - 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            AnimationCurve::Linear => t,
            AnimationCurve::EaseIn => ease_in(t),
            AnimationCurve::EaseOut => ease_out(t),
            AnimationCurve::EaseInOut => ease_in_out(t),
        }
    }
}

/// 缓入（Cubic）
fn ease_in(t: f32) -> f32 {
    t * t * t
}

/// 缓出（Cubic）
fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// 缓入缓出（Cubic）
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
