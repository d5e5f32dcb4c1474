//! # Group 模块
//!
//! 一组针对同一节点、按某种模式执行的动画。

use super::Animation;

/// 执行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
    /// 依次执行：前一个的完成回调触发后才开始下一个
    #[default]
    Sequence,
    /// 同时执行：各自独立开始、独立完成
    Parallel,
}

/// 动画组
#[derive(Debug, Clone, Default)]
pub struct AnimationGroup {
    pub mode: AnimationMode,
    pub items: Vec<Animation>,
}

impl AnimationGroup {
    pub fn new(mode: AnimationMode, items: impl IntoIterator<Item = Animation>) -> Self {
        Self {
            mode,
            items: items.into_iter().collect(),
        }
    }

    /// 顺序动画组
    pub fn sequence(items: impl IntoIterator<Item = Animation>) -> Self {
        Self::new(AnimationMode::Sequence, items)
    }

    /// 并行动画组
    pub fn parallel(items: impl IntoIterator<Item = Animation>) -> Self {
        Self::new(AnimationMode::Parallel, items)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 感知总时长
    ///
    /// - 顺序：各项 `delay + duration` 之和
    /// - 并行：各项 `delay + duration` 的最大值
    ///
    /// 调度器本身不使用该值。
    pub fn total_duration(&self) -> f32 {
        let spans = self.items.iter().map(Animation::span);
        match self.mode {
            AnimationMode::Sequence => spans.sum::<f32>(),
            AnimationMode::Parallel => spans.fold(0.0, f32::max),
        }
    }
}

impl From<Animation> for AnimationGroup {
    fn from(animation: Animation) -> Self {
        Self::sequence([animation])
    }
}
