//! # Animator 模块
//!
//! 动画原语接口。调度器只负责编排，真正的时间推进与插值由实现者完成。

use std::fmt;

use super::{Animation, AnimationCurve, Mutation};
use crate::node::Node;

/// 一次动画请求
pub struct AnimationRequest {
    /// 时长（秒），不为负
    pub duration: f32,
    /// 开始前的延迟（秒），不为负
    pub delay: f32,
    pub curve: AnimationCurve,
    pub mutate: Mutation,
    /// 完成回调，必须恰好调用一次
    pub completion: Box<dyn FnOnce(bool)>,
}

impl AnimationRequest {
    /// 由动画描述和完成回调构建请求
    pub fn new(animation: &Animation, completion: impl FnOnce(bool) + 'static) -> Self {
        Self {
            duration: animation.duration(),
            delay: animation.delay(),
            curve: animation.curve(),
            mutate: animation.mutation(),
            completion: Box::new(completion),
        }
    }

    /// 是否无需等待、无需插值
    pub fn is_immediate(&self) -> bool {
        self.duration <= 0.0 && self.delay <= 0.0
    }
}

impl fmt::Debug for AnimationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRequest")
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("curve", &self.curve)
            .finish()
    }
}

/// 动画原语
///
/// 约定：
/// - 在 `[now + delay, now + delay + duration]` 区间内按曲线把修改作用到节点
/// - 完成回调恰好调用一次：自然结束为 `true`，被覆盖或打断为 `false`
/// - 不得阻塞；完成回调可以在 `animate` 内同步触发（零时长、零延迟时）
pub trait Animator {
    fn animate(&self, node: &Node, request: AnimationRequest);
}

/// 不做插值的动画原语
///
/// 立即应用修改并同步报告完成，忽略时长与延迟。适用于无头环境与测试。
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateAnimator;

impl Animator for ImmediateAnimator {
    fn animate(&self, node: &Node, request: AnimationRequest) {
        (request.mutate)(node);
        (request.completion)(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_immediate_animator_applies_and_completes() {
        let node = Node::new();
        let finished = Rc::new(Cell::new(None));
        let flag = finished.clone();

        let anim = Animation::new(|n| n.set_opacity(0.0)).with_duration(10.0);
        ImmediateAnimator.animate(&node, AnimationRequest::new(&anim, move |f| flag.set(Some(f))));

        assert_eq!(node.opacity(), 0.0);
        assert_eq!(finished.get(), Some(true));
    }

    #[test]
    fn test_request_is_immediate() {
        let anim = Animation::new(|_| {}).with_duration(0.0);
        assert!(AnimationRequest::new(&anim, |_| {}).is_immediate());

        let delayed = anim.clone().with_delay(1.0);
        assert!(!AnimationRequest::new(&delayed, |_| {}).is_immediate());
    }
}
