//! # Scheduler 模块
//!
//! 把动画组交给动画原语执行。
//!
//! - 顺序模式：第 i 项的完成回调触发后才开始第 i+1 项
//! - 并行模式：所有项立即交给原语，各自完成
//!
//! 顺序链的续接闭包只持有调度器和节点的弱引用，任一方被释放后链条静默停止。

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::{Animation, AnimationGroup, AnimationMode, AnimationRequest, Animator, ImmediateAnimator};
use crate::node::{Node, WeakNode};

struct SchedulerInner {
    animator: Rc<dyn Animator>,
}

/// 动画调度器
///
/// 克隆开销很小，克隆体共享同一个动画原语。
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<SchedulerInner>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("handles", &Rc::strong_count(&self.inner))
            .finish()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::immediate()
    }
}

impl Scheduler {
    pub fn new(animator: Rc<dyn Animator>) -> Self {
        Self {
            inner: Rc::new(SchedulerInner { animator }),
        }
    }

    /// 使用 [`ImmediateAnimator`] 的调度器
    pub fn immediate() -> Self {
        Self::new(Rc::new(ImmediateAnimator))
    }

    /// 在节点上执行动画组
    ///
    /// 立即返回；空组不做任何事。
    pub fn run(&self, node: &Node, group: AnimationGroup) {
        if group.is_empty() {
            trace!("空动画组，忽略");
            return;
        }

        debug!(
            mode = ?group.mode,
            count = group.len(),
            total = group.total_duration(),
            "开始动画组"
        );

        match group.mode {
            AnimationMode::Sequence => {
                run_sequence(&self.inner, node, group.items.into());
            }
            AnimationMode::Parallel => {
                for animation in &group.items {
                    submit(&self.inner, node, animation, |_| {});
                }
            }
        }
    }
}

/// 提交单个动画
///
/// 原语报告完成时先调用动画自身的完成回调，再调用 `then`。
fn submit(
    inner: &SchedulerInner,
    node: &Node,
    animation: &Animation,
    then: impl FnOnce(bool) + 'static,
) {
    let on_complete = animation.completion();
    let request = AnimationRequest::new(animation, move |finished| {
        if let Some(on_complete) = on_complete {
            on_complete(finished);
        }
        then(finished);
    });
    inner.animator.animate(node, request);
}

/// 顺序链中一项的交接状态
///
/// 完成回调在 `submit` 返回前同步触发时，剩余队列交回循环处理，不再递归。
#[derive(Default)]
struct Handoff {
    submitting: Cell<bool>,
    next: RefCell<Option<VecDeque<Animation>>>,
}

fn run_sequence(inner: &Rc<SchedulerInner>, node: &Node, mut remaining: VecDeque<Animation>) {
    loop {
        let Some(current) = remaining.pop_front() else {
            trace!("动画序列结束");
            return;
        };
        trace!(left = remaining.len(), "动画序列推进");

        let handoff = Rc::new(Handoff::default());
        handoff.submitting.set(true);

        let weak_inner: Weak<SchedulerInner> = Rc::downgrade(inner);
        let weak_node: WeakNode = node.downgrade();
        let step = handoff.clone();
        submit(inner, node, &current, move |_| {
            // 无论是否自然结束都继续
            if remaining.is_empty() {
                trace!("动画序列结束");
                return;
            }
            let (Some(inner), Some(node)) = (weak_inner.upgrade(), weak_node.upgrade()) else {
                debug!(left = remaining.len(), "调度器或节点已释放，停止动画序列");
                return;
            };
            if step.submitting.get() {
                *step.next.borrow_mut() = Some(remaining);
            } else {
                run_sequence(&inner, &node, remaining);
            }
        });

        handoff.submitting.set(false);
        let Some(next) = handoff.next.borrow_mut().take() else {
            return;
        };
        remaining = next;
    }
}
