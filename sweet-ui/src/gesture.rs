//! # Gesture 模块
//!
//! 手势识别器接口，以及单击适配器 [`TapGesture`]。
//!
//! 识别过程本身由宿主完成，宿主把识别结果以 [`GestureEvent`] 的形式
//! 通过 [`Node::dispatch`](crate::Node::dispatch) 交给节点。

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::geometry::Point;

/// 宿主识别出的手势事件
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// 单击
    Tap {
        /// 点击位置（节点坐标系）
        location: Point,
    },
}

impl GestureEvent {
    /// 在原点处的单击
    pub fn tap() -> Self {
        Self::Tap {
            location: Point::zero(),
        }
    }
}

/// 手势识别器接口
///
/// 节点只持有识别器，不关心其具体类型。
pub trait GestureRecognizer {
    /// 处理事件
    ///
    /// # 返回
    /// - `true`: 事件被识别并处理
    /// - `false`: 事件与本识别器无关
    fn recognize(&self, event: &GestureEvent) -> bool;
}

/// 单击回调
pub type TapAction = Box<dyn Fn()>;

/// 单击手势适配器
///
/// 每识别到一次单击，就调用一次构造时传入的闭包。
pub struct TapGesture {
    action: RefCell<Option<TapAction>>,
    /// 回调执行期间是否调用过 `set_action`
    replaced: Cell<bool>,
}

impl TapGesture {
    /// 以单击回调创建识别器
    pub fn new(action: impl Fn() + 'static) -> Self {
        Self {
            action: RefCell::new(Some(Box::new(action))),
            replaced: Cell::new(false),
        }
    }

    /// 创建共享的识别器（可直接挂到节点上）
    pub fn shared(action: impl Fn() + 'static) -> Rc<Self> {
        Rc::new(Self::new(action))
    }

    /// 替换或清除单击回调
    pub fn set_action(&self, action: Option<TapAction>) {
        *self.action.borrow_mut() = action;
        self.replaced.set(true);
    }

    /// 是否设置了回调
    pub fn has_action(&self) -> bool {
        self.action.borrow().is_some()
    }
}

impl GestureRecognizer for TapGesture {
    fn recognize(&self, event: &GestureEvent) -> bool {
        match event {
            GestureEvent::Tap { .. } => {
                // 回调内可能调用 set_action，借用只在取出回调期间持有
                let action = self.action.borrow_mut().take();
                let Some(action) = action else {
                    return false;
                };
                self.replaced.set(false);
                action();
                // 回调内替换或清除过则以新状态为准
                if !self.replaced.get() {
                    *self.action.borrow_mut() = Some(action);
                }
                true
            }
        }
    }
}

impl fmt::Debug for TapGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapGesture")
            .field("has_action", &self.has_action())
            .finish()
    }
}
