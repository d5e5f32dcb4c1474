//! # Descriptor 模块
//!
//! 单个定时修改的不可变描述。

use std::fmt;
use std::rc::Rc;

use super::AnimationCurve;
use crate::node::Node;

/// 修改闭包
pub type Mutation = Rc<dyn Fn(&Node)>;

/// 完成回调，参数表示动画是否自然结束（`false` 为被打断或被覆盖）
pub type Completion = Rc<dyn Fn(bool)>;

/// 默认动画时长（秒）
pub const DEFAULT_DURATION: f32 = 0.3;

/// 动画描述
///
/// 构造完成后不可变；`with_*` 方法在构造阶段按值消费自身。
/// 时长与延迟为负数或 NaN 时按 0 处理。
#[derive(Clone)]
pub struct Animation {
    duration: f32,
    delay: f32,
    curve: AnimationCurve,
    mutate: Mutation,
    on_complete: Option<Completion>,
}

impl Animation {
    /// 以修改闭包创建动画，时长默认 0.3 秒，无延迟，线性曲线
    pub fn new(mutate: impl Fn(&Node) + 'static) -> Self {
        Self {
            duration: DEFAULT_DURATION,
            delay: 0.0,
            curve: AnimationCurve::default(),
            mutate: Rc::new(mutate),
            on_complete: None,
        }
    }

    /// 设置时长（秒）
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = non_negative(duration);
        self
    }

    /// 设置延迟（秒）
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = non_negative(delay);
        self
    }

    /// 设置曲线
    pub fn with_curve(mut self, curve: AnimationCurve) -> Self {
        self.curve = curve;
        self
    }

    /// 设置完成回调
    pub fn on_complete(mut self, completion: impl Fn(bool) + 'static) -> Self {
        self.on_complete = Some(Rc::new(completion));
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn curve(&self) -> AnimationCurve {
        self.curve
    }

    /// 修改闭包
    pub fn mutation(&self) -> Mutation {
        self.mutate.clone()
    }

    /// 完成回调
    pub fn completion(&self) -> Option<Completion> {
        self.on_complete.clone()
    }

    /// 从开始调度到结束的总时长（延迟 + 时长）
    pub fn span(&self) -> f32 {
        self.delay + self.duration
    }

    /// 是否需要插值
    pub fn is_animated(&self) -> bool {
        self.duration > 0.0
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("curve", &self.curve)
            .field("has_completion", &self.on_complete.is_some())
            .finish()
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}
