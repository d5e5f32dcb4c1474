//! # Builder 模块
//!
//! 把一组"产出的节点"（条件分支可能不产出）组合成单个节点。
//!
//! ## 组合规则
//!
//! 1. 先过滤掉所有 [`Slot::Absent`]
//! 2. 没有节点：返回新的空容器
//! 3. 恰好一个节点：直接返回该节点本身，不再额外包一层容器
//! 4. 多个节点：返回新容器，按顺序挂载所有节点
//!
//! ```rust,ignore
//! let content = ViewBuilder::new()
//!     .child(title)
//!     .child_if(show_subtitle, || subtitle.clone())
//!     .child_if_else(logged_in, || avatar(), || login_button())
//!     .build();
//! ```

use crate::geometry::{Point, Rect};
use crate::node::{Button, Label, Node};

/// 组合输入中的一个位置
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// 产出的节点
    Present(Node),
    /// 条件分支未产出节点
    Absent,
}

impl Slot {
    /// 转为 `Option`
    pub fn into_node(self) -> Option<Node> {
        match self {
            Slot::Present(node) => Some(node),
            Slot::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Slot::Present(_))
    }
}

impl From<Node> for Slot {
    fn from(node: Node) -> Self {
        Slot::Present(node)
    }
}

impl From<&Node> for Slot {
    fn from(node: &Node) -> Self {
        Slot::Present(node.clone())
    }
}

impl From<Label> for Slot {
    fn from(label: Label) -> Self {
        Slot::Present(label.into())
    }
}

impl From<Button> for Slot {
    fn from(button: Button) -> Self {
        Slot::Present(button.into())
    }
}

impl From<Option<Node>> for Slot {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Slot::Absent, Slot::Present)
    }
}

/// 组合节点
///
/// 只会修改自己新建的容器（挂载子节点），不会修改输入节点的其他属性。
pub fn combine<I>(slots: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Slot>,
{
    let mut present: Vec<Node> = slots
        .into_iter()
        .filter_map(|slot| slot.into().into_node())
        .collect();

    if present.len() == 1 {
        // 单个节点直接返回，避免无意义的嵌套
        return present.remove(0);
    }

    let container = Node::new();
    for node in &present {
        container.add_child(node);
    }
    container
}

/// if / else 分支：只求值被选中的分支
pub fn branch(
    condition: bool,
    then: impl FnOnce() -> Node,
    otherwise: impl FnOnce() -> Node,
) -> Slot {
    if condition {
        Slot::Present(then())
    } else {
        Slot::Present(otherwise())
    }
}

/// 不带 else 的 if：条件不成立时产出 [`Slot::Absent`]
pub fn when(condition: bool, then: impl FnOnce() -> Node) -> Slot {
    if condition {
        Slot::Present(then())
    } else {
        Slot::Absent
    }
}

/// 流式累积子节点的构建器
#[derive(Debug, Default)]
pub struct ViewBuilder {
    slots: Vec<Slot>,
}

impl ViewBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加任意位置
    pub fn slot(mut self, slot: impl Into<Slot>) -> Self {
        self.slots.push(slot.into());
        self
    }

    /// 追加节点
    pub fn child(self, node: impl Into<Node>) -> Self {
        self.slot(Slot::Present(node.into()))
    }

    /// 条件成立时追加节点
    pub fn child_if(self, condition: bool, then: impl FnOnce() -> Node) -> Self {
        self.slot(when(condition, then))
    }

    /// 按条件在两个节点中选择一个追加
    pub fn child_if_else(
        self,
        condition: bool,
        then: impl FnOnce() -> Node,
        otherwise: impl FnOnce() -> Node,
    ) -> Self {
        self.slot(branch(condition, then, otherwise))
    }

    /// 已累积的位置数量（含 Absent）
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 组合为单个节点
    pub fn build(self) -> Node {
        combine(self.slots)
    }
}

impl Node {
    /// 创建容器，并把组合后的内容挂载为唯一子节点，铺满容器
    pub fn with_content<I>(frame: Rect, slots: I) -> Node
    where
        I: IntoIterator,
        I::Item: Into<Slot>,
    {
        let container = Node::with_frame(frame);
        let content = combine(slots);
        attach_pinned(&container, &content);
        container
    }
}

/// 挂载子节点并让其 frame 与父节点 bounds 一致
pub(crate) fn attach_pinned(parent: &Node, content: &Node) {
    parent.add_child(content);
    content.set_frame(Rect::from_origin_size(Point::zero(), parent.size()));
}
