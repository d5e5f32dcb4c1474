//! # Dsl 模块
//!
//! 链式修改代理。
//!
//! `node.ui()` 返回一个借用节点的轻量代理，每个操作立即作用到节点上并返回代理本身，
//! 因此可以一路链下去：
//!
//! ```rust,ignore
//! let mut title: Option<Label> = None;
//! card.ui()
//!     .background(Color::RED)
//!     .corner_radius(10.0)
//!     .add_content([Label::new("标题").ui().link(&mut title).node().clone()])
//!     .animate_sequence(&scheduler, [templates::fade_in()]);
//! ```
//!
//! 所有操作都基于 [`Dsl::modify`]。代理不拥有节点，也不做任何延迟求值。

use std::rc::Rc;

use crate::animation::{Animation, AnimationGroup, AnimationMode, Scheduler};
use crate::builder::{Slot, attach_pinned, combine};
use crate::geometry::{Point, Rect, Size};
use crate::gesture::{GestureRecognizer, TapGesture};
use crate::node::{Button, Capability, Label, Node};
use crate::style::{Color, CornerMask, Font, FontWeight, Shadow, TextAlignment};

/// 链式修改代理
#[derive(Debug)]
pub struct Dsl<'a, T> {
    target: &'a T,
}

impl<T> Clone for Dsl<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Dsl<'_, T> {}

impl Node {
    /// 链式修改代理
    pub fn ui(&self) -> Dsl<'_, Node> {
        Dsl { target: self }
    }
}

impl Label {
    /// 链式修改代理（含文本操作）
    pub fn ui(&self) -> Dsl<'_, Label> {
        Dsl { target: self }
    }
}

impl Button {
    /// 链式修改代理（含标题操作）
    pub fn ui(&self) -> Dsl<'_, Button> {
        Dsl { target: self }
    }
}

impl<'a, T: AsRef<Node>> Dsl<'a, T> {
    /// 被包裹的目标
    pub fn target(&self) -> &'a T {
        self.target
    }

    /// 被包裹的节点
    pub fn node(&self) -> &'a Node {
        self.target.as_ref()
    }

    /// 同步执行任意修改
    pub fn modify(self, f: impl FnOnce(&T)) -> Self {
        f(self.target);
        self
    }

    /// 节点满足能力 `C` 时把类型化句柄写入 `slot`，否则保持不变
    pub fn link<C: Capability>(self, slot: &mut Option<C>) -> Self {
        if let Some(handle) = C::narrow(self.node()) {
            *slot = Some(handle);
        }
        self
    }

    // ========== 外观 ==========

    pub fn alpha(self, value: f32) -> Self {
        self.modify(|t| t.as_ref().set_opacity(value))
    }

    pub fn background(self, color: impl Into<Option<Color>>) -> Self {
        let color = color.into();
        self.modify(|t| t.as_ref().set_background_color(color))
    }

    pub fn tint(self, color: impl Into<Option<Color>>) -> Self {
        let color = color.into();
        self.modify(|t| t.as_ref().set_tint_color(color))
    }

    pub fn hide(self) -> Self {
        self.modify(|t| t.as_ref().set_hidden(true))
    }

    pub fn show(self) -> Self {
        self.modify(|t| t.as_ref().set_hidden(false))
    }

    pub fn interaction(self, enabled: bool) -> Self {
        self.modify(|t| t.as_ref().set_interaction_enabled(enabled))
    }

    /// 四角圆角
    pub fn corner_radius(self, radius: f32) -> Self {
        self.corner_radius_masked(radius, CornerMask::ALL)
    }

    /// 仅对部分角设置圆角
    pub fn corner_radius_masked(self, radius: f32, corners: impl Into<CornerMask>) -> Self {
        let corners = corners.into();
        self.modify(|t| {
            let node = t.as_ref();
            node.set_corner_radius(radius);
            node.set_masked_corners(corners);
        })
    }

    pub fn shadow(self, shadow: impl Into<Option<Shadow>>) -> Self {
        let shadow = shadow.into();
        self.modify(|t| t.as_ref().set_shadow(shadow))
    }

    // ========== 几何 ==========

    pub fn frame(self, frame: Rect) -> Self {
        self.modify(|t| t.as_ref().set_frame(frame))
    }

    pub fn bounds(self, bounds: Rect) -> Self {
        self.modify(|t| t.as_ref().set_bounds(bounds))
    }

    pub fn origin(self, origin: Point) -> Self {
        self.modify(|t| t.as_ref().set_origin(origin))
    }

    pub fn size(self, size: Size) -> Self {
        self.modify(|t| t.as_ref().set_size(size))
    }

    pub fn center(self, center: Point) -> Self {
        self.modify(|t| t.as_ref().set_center(center))
    }

    // ========== 手势 ==========

    /// 挂载手势识别器
    pub fn gesture<G: GestureRecognizer + 'static>(self, recognizer: Rc<G>) -> Self {
        self.modify(|t| t.as_ref().add_gesture(recognizer))
    }

    /// 单击时调用 `action`
    pub fn tap_action(self, action: impl Fn() + 'static) -> Self {
        self.gesture(TapGesture::shared(action))
    }

    // ========== 子节点 ==========

    /// 追加子节点
    pub fn add(self, child: impl AsRef<Node>) -> Self {
        self.modify(|t| t.as_ref().add_child(child.as_ref()))
    }

    /// 在索引处插入子节点，超出范围时追加
    pub fn add_at(self, child: impl AsRef<Node>, index: usize) -> Self {
        self.modify(|t| t.as_ref().insert_child(child.as_ref(), index))
    }

    /// 插入到 `sibling` 之上；`sibling` 不是子节点时不做任何事
    pub fn add_above(self, child: impl AsRef<Node>, sibling: impl AsRef<Node>) -> Self {
        self.modify(|t| {
            t.as_ref().insert_child_above(child.as_ref(), sibling.as_ref());
        })
    }

    /// 插入到 `sibling` 之下；`sibling` 不是子节点时不做任何事
    pub fn add_below(self, child: impl AsRef<Node>, sibling: impl AsRef<Node>) -> Self {
        self.modify(|t| {
            t.as_ref().insert_child_below(child.as_ref(), sibling.as_ref());
        })
    }

    /// 组合内容并挂载，内容铺满当前节点
    pub fn add_content<I>(self, slots: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Slot>,
    {
        let content = combine(slots);
        self.modify(|t| attach_pinned(t.as_ref(), &content))
    }

    /// 移除子节点；不是子节点时不做任何事
    pub fn remove(self, child: impl AsRef<Node>) -> Self {
        self.modify(|t| {
            t.as_ref().remove_child(child.as_ref());
        })
    }

    /// 移除索引处的子节点；越界时不做任何事
    pub fn remove_at(self, index: usize) -> Self {
        self.modify(|t| {
            let node = t.as_ref();
            if let Some(child) = node.child_at(index) {
                node.remove_child(&child);
            }
        })
    }

    /// 移除紧挨在 `sibling` 之上的子节点
    pub fn remove_above(self, sibling: impl AsRef<Node>) -> Self {
        match self.node().index_of(sibling.as_ref()) {
            Some(index) => self.remove_at(index + 1),
            None => self,
        }
    }

    /// 移除紧挨在 `sibling` 之下的子节点
    pub fn remove_below(self, sibling: impl AsRef<Node>) -> Self {
        match self.node().index_of(sibling.as_ref()) {
            Some(index) if index > 0 => self.remove_at(index - 1),
            _ => self,
        }
    }

    /// 移除所有子节点
    pub fn remove_subviews(self) -> Self {
        self.modify(|t| t.as_ref().remove_all_children())
    }

    // ========== 动画 ==========

    /// 交给调度器执行动画组
    pub fn animate(self, scheduler: &Scheduler, group: impl Into<AnimationGroup>) -> Self {
        scheduler.run(self.node(), group.into());
        self
    }

    /// 依次执行
    pub fn animate_sequence(
        self,
        scheduler: &Scheduler,
        items: impl IntoIterator<Item = Animation>,
    ) -> Self {
        self.animate(scheduler, AnimationGroup::new(AnimationMode::Sequence, items))
    }

    /// 同时执行
    pub fn animate_parallel(
        self,
        scheduler: &Scheduler,
        items: impl IntoIterator<Item = Animation>,
    ) -> Self {
        self.animate(scheduler, AnimationGroup::new(AnimationMode::Parallel, items))
    }
}

impl<'a, T: AsRef<Node> + Capability + 'static> Dsl<'a, T> {
    /// 单击时以类型化句柄调用 `action`
    ///
    /// 回调只持有目标的弱引用，目标释放后单击不再触发回调。
    pub fn tap_action_with(self, action: impl Fn(&T) + 'static) -> Self {
        let weak = self.node().downgrade();
        self.tap_action(move || {
            if let Some(target) = weak.upgrade().as_ref().and_then(T::narrow) {
                action(&target);
            }
        })
    }
}

impl Dsl<'_, Label> {
    pub fn text(self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.modify(|label| label.set_text(text))
    }

    pub fn text_color(self, color: Color) -> Self {
        self.modify(|label| label.set_text_color(color))
    }

    pub fn highlighted_text_color(self, color: impl Into<Option<Color>>) -> Self {
        let color = color.into();
        self.modify(|label| label.set_highlighted_text_color(color))
    }

    pub fn alignment(self, alignment: TextAlignment) -> Self {
        self.modify(|label| label.set_alignment(alignment))
    }

    pub fn font(self, font: Font) -> Self {
        self.modify(|label| label.set_font(font))
    }

    /// 系统字体
    pub fn system_font(self, size: f32, weight: FontWeight) -> Self {
        self.modify(|label| label.set_system_font(size, weight))
    }

    /// 同时设置文本、对齐方式与颜色
    pub fn text_styled(self, text: impl Into<String>, alignment: TextAlignment, color: Color) -> Self {
        self.text(text).alignment(alignment).text_color(color)
    }
}

impl Dsl<'_, Button> {
    pub fn title(self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.modify(|button| button.set_title(title))
    }

    pub fn title_color(self, color: Color) -> Self {
        self.modify(|button| button.set_title_color(color))
    }

    pub fn enabled(self, enabled: bool) -> Self {
        self.modify(|button| button.set_enabled(enabled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::when;
    use crate::gesture::GestureEvent;
    use crate::style::Corner;
    use std::cell::Cell;

    #[test]
    fn test_chain_returns_same_proxy() {
        let node = Node::new();
        let proxy = node.ui();
        let after = proxy.alpha(0.5).background(Color::RED).corner_radius(10.0);

        assert_eq!(after.node(), proxy.node());
        assert_eq!(node.opacity(), 0.5);
        assert_eq!(node.background_color(), Some(Color::RED));
        assert_eq!(node.corner_radius(), 10.0);
        assert_eq!(node.masked_corners(), CornerMask::ALL);
    }

    #[test]
    fn test_modify_runs_synchronously() {
        let node = Node::new();
        let ran = Cell::new(false);
        node.ui().modify(|_| ran.set(true));
        assert!(ran.get());
    }

    #[test]
    fn test_link_assigns_on_match() {
        let label = Label::new("hi");
        let mut slot: Option<Label> = None;
        label.node().ui().link(&mut slot);
        assert_eq!(slot.as_ref(), Some(&label));
    }

    #[test]
    fn test_link_leaves_slot_on_mismatch() {
        let previous = Label::new("old");
        let mut slot = Some(previous.clone());

        Node::new().ui().link(&mut slot);
        assert_eq!(slot.as_ref(), Some(&previous));

        // 重复 link 保留最近一次成功的赋值
        let newer = Label::new("new");
        newer.ui().link(&mut slot);
        Button::new("b").ui().link(&mut slot);
        assert_eq!(slot.as_ref(), Some(&newer));
    }

    #[test]
    fn test_masked_corner_radius() {
        let node = Node::new();
        node.ui().corner_radius_masked(6.0, CornerMask::TOP);
        assert!(node.masked_corners().contains(Corner::TopLeft));
        assert!(!node.masked_corners().contains(Corner::BottomLeft));
    }

    #[test]
    fn test_visibility_and_interaction() {
        let node = Node::new();
        node.ui().hide().interaction(false);
        assert!(node.is_hidden());
        assert!(!node.is_interaction_enabled());
        node.ui().show();
        assert!(!node.is_hidden());
    }

    #[test]
    fn test_geometry_operations() {
        let node = Node::new();
        node.ui()
            .frame(Rect::new(0.0, 0.0, 100.0, 100.0))
            .size(Size::square(50.0))
            .center(Point::new(200.0, 200.0));
        assert_eq!(node.frame(), Rect::new(175.0, 175.0, 50.0, 50.0));

        node.ui().origin(Point::zero());
        assert_eq!(node.center(), Point::new(25.0, 25.0));
    }

    #[test]
    fn test_add_and_relative_insert() {
        let parent = Node::new();
        let a = Node::new();
        let b = Node::new();
        let c = Node::new();
        let d = Node::new();

        parent.ui().add(&a).add(&c).add_above(&b, &a).add_at(&d, 0);
        assert_eq!(parent.children(), vec![d.clone(), a.clone(), b.clone(), c.clone()]);

        let stray = Node::new();
        let orphan = Node::new();
        parent.ui().add_below(&stray, &orphan);
        assert_eq!(parent.child_count(), 4);
        assert!(stray.parent().is_none());
    }

    #[test]
    fn test_remove_non_child_is_noop() {
        let parent = Node::new();
        let a = Node::new();
        parent.ui().add(&a);

        let other = Node::new();
        parent.ui().remove(&other).remove_at(5);
        assert_eq!(parent.child_count(), 1);

        parent.ui().remove(&a);
        assert_eq!(parent.child_count(), 0);
    }

    #[test]
    fn test_remove_relative_to_sibling() {
        let parent = Node::new();
        let a = Node::new();
        let b = Node::new();
        let c = Node::new();
        parent.ui().add(&a).add(&b).add(&c);

        parent.ui().remove_above(&b);
        assert_eq!(parent.children(), vec![a.clone(), b.clone()]);

        parent.ui().remove_below(&b);
        assert_eq!(parent.children(), vec![b.clone()]);

        // 没有更低的兄弟节点
        parent.ui().remove_below(&b).remove_above(&b);
        assert_eq!(parent.children(), vec![b]);
    }

    #[test]
    fn test_remove_subviews() {
        let parent = Node::new();
        parent.ui().add(Node::new()).add(Node::new());
        parent.ui().remove_subviews();
        assert_eq!(parent.child_count(), 0);
    }

    #[test]
    fn test_add_content_pins_to_bounds() {
        let card = Node::with_frame(Rect::new(10.0, 10.0, 80.0, 40.0));
        let title = Label::new("title");
        card.ui().add_content([Slot::from(title.clone()), when(false, Node::new)]);

        assert_eq!(card.children(), vec![title.node().clone()]);
        assert_eq!(title.node().frame(), Rect::new(0.0, 0.0, 80.0, 40.0));
    }

    #[test]
    fn test_tap_action() {
        let node = Node::new();
        let taps = Rc::new(Cell::new(0));
        let counter = taps.clone();
        node.ui().tap_action(move || counter.set(counter.get() + 1));

        assert!(node.dispatch(&GestureEvent::tap()));
        assert!(node.dispatch(&GestureEvent::tap()));
        assert_eq!(taps.get(), 2);

        node.ui().hide();
        assert!(!node.dispatch(&GestureEvent::tap()));
        assert_eq!(taps.get(), 2);
    }

    #[test]
    fn test_tap_action_with_typed_target() {
        let button = Button::new("Go");
        button.ui().tap_action_with(|b: &Button| b.set_title("Tapped"));

        button.node().dispatch(&GestureEvent::tap());
        assert_eq!(button.title(), "Tapped");
    }

    #[test]
    fn test_tap_action_with_does_not_keep_target_alive() {
        let button = Button::new("Go");
        let weak = button.node().downgrade();
        button.ui().tap_action_with(|_: &Button| {});
        drop(button);
        assert!(!weak.is_alive());
    }

    #[test]
    fn test_label_operations() {
        let label = Label::new("");
        label
            .ui()
            .text_styled("Hello", TextAlignment::Center, Color::BLUE)
            .highlighted_text_color(Color::RED)
            .system_font(20.0, FontWeight::Bold);

        assert_eq!(label.text(), "Hello");
        assert_eq!(label.alignment(), TextAlignment::Center);
        assert_eq!(label.text_color(), Color::BLUE);
        assert_eq!(label.highlighted_text_color(), Some(Color::RED));
        assert_eq!(label.font(), Font::system(20.0, FontWeight::Bold));
    }

    #[test]
    fn test_button_operations() {
        let button = Button::new("A");
        button.ui().title("B").title_color(Color::GREEN).enabled(false);
        assert_eq!(button.title(), "B");
        assert_eq!(button.title_color(), Color::GREEN);
        assert!(!button.is_enabled());
    }

    #[test]
    fn test_animate_with_immediate_scheduler() {
        let scheduler = Scheduler::immediate();
        let node = Node::with_frame(Rect::new(0.0, 0.0, 100.0, 100.0));
        node.ui()
            .alpha(0.0)
            .animate_sequence(&scheduler, [
                crate::animation::templates::fade_in(),
                crate::animation::templates::resize(Size::square(200.0)),
            ]);

        assert_eq!(node.opacity(), 1.0);
        assert_eq!(node.size(), Size::square(200.0));
    }
}
