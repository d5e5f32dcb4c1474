//! # Node 模块
//!
//! 保留模式的可视节点。
//!
//! ## 设计说明
//!
//! - [`Node`] 是 `Rc` 句柄，克隆只增加引用计数；相等性基于身份（同一分配）
//! - 父节点强持有子节点列表，子节点只弱引用父节点，树内不会出现引用环
//! - 内部可变性使用 `RefCell`，每次读写只短暂借用，
//!   因此修改闭包、手势回调可以任意重入节点 API
//! - [`Label`] / [`Button`] 是经 [`Capability::narrow`] 收窄后的类型化句柄

use std::cell::{Cell, RefCell};
use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::animation::PropertySet;
use crate::geometry::{Point, Rect, Size};
use crate::gesture::{GestureEvent, GestureRecognizer};
use crate::style::{Color, CornerMask, Font, FontWeight, Shadow, TextAlignment};

/// 节点的通用属性
#[derive(Debug, Clone, PartialEq)]
struct NodeProps {
    opacity: f32,
    background_color: Option<Color>,
    tint_color: Option<Color>,
    frame: Rect,
    bounds_origin: Point,
    corner_radius: f32,
    masked_corners: CornerMask,
    hidden: bool,
    interaction_enabled: bool,
    shadow: Option<Shadow>,
}

impl Default for NodeProps {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            background_color: None,
            tint_color: None,
            frame: Rect::zero(),
            bounds_origin: Point::zero(),
            corner_radius: 0.0,
            masked_corners: CornerMask::ALL,
            hidden: false,
            interaction_enabled: true,
            shadow: None,
        }
    }
}

/// 文本标签内容
#[derive(Debug, Clone, PartialEq)]
struct LabelContent {
    text: String,
    text_color: Color,
    highlighted_text_color: Option<Color>,
    alignment: TextAlignment,
    font: Font,
}

/// 按钮内容
#[derive(Debug, Clone, PartialEq)]
struct ButtonContent {
    title: String,
    title_color: Color,
    enabled: bool,
}

/// 节点的具体类型
#[derive(Debug, Clone, PartialEq)]
enum NodeContent {
    View,
    Label(LabelContent),
    Button(ButtonContent),
}

impl NodeContent {
    fn kind(&self) -> NodeKind {
        match self {
            NodeContent::View => NodeKind::View,
            NodeContent::Label(_) => NodeKind::Label,
            NodeContent::Button(_) => NodeKind::Button,
        }
    }
}

/// 节点类型标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    View,
    Label,
    Button,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::View => "View",
            NodeKind::Label => "Label",
            NodeKind::Button => "Button",
        };
        f.write_str(name)
    }
}

struct NodeInner {
    props: RefCell<NodeProps>,
    content: RefCell<NodeContent>,
    children: RefCell<Vec<Node>>,
    parent: RefCell<Weak<NodeInner>>,
    gestures: RefCell<Vec<Rc<dyn GestureRecognizer>>>,
    /// 记录期间被写入的可插值属性
    written: Cell<Option<PropertySet>>,
}

/// 可视节点句柄
#[derive(Clone)]
pub struct Node {
    inner: Rc<NodeInner>,
}

/// 节点的弱引用，不延长节点生命周期
#[derive(Clone, Default)]
pub struct WeakNode {
    inner: Weak<NodeInner>,
}

impl WeakNode {
    /// 尝试获取强引用
    pub fn upgrade(&self) -> Option<Node> {
        self.inner.upgrade().map(|inner| Node { inner })
    }

    /// 节点是否仍然存活
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// 是否指向给定节点
    pub fn points_to(&self, node: &Node) -> bool {
        Weak::as_ptr(&self.inner) == Rc::as_ptr(&node.inner)
    }
}

impl fmt::Debug for WeakNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakNode")
            .field("alive", &self.is_alive())
            .finish()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.inner).hash(state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("frame", &self.frame())
            .field("children", &self.child_count())
            .finish()
    }
}

impl AsRef<Node> for Node {
    fn as_ref(&self) -> &Node {
        self
    }
}

impl Node {
    fn from_content(content: NodeContent) -> Self {
        Self {
            inner: Rc::new(NodeInner {
                props: RefCell::new(NodeProps::default()),
                content: RefCell::new(content),
                children: RefCell::new(Vec::new()),
                parent: RefCell::new(Weak::new()),
                gestures: RefCell::new(Vec::new()),
                written: Cell::new(None),
            }),
        }
    }

    /// 创建空的容器节点
    pub fn new() -> Self {
        Self::from_content(NodeContent::View)
    }

    /// 创建指定 frame 的容器节点
    pub fn with_frame(frame: Rect) -> Self {
        let node = Self::new();
        node.set_frame(frame);
        node
    }

    /// 节点类型
    pub fn kind(&self) -> NodeKind {
        self.inner.content.borrow().kind()
    }

    /// 获取弱引用
    pub fn downgrade(&self) -> WeakNode {
        WeakNode {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// 执行 `mutate`，返回期间写入过的可插值属性
    ///
    /// 写入的值与原值相同也计入。可以嵌套，内层的写入同样计入外层。
    pub(crate) fn record_writes(&self, mutate: impl FnOnce()) -> PropertySet {
        let outer = self.inner.written.replace(Some(PropertySet::EMPTY));
        mutate();
        let written = self.inner.written.replace(outer).unwrap_or_default();
        self.mark_written(written);
        written
    }

    fn mark_written(&self, props: PropertySet) {
        if let Some(mut written) = self.inner.written.get() {
            written.insert(props);
            self.inner.written.set(Some(written));
        }
    }

    // ========== 外观 ==========

    pub fn opacity(&self) -> f32 {
        self.inner.props.borrow().opacity
    }

    /// 设置不透明度，超出 0.0 - 1.0 的值会被截断
    pub fn set_opacity(&self, opacity: f32) {
        self.inner.props.borrow_mut().opacity = opacity.clamp(0.0, 1.0);
        self.mark_written(PropertySet::OPACITY);
    }

    pub fn background_color(&self) -> Option<Color> {
        self.inner.props.borrow().background_color
    }

    pub fn set_background_color(&self, color: Option<Color>) {
        self.inner.props.borrow_mut().background_color = color;
        self.mark_written(PropertySet::BACKGROUND);
    }

    pub fn tint_color(&self) -> Option<Color> {
        self.inner.props.borrow().tint_color
    }

    pub fn set_tint_color(&self, color: Option<Color>) {
        self.inner.props.borrow_mut().tint_color = color;
        self.mark_written(PropertySet::TINT);
    }

    pub fn corner_radius(&self) -> f32 {
        self.inner.props.borrow().corner_radius
    }

    pub fn set_corner_radius(&self, radius: f32) {
        self.inner.props.borrow_mut().corner_radius = radius.max(0.0);
        self.mark_written(PropertySet::CORNER_RADIUS);
    }

    pub fn masked_corners(&self) -> CornerMask {
        self.inner.props.borrow().masked_corners
    }

    pub fn set_masked_corners(&self, corners: CornerMask) {
        self.inner.props.borrow_mut().masked_corners = corners;
    }

    pub fn is_hidden(&self) -> bool {
        self.inner.props.borrow().hidden
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.inner.props.borrow_mut().hidden = hidden;
    }

    pub fn is_interaction_enabled(&self) -> bool {
        self.inner.props.borrow().interaction_enabled
    }

    pub fn set_interaction_enabled(&self, enabled: bool) {
        self.inner.props.borrow_mut().interaction_enabled = enabled;
    }

    pub fn shadow(&self) -> Option<Shadow> {
        self.inner.props.borrow().shadow
    }

    pub fn set_shadow(&self, shadow: Option<Shadow>) {
        self.inner.props.borrow_mut().shadow = shadow;
    }

    // ========== 几何 ==========

    /// 在父节点坐标系中的矩形
    pub fn frame(&self) -> Rect {
        self.inner.props.borrow().frame
    }

    pub fn set_frame(&self, frame: Rect) {
        self.inner.props.borrow_mut().frame = frame;
        self.mark_written(PropertySet::FRAME);
    }

    /// 自身坐标系中的矩形，尺寸与 frame 一致
    pub fn bounds(&self) -> Rect {
        let props = self.inner.props.borrow();
        Rect::from_origin_size(props.bounds_origin, props.frame.size)
    }

    /// 设置 bounds
    ///
    /// 尺寸变化时保持中心点不变。
    pub fn set_bounds(&self, bounds: Rect) {
        {
            let mut props = self.inner.props.borrow_mut();
            let center = props.frame.center();
            props.bounds_origin = bounds.origin;
            props.frame = Rect::centered(center, bounds.size);
        }
        self.mark_written(PropertySet::FRAME);
        self.mark_written(PropertySet::BOUNDS_ORIGIN);
    }

    pub(crate) fn set_bounds_origin(&self, origin: Point) {
        self.inner.props.borrow_mut().bounds_origin = origin;
        self.mark_written(PropertySet::BOUNDS_ORIGIN);
    }

    pub fn size(&self) -> Size {
        self.frame().size
    }

    /// 设置尺寸（保持中心点不变）
    pub fn set_size(&self, size: Size) {
        {
            let mut props = self.inner.props.borrow_mut();
            props.frame = Rect::centered(props.frame.center(), size);
        }
        self.mark_written(PropertySet::FRAME);
    }

    pub fn origin(&self) -> Point {
        self.frame().origin
    }

    pub fn set_origin(&self, origin: Point) {
        self.inner.props.borrow_mut().frame.origin = origin;
        self.mark_written(PropertySet::FRAME);
    }

    pub fn center(&self) -> Point {
        self.frame().center()
    }

    pub fn set_center(&self, center: Point) {
        {
            let mut props = self.inner.props.borrow_mut();
            props.frame = Rect::centered(center, props.frame.size);
        }
        self.mark_written(PropertySet::FRAME);
    }

    // ========== 子节点 ==========

    /// 父节点
    pub fn parent(&self) -> Option<Node> {
        self.inner
            .parent
            .borrow()
            .upgrade()
            .map(|inner| Node { inner })
    }

    /// 子节点列表快照（按插入顺序，后面的在上层）
    pub fn children(&self) -> Vec<Node> {
        self.inner.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.inner.children.borrow().len()
    }

    /// 按索引取子节点，越界时返回 `None`
    pub fn child_at(&self, index: usize) -> Option<Node> {
        self.inner.children.borrow().get(index).cloned()
    }

    /// 子节点的索引
    pub fn index_of(&self, child: &Node) -> Option<usize> {
        self.inner.children.borrow().iter().position(|c| c == child)
    }

    /// 是否为直接子节点
    pub fn is_parent_of(&self, child: &Node) -> bool {
        child.parent().as_ref() == Some(self)
    }

    /// `self` 是否是 `other` 本身或其祖先
    fn is_ancestor_or_self_of(&self, other: &Node) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node == *self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// 检查能否把 `child` 挂到 `self` 下（不能挂自身或祖先）
    fn can_adopt(&self, child: &Node) -> bool {
        if child.is_ancestor_or_self_of(self) {
            debug!(kind = %child.kind(), "忽略：不能将节点添加为自身或其子孙的子节点");
            return false;
        }
        true
    }

    fn attach_at(&self, child: &Node, index: usize) {
        child.remove_from_parent();
        let mut children = self.inner.children.borrow_mut();
        let index = index.min(children.len());
        children.insert(index, child.clone());
        *child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
    }

    /// 追加子节点
    ///
    /// 子节点若已有父节点，会先从原父节点移除。
    pub fn add_child(&self, child: &Node) {
        if !self.can_adopt(child) {
            return;
        }
        self.attach_at(child, usize::MAX);
    }

    /// 在指定索引插入子节点，索引超出范围时追加到末尾
    pub fn insert_child(&self, child: &Node, index: usize) {
        if !self.can_adopt(child) {
            return;
        }
        self.attach_at(child, index);
    }

    /// 插入到兄弟节点之上
    ///
    /// `sibling` 不是子节点时不做任何事，返回 `false`。
    pub fn insert_child_above(&self, child: &Node, sibling: &Node) -> bool {
        self.insert_relative(child, sibling, 1)
    }

    /// 插入到兄弟节点之下
    ///
    /// `sibling` 不是子节点时不做任何事，返回 `false`。
    pub fn insert_child_below(&self, child: &Node, sibling: &Node) -> bool {
        self.insert_relative(child, sibling, 0)
    }

    fn insert_relative(&self, child: &Node, sibling: &Node, offset: usize) -> bool {
        if child == sibling || !self.is_parent_of(sibling) || !self.can_adopt(child) {
            return false;
        }
        child.remove_from_parent();
        match self.index_of(sibling) {
            Some(index) => {
                self.attach_at(child, index + offset);
                true
            }
            None => false,
        }
    }

    /// 移除直接子节点，不是子节点时返回 `false`
    pub fn remove_child(&self, child: &Node) -> bool {
        if !self.is_parent_of(child) {
            return false;
        }
        child.remove_from_parent();
        true
    }

    /// 从父节点移除自身
    pub fn remove_from_parent(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent.inner.children.borrow_mut().retain(|c| c != self);
        *self.inner.parent.borrow_mut() = Weak::new();
    }

    /// 移除所有子节点
    pub fn remove_all_children(&self) {
        let children = std::mem::take(&mut *self.inner.children.borrow_mut());
        for child in &children {
            *child.inner.parent.borrow_mut() = Weak::new();
        }
    }

    // ========== 手势 ==========

    /// 挂载手势识别器
    pub fn add_gesture(&self, recognizer: Rc<dyn GestureRecognizer>) {
        self.inner.gestures.borrow_mut().push(recognizer);
    }

    pub fn gesture_count(&self) -> usize {
        self.inner.gestures.borrow().len()
    }

    pub fn remove_gestures(&self) {
        self.inner.gestures.borrow_mut().clear();
    }

    /// 把宿主识别出的手势交给节点
    ///
    /// 隐藏、不可交互或已禁用的按钮不响应手势。
    /// 识别器按挂载顺序尝试，返回是否有识别器处理了该事件。
    pub fn dispatch(&self, event: &GestureEvent) -> bool {
        if self.is_hidden() || !self.is_interaction_enabled() {
            return false;
        }
        if let NodeContent::Button(button) = &*self.inner.content.borrow() {
            if !button.enabled {
                return false;
            }
        }
        let recognizers = self.inner.gestures.borrow().clone();
        let mut handled = false;
        for recognizer in recognizers {
            handled |= recognizer.recognize(event);
        }
        handled
    }

    // ========== 调试 ==========

    /// 以缩进文本形式输出子树，每层缩进两个空格
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out.truncate(out.trim_end().len());
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let _ = write!(out, "{:indent$}{}", "", self.kind(), indent = depth * 2);
        match &*self.inner.content.borrow() {
            NodeContent::View => {}
            NodeContent::Label(label) => {
                let _ = write!(out, " {:?}", label.text);
            }
            NodeContent::Button(button) => {
                let _ = write!(out, " {:?}", button.title);
            }
        }
        {
            let props = self.inner.props.borrow();
            let f = props.frame;
            if f != Rect::zero() {
                let _ = write!(
                    out,
                    " frame=({}, {}, {}, {})",
                    f.origin.x, f.origin.y, f.size.width, f.size.height
                );
            }
            if props.opacity != 1.0 {
                let _ = write!(out, " alpha={}", props.opacity);
            }
            if props.corner_radius != 0.0 {
                let _ = write!(out, " radius={}", props.corner_radius);
            }
            if props.hidden {
                out.push_str(" hidden");
            }
        }
        out.push('\n');
        for child in self.children() {
            child.dump_into(out, depth + 1);
        }
    }
}

/// 能力收窄
///
/// 检查节点的运行时类型是否满足某个更窄的能力，满足时返回类型化句柄。
pub trait Capability: Sized {
    fn narrow(node: &Node) -> Option<Self>;
}

impl Capability for Node {
    fn narrow(node: &Node) -> Option<Self> {
        Some(node.clone())
    }
}

/// 文本标签句柄
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(Node);

impl Capability for Label {
    fn narrow(node: &Node) -> Option<Self> {
        (node.kind() == NodeKind::Label).then(|| Self(node.clone()))
    }
}

impl AsRef<Node> for Label {
    fn as_ref(&self) -> &Node {
        &self.0
    }
}

impl From<Label> for Node {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl Label {
    /// 创建文本标签
    pub fn new(text: impl Into<String>) -> Self {
        Self(Node::from_content(NodeContent::Label(LabelContent {
            text: text.into(),
            text_color: Color::BLACK,
            highlighted_text_color: None,
            alignment: TextAlignment::default(),
            font: Font::default(),
        })))
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    fn with<R>(&self, f: impl FnOnce(&mut LabelContent) -> R) -> R {
        match &mut *self.0.inner.content.borrow_mut() {
            NodeContent::Label(content) => f(content),
            // 构造保证句柄只包裹 Label 节点
            _ => unreachable!("Label handle wraps a non-label node"),
        }
    }

    pub fn text(&self) -> String {
        self.with(|c| c.text.clone())
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.with(|c| c.text = text);
    }

    pub fn text_color(&self) -> Color {
        self.with(|c| c.text_color)
    }

    pub fn set_text_color(&self, color: Color) {
        self.with(|c| c.text_color = color);
    }

    pub fn highlighted_text_color(&self) -> Option<Color> {
        self.with(|c| c.highlighted_text_color)
    }

    pub fn set_highlighted_text_color(&self, color: Option<Color>) {
        self.with(|c| c.highlighted_text_color = color);
    }

    pub fn alignment(&self) -> TextAlignment {
        self.with(|c| c.alignment)
    }

    pub fn set_alignment(&self, alignment: TextAlignment) {
        self.with(|c| c.alignment = alignment);
    }

    pub fn font(&self) -> Font {
        self.with(|c| c.font.clone())
    }

    pub fn set_font(&self, font: Font) {
        self.with(|c| c.font = font);
    }

    /// 使用系统字体
    pub fn set_system_font(&self, size: f32, weight: FontWeight) {
        self.set_font(Font::system(size, weight));
    }
}

/// 按钮句柄
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Button(Node);

impl Capability for Button {
    fn narrow(node: &Node) -> Option<Self> {
        (node.kind() == NodeKind::Button).then(|| Self(node.clone()))
    }
}

impl AsRef<Node> for Button {
    fn as_ref(&self) -> &Node {
        &self.0
    }
}

impl From<Button> for Node {
    fn from(button: Button) -> Self {
        button.0
    }
}

impl Button {
    /// 创建按钮
    pub fn new(title: impl Into<String>) -> Self {
        Self(Node::from_content(NodeContent::Button(ButtonContent {
            title: title.into(),
            title_color: Color::BLUE,
            enabled: true,
        })))
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    fn with<R>(&self, f: impl FnOnce(&mut ButtonContent) -> R) -> R {
        match &mut *self.0.inner.content.borrow_mut() {
            NodeContent::Button(content) => f(content),
            // 构造保证句柄只包裹 Button 节点
            _ => unreachable!("Button handle wraps a non-button node"),
        }
    }

    pub fn title(&self) -> String {
        self.with(|c| c.title.clone())
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.with(|c| c.title = title);
    }

    pub fn title_color(&self) -> Color {
        self.with(|c| c.title_color)
    }

    pub fn set_title_color(&self, color: Color) {
        self.with(|c| c.title_color = color);
    }

    pub fn is_enabled(&self) -> bool {
        self.with(|c| c.enabled)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.with(|c| c.enabled = enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::TapGesture;
    use std::cell::Cell;

    fn names(node: &Node) -> Vec<String> {
        node.children()
            .iter()
            .map(|c| Label::narrow(c).map(|l| l.text()).unwrap_or_default())
            .collect()
    }

    fn labeled(parent: &Node, texts: &[&str]) -> Vec<Node> {
        texts
            .iter()
            .map(|t| {
                let node: Node = Label::new(*t).into();
                parent.add_child(&node);
                node
            })
            .collect()
    }

    #[test]
    fn test_identity_equality() {
        let a = Node::new();
        let b = Node::new();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let node = Node::new();
        node.set_opacity(1.5);
        assert_eq!(node.opacity(), 1.0);
        node.set_opacity(-0.2);
        assert_eq!(node.opacity(), 0.0);
    }

    #[test]
    fn test_set_size_keeps_center() {
        let node = Node::with_frame(Rect::new(0.0, 0.0, 100.0, 100.0));
        node.set_size(Size::new(50.0, 20.0));
        assert_eq!(node.center(), Point::new(50.0, 50.0));
        assert_eq!(node.frame(), Rect::new(25.0, 40.0, 50.0, 20.0));
    }

    #[test]
    fn test_set_center_moves_origin() {
        let node = Node::with_frame(Rect::new(0.0, 0.0, 10.0, 10.0));
        node.set_center(Point::new(100.0, 100.0));
        assert_eq!(node.origin(), Point::new(95.0, 95.0));
    }

    #[test]
    fn test_record_writes_counts_unchanged_values() {
        let node = Node::new();
        let written = node.record_writes(|| {
            node.set_opacity(1.0);
            node.set_size(Size::square(10.0));
            node.set_hidden(true);
        });

        assert!(written.contains(PropertySet::OPACITY));
        assert!(written.contains(PropertySet::FRAME));
        assert!(!written.intersects(PropertySet::BOUNDS_ORIGIN));

        // 记录之外的写入不被计入
        node.set_corner_radius(3.0);
        assert!(node.record_writes(|| {}).is_empty());
    }

    #[test]
    fn test_nested_record_writes_reach_outer() {
        let node = Node::new();
        let mut inner = PropertySet::EMPTY;
        let outer = node.record_writes(|| {
            node.set_tint_color(Some(Color::RED));
            inner = node.record_writes(|| node.set_opacity(0.0));
        });

        assert_eq!(inner, PropertySet::OPACITY);
        assert!(outer.contains(PropertySet::OPACITY));
        assert!(outer.contains(PropertySet::TINT));
    }

    #[test]
    fn test_add_and_insert_children() {
        let parent = Node::new();
        let [a, b, c] = <[Node; 3]>::try_from(labeled(&parent, &["a", "b", "c"])).unwrap();

        let d: Node = Label::new("d").into();
        parent.insert_child(&d, 1);
        assert_eq!(names(&parent), ["a", "d", "b", "c"]);

        let e: Node = Label::new("e").into();
        assert!(parent.insert_child_above(&e, &b));
        assert_eq!(names(&parent), ["a", "d", "b", "e", "c"]);

        let f: Node = Label::new("f").into();
        assert!(parent.insert_child_below(&f, &a));
        assert_eq!(names(&parent), ["f", "a", "d", "b", "e", "c"]);

        assert_eq!(c.parent(), Some(parent.clone()));
    }

    #[test]
    fn test_insert_beyond_range_appends() {
        let parent = Node::new();
        labeled(&parent, &["a"]);
        let b: Node = Label::new("b").into();
        parent.insert_child(&b, 42);
        assert_eq!(names(&parent), ["a", "b"]);
    }

    #[test]
    fn test_insert_relative_to_missing_sibling_is_noop() {
        let parent = Node::new();
        labeled(&parent, &["a"]);
        let stranger = Node::new();
        let child = Node::new();
        assert!(!parent.insert_child_above(&child, &stranger));
        assert_eq!(parent.child_count(), 1);
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_reparenting_moves_child() {
        let first = Node::new();
        let second = Node::new();
        let child = Node::new();

        first.add_child(&child);
        second.add_child(&child);

        assert_eq!(first.child_count(), 0);
        assert_eq!(second.child_count(), 1);
        assert_eq!(child.parent(), Some(second));
    }

    #[test]
    fn test_readding_moves_to_top() {
        let parent = Node::new();
        let [a, _b] = <[Node; 2]>::try_from(labeled(&parent, &["a", "b"])).unwrap();
        parent.add_child(&a);
        assert_eq!(names(&parent), ["b", "a"]);
    }

    #[test]
    fn test_cannot_adopt_ancestor() {
        let root = Node::new();
        let child = Node::new();
        root.add_child(&child);

        child.add_child(&root);
        root.add_child(&root);

        assert_eq!(child.child_count(), 0);
        assert_eq!(root.child_count(), 1);
    }

    #[test]
    fn test_remove_non_child_is_noop() {
        let parent = Node::new();
        labeled(&parent, &["a", "b"]);
        let stranger = Node::new();

        assert!(!parent.remove_child(&stranger));
        assert_eq!(parent.child_count(), 2);
    }

    #[test]
    fn test_remove_preserves_order() {
        let parent = Node::new();
        let nodes = labeled(&parent, &["a", "b", "c", "d"]);
        assert!(parent.remove_child(&nodes[1]));
        assert_eq!(names(&parent), ["a", "c", "d"]);
        assert!(nodes[1].parent().is_none());
    }

    #[test]
    fn test_remove_all_children() {
        let parent = Node::new();
        let nodes = labeled(&parent, &["a", "b"]);
        parent.remove_all_children();
        assert_eq!(parent.child_count(), 0);
        assert!(nodes.iter().all(|n| n.parent().is_none()));
    }

    #[test]
    fn test_child_at_out_of_range() {
        let parent = Node::new();
        labeled(&parent, &["a"]);
        assert!(parent.child_at(0).is_some());
        assert!(parent.child_at(1).is_none());
    }

    #[test]
    fn test_parent_link_is_weak() {
        let child = Node::new();
        {
            let parent = Node::new();
            parent.add_child(&child);
            assert!(child.parent().is_some());
        }
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_weak_node_does_not_keep_alive() {
        let node = Node::new();
        let weak = node.downgrade();
        assert!(weak.upgrade().is_some());
        drop(node);
        assert!(!weak.is_alive());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_narrow() {
        let view = Node::new();
        let label: Node = Label::new("hi").into();
        let button: Node = Button::new("ok").into();

        assert!(Label::narrow(&view).is_none());
        assert!(Label::narrow(&label).is_some());
        assert!(Button::narrow(&label).is_none());
        assert!(Button::narrow(&button).is_some());
        assert!(Node::narrow(&button).is_some());
    }

    #[test]
    fn test_dispatch_respects_visibility_and_interaction() {
        let node = Node::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        node.add_gesture(TapGesture::shared(move || counter.set(counter.get() + 1)));

        assert!(node.dispatch(&GestureEvent::tap()));
        assert_eq!(count.get(), 1);

        node.set_hidden(true);
        assert!(!node.dispatch(&GestureEvent::tap()));
        node.set_hidden(false);

        node.set_interaction_enabled(false);
        assert!(!node.dispatch(&GestureEvent::tap()));

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_disabled_button_ignores_taps() {
        let button = Button::new("ok");
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        button
            .node()
            .add_gesture(TapGesture::shared(move || counter.set(counter.get() + 1)));

        button.set_enabled(false);
        assert!(!button.node().dispatch(&GestureEvent::tap()));
        button.set_enabled(true);
        assert!(button.node().dispatch(&GestureEvent::tap()));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_dump_tree() {
        let root = Node::with_frame(Rect::new(0.0, 0.0, 320.0, 480.0));
        let title = Label::new("Hello");
        title.node().set_opacity(0.5);
        root.add_child(title.node());
        let card = Node::new();
        card.set_hidden(true);
        card.set_corner_radius(8.0);
        root.add_child(&card);
        card.add_child(Button::new("OK").node());

        insta::assert_snapshot!(root.dump_tree(), @r#"
        View frame=(0, 0, 320, 480)
          Label "Hello" alpha=0.5
          View radius=8 hidden
            Button "OK"
        "#);
    }
}
