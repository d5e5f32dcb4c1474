//! # Scene 模块
//!
//! 演示场景：屏幕中央的红色卡片，卡片内是标题和按钮。

use sweet_ui::config::{AnimationDefaults, TimelineConfig};
use sweet_ui::{
    AnimationCurve, Button, Color, Environment, Label, Node, Point, Scheduler, Size, TextAlignment,
    Timeline, TimelineEvent, ViewBuilder, templates,
};
use tracing::{debug, info, warn};

/// 卡片初始边长
pub const CARD_SIDE: f32 = 100.0;

/// 卡片放大后的边长
pub const CARD_EXPANDED_SIDE: f32 = 200.0;

/// 跳过剩余动画的最大轮数
///
/// 每轮跳过的顺序项会在完成回调里登记下一项，需要多轮才能走完。
pub const MAX_SKIP_ROUNDS: usize = 64;

/// 演示场景
pub struct DemoScene {
    /// 铺满屏幕的根节点
    pub root: Node,
    pub card: Node,
    pub title: Label,
    pub button: Button,
}

impl DemoScene {
    /// 构建场景（不含动画）
    pub fn build(env: &Environment) -> Self {
        let title = Label::new("Sweet UI");
        title
            .ui()
            .text_styled("Sweet UI", TextAlignment::Center, Color::WHITE);

        let button = Button::new("Start");
        button
            .ui()
            .title_color(Color::WHITE)
            .tap_action_with(|b: &Button| b.set_title("Started"));

        let card = Node::new();
        card.ui()
            .size(Size::square(CARD_SIDE))
            .center(env.screen_center())
            .corner_radius(10.0)
            .background(Color::RED)
            .alpha(0.0)
            .add_content([ViewBuilder::new()
                .child(title.clone())
                .child(button.clone())
                .build()]);

        let root = Node::with_frame(env.screen_bounds());
        root.ui().add(&card);

        Self {
            root,
            card,
            title,
            button,
        }
    }

    /// 登记演示动画
    ///
    /// - 卡片：先用 5 秒缓入缓出淡入，再放大
    /// - 按钮：变为半透明与位移同时进行
    pub fn animate(&self, scheduler: &Scheduler, defaults: &AnimationDefaults) {
        self.card.ui().animate_sequence(
            scheduler,
            [
                templates::fade_in()
                    .with_duration(5.0)
                    .with_curve(AnimationCurve::EaseInOut),
                defaults.template(templates::resize(Size::square(CARD_EXPANDED_SIDE))),
            ],
        );

        self.button.ui().animate_parallel(
            scheduler,
            [
                defaults.template(templates::move_origin(Point::new(0.0, 10.0))),
                defaults
                    .animation(|node| node.set_opacity(0.5))
                    .with_delay(1.0),
            ],
        );

        info!("演示动画已登记");
    }
}

/// 按固定帧率推进时间轴，最多 `seconds` 秒，然后跳过剩余动画
///
/// 返回推进的帧数。
pub fn play(timeline: &Timeline, config: &TimelineConfig, seconds: f32) -> u64 {
    let step = config.frame_step();
    let max_frames = (seconds.max(0.0) * config.frame_rate as f32).ceil() as u64;
    let mut frames = 0;
    while frames < max_frames && timeline.has_active_animations() {
        for event in timeline.advance(step) {
            match event {
                TimelineEvent::Started(id) => debug!(track = id.0, "动画开始"),
                TimelineEvent::Completed(id) => debug!(track = id.0, "动画完成"),
                TimelineEvent::Interrupted(id) => debug!(track = id.0, "动画中断"),
            }
        }
        frames += 1;
    }

    info!(
        frames,
        elapsed = timeline.elapsed(),
        remaining = timeline.active_count(),
        "时间轴推进结束"
    );

    let mut rounds = 0;
    while timeline.has_active_animations() {
        if rounds == MAX_SKIP_ROUNDS {
            warn!(remaining = timeline.active_count(), "跳过轮数已达上限，仍有动画未结束");
            break;
        }
        timeline.skip_all();
        rounds += 1;
    }
    if rounds > 0 {
        debug!(rounds, "已跳过剩余动画");
    }

    frames
}
