//! # Timeline 模块
//!
//! 由外部按帧推进的动画原语。
//!
//! 每次请求开始时：读取可插值属性 → 执行修改 → 再读取一次 → 把属性还原到起点，
//! 之后每次 [`Timeline::advance`] 按曲线插值写回节点。
//!
//! ```rust,ignore
//! let timeline = Rc::new(Timeline::new());
//! let scheduler = Scheduler::new(timeline.clone());
//! node.ui().animate(&scheduler, templates::fade_in());
//! loop {
//!     for event in timeline.advance(dt) { /* ... */ }
//! }
//! ```
//!
//! 同一节点的同一属性以最后写入它的轨道为准；一个轨道被抢走全部属性后以
//! `false` 报告完成。完成回调总是在内部状态借用释放之后调用，
//! 因此回调里可以安全地再次调度动画。

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, trace};

use super::snapshot::{PropertySet, Snapshot};
use super::{AnimationCurve, AnimationRequest, Animator, Mutation};
use crate::node::{Node, WeakNode};

/// 轨道 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId(pub u64);

/// 时间轴事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEvent {
    /// 轨道开始插值
    Started(TrackId),
    /// 轨道自然结束
    Completed(TrackId),
    /// 轨道被覆盖、跳过或节点已释放
    Interrupted(TrackId),
}

type Finish = Box<dyn FnOnce(bool)>;

/// 等待延迟结束的请求
struct PendingTrack {
    id: TrackId,
    node: WeakNode,
    remaining: f32,
    duration: f32,
    curve: AnimationCurve,
    mutate: Mutation,
    completion: Finish,
}

/// 正在插值的轨道
struct Track {
    id: TrackId,
    node: WeakNode,
    duration: f32,
    curve: AnimationCurve,
    elapsed: f32,
    from: Snapshot,
    to: Snapshot,
    /// 仍由本轨道驱动的属性
    props: PropertySet,
    completion: Finish,
}

impl Track {
    /// 推进并写回节点
    ///
    /// # 返回
    /// - `Some(true)`: 自然结束
    /// - `Some(false)`: 节点已释放
    /// - `None`: 仍在进行中
    fn update(&mut self, dt: f32) -> Option<bool> {
        let Some(node) = self.node.upgrade() else {
            return Some(false);
        };

        self.elapsed += dt;
        let raw_progress = self.elapsed / self.duration;
        if raw_progress >= 1.0 {
            self.to.apply(&node, self.props);
            return Some(true);
        }

        let progress = self.curve.apply(raw_progress);
        self.from.lerp(&self.to, progress).apply(&node, self.props);
        None
    }
}

#[derive(Default)]
struct TimelineState {
    pending: Vec<PendingTrack>,
    tracks: Vec<Track>,
    clock: f32,
    next_id: u64,
    events: Vec<TimelineEvent>,
}

impl TimelineState {
    fn next_track_id(&mut self) -> TrackId {
        self.next_id += 1;
        TrackId(self.next_id)
    }

    /// 新轨道接管 `props` 后，移除旧轨道中对应的属性
    ///
    /// 失去全部属性的旧轨道被移除，其完成回调追加到 `finished`。
    fn supersede(&mut self, node: &Node, props: PropertySet, finished: &mut Vec<(Finish, bool)>) {
        if props.is_empty() {
            return;
        }

        let mut index = 0;
        while index < self.tracks.len() {
            let track = &mut self.tracks[index];
            if track.node.points_to(node) && track.props.intersects(props) {
                track.props.remove(props);
                if track.props.is_empty() {
                    let track = self.tracks.remove(index);
                    debug!(track = track.id.0, "动画被后续动画覆盖");
                    self.events.push(TimelineEvent::Interrupted(track.id));
                    finished.push((track.completion, false));
                    continue;
                }
            }
            index += 1;
        }
    }
}

/// 帧驱动的动画原语
///
/// 通过 `&self` 使用，内部状态由 `RefCell` 管理；
/// 与 [`super::Scheduler`] 共享时以 `Rc<Timeline>` 持有。
#[derive(Default)]
pub struct Timeline {
    state: RefCell<TimelineState>,
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Timeline")
            .field("clock", &state.clock)
            .field("pending", &state.pending.len())
            .field("tracks", &state.tracks.len())
            .finish()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// 推进时间轴
    ///
    /// 返回本次推进（以及上次推进以来 `animate` 产生）的事件。
    pub fn advance(&self, dt: f32) -> Vec<TimelineEvent> {
        let dt = if dt.is_nan() { 0.0 } else { dt.max(0.0) };
        let mut finished: Vec<(Finish, bool)> = Vec::new();
        let mut due: Vec<(PendingTrack, f32)> = Vec::new();

        {
            let mut state = self.state.borrow_mut();
            let state = &mut *state;
            state.clock += dt;

            let mut index = 0;
            while index < state.tracks.len() {
                match state.tracks[index].update(dt) {
                    Some(natural) => {
                        let track = state.tracks.remove(index);
                        trace!(track = track.id.0, natural, "动画轨道结束");
                        state.events.push(if natural {
                            TimelineEvent::Completed(track.id)
                        } else {
                            TimelineEvent::Interrupted(track.id)
                        });
                        finished.push((track.completion, natural));
                    }
                    None => index += 1,
                }
            }

            let mut index = 0;
            while index < state.pending.len() {
                let pending = &mut state.pending[index];
                pending.remaining -= dt;
                if pending.remaining <= 0.0 {
                    let overshoot = -pending.remaining;
                    due.push((state.pending.remove(index), overshoot));
                } else {
                    index += 1;
                }
            }
        }

        for (pending, overshoot) in due {
            let Some(node) = pending.node.upgrade() else {
                debug!(track = pending.id.0, "节点已释放，放弃延迟动画");
                self.state
                    .borrow_mut()
                    .events
                    .push(TimelineEvent::Interrupted(pending.id));
                finished.push((pending.completion, false));
                continue;
            };
            self.start(
                &node,
                pending.id,
                pending.duration,
                pending.curve,
                &pending.mutate,
                pending.completion,
                overshoot,
                &mut finished,
            );
        }

        run_completions(finished);
        std::mem::take(&mut self.state.borrow_mut().events)
    }

    /// 立即结束所有动画
    ///
    /// 正在插值的轨道直接写入终值，等待中的请求立即执行修改；
    /// 所有完成回调以 `false` 调用。
    pub fn skip_all(&self) {
        let (tracks, pending) = {
            let mut state = self.state.borrow_mut();
            (
                std::mem::take(&mut state.tracks),
                std::mem::take(&mut state.pending),
            )
        };
        if tracks.is_empty() && pending.is_empty() {
            return;
        }
        debug!(tracks = tracks.len(), pending = pending.len(), "跳过所有动画");

        let mut finished: Vec<(Finish, bool)> = Vec::new();
        let mut skipped = Vec::new();
        for track in tracks {
            if let Some(node) = track.node.upgrade() {
                track.to.apply(&node, track.props);
            }
            skipped.push(track.id);
            finished.push((track.completion, false));
        }
        for pending in pending {
            if let Some(node) = pending.node.upgrade() {
                (pending.mutate)(&node);
            }
            skipped.push(pending.id);
            finished.push((pending.completion, false));
        }

        self.state
            .borrow_mut()
            .events
            .extend(skipped.into_iter().map(TimelineEvent::Interrupted));
        run_completions(finished);
    }

    /// 是否还有未结束的动画（含等待延迟的）
    pub fn has_active_animations(&self) -> bool {
        self.active_count() > 0
    }

    /// 未结束的动画数量（含等待延迟的）
    pub fn active_count(&self) -> usize {
        let state = self.state.borrow();
        state.tracks.len() + state.pending.len()
    }

    /// 节点是否有未结束的动画
    pub fn is_animating(&self, node: &Node) -> bool {
        let state = self.state.borrow();
        state.tracks.iter().any(|t| t.node.points_to(node))
            || state.pending.iter().any(|p| p.node.points_to(node))
    }

    /// 累计推进的时间（秒）
    pub fn elapsed(&self) -> f32 {
        self.state.borrow().clock
    }

    /// 执行修改并登记轨道
    ///
    /// 修改闭包在借用之外运行。零时长时修改保持生效并立即以 `true` 完成。
    #[allow(clippy::too_many_arguments)]
    fn start(
        &self,
        node: &Node,
        id: TrackId,
        duration: f32,
        curve: AnimationCurve,
        mutate: &Mutation,
        completion: Finish,
        overshoot: f32,
        finished: &mut Vec<(Finish, bool)>,
    ) {
        let from = Snapshot::capture(node);
        // 写入即接管，即使写入的值与当前值相同
        let props = node.record_writes(|| mutate(node));
        let to = Snapshot::capture(node);

        let mut state = self.state.borrow_mut();
        state.supersede(node, props, finished);
        state.events.push(TimelineEvent::Started(id));

        if duration <= 0.0 {
            trace!(track = id.0, "零时长动画立即完成");
            state.events.push(TimelineEvent::Completed(id));
            finished.push((completion, true));
            return;
        }

        from.apply(node, props);
        let mut track = Track {
            id,
            node: node.downgrade(),
            duration,
            curve,
            elapsed: 0.0,
            from,
            to,
            props,
            completion,
        };
        trace!(track = id.0, duration, "动画轨道开始");

        if overshoot > 0.0 {
            if let Some(natural) = track.update(overshoot) {
                state.events.push(TimelineEvent::Completed(id));
                finished.push((track.completion, natural));
                return;
            }
        }
        state.tracks.push(track);
    }
}

impl Animator for Timeline {
    fn animate(&self, node: &Node, request: AnimationRequest) {
        let id = self.state.borrow_mut().next_track_id();

        if request.delay > 0.0 {
            trace!(track = id.0, delay = request.delay, "动画等待延迟");
            self.state.borrow_mut().pending.push(PendingTrack {
                id,
                node: node.downgrade(),
                remaining: request.delay,
                duration: request.duration,
                curve: request.curve,
                mutate: request.mutate,
                completion: request.completion,
            });
            return;
        }

        let mut finished = Vec::new();
        self.start(
            node,
            id,
            request.duration,
            request.curve,
            &request.mutate,
            request.completion,
            0.0,
            &mut finished,
        );
        run_completions(finished);
    }
}

fn run_completions(finished: Vec<(Finish, bool)>) {
    for (completion, natural) in finished {
        completion(natural);
    }
}
