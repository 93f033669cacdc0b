//! Screen transition engine. One eased slide at a time: the view offset
//! moves from the source screen's slot to the destination's and every
//! screen is repositioned relative to it.

use crate::error::{LensError, LensResult};
use crate::host::Scene;
use crate::screen::{ScreenId, ScreenRegistry};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Maps `t` in [0, 1] to progress in [0, 1].
pub type EasingFn = fn(f32) -> f32;

pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Cubic ease-in-out: slow start, slow end, never leaves [0, 1].
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Time-driven sampler between two numeric endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    pub start: f32,
    pub end: f32,
    pub duration: Duration,
    pub easing: EasingFn,
}

impl Sampler {
    pub fn sample(&self, elapsed: Duration) -> f32 {
        if self.is_done(elapsed) {
            // Exact endpoint, whatever the float error of the curve
            return self.end;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.start + (self.end - self.start) * (self.easing)(t)
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(pub u64);

#[derive(Debug, Clone, Copy)]
pub struct TransitionJob {
    pub id: JobId,
    pub from: ScreenId,
    pub to: ScreenId,
    pub duration: Duration,
    pub easing: EasingFn,
}

/// Runs transition jobs against the host scene. Not re-entrant: a second
/// `animate` while a job is in flight is rejected.
pub struct TransitionEngine {
    scene: Arc<dyn Scene>,
    registry: ScreenRegistry,
    duration: Duration,
    frame: Duration,
    easing: EasingFn,
    active: Option<JobId>,
    next_id: u64,
}

impl TransitionEngine {
    pub fn new(
        scene: Arc<dyn Scene>,
        registry: ScreenRegistry,
        duration: Duration,
        frame: Duration,
    ) -> Self {
        Self {
            scene,
            registry,
            duration,
            frame,
            easing: ease_in_out_cubic,
            active: None,
            next_id: 1,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<JobId> {
        self.active
    }

    /// Start sliding from `from` to `to`. `on_done` runs once the final
    /// frame has been written.
    pub fn animate<F, Fut>(
        &mut self,
        from: ScreenId,
        to: ScreenId,
        on_done: F,
    ) -> LensResult<TransitionJob>
    where
        F: FnOnce(TransitionJob) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if let Some(active) = self.active {
            debug!(?active, ?from, ?to, "transition rejected, engine busy");
            return Err(LensError::TransitionBusy);
        }

        let job = TransitionJob {
            id: JobId(self.next_id),
            from,
            to,
            duration: self.duration,
            easing: self.easing,
        };
        self.next_id += 1;
        self.active = Some(job.id);

        let width = self.registry.viewport_width();
        let sampler = Sampler {
            start: from.slot() as f32 * width,
            end: to.slot() as f32 * width,
            duration: job.duration,
            easing: job.easing,
        };
        info!(job = job.id.0, ?from, ?to, "transition started");

        let scene = self.scene.clone();
        let registry = self.registry.clone();
        let frame = self.frame;
        tokio::spawn(async move {
            let started = Instant::now();
            let mut frames = tokio::time::interval(frame);
            frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                frames.tick().await;
                let elapsed = started.elapsed();
                apply_offset(scene.as_ref(), &registry, sampler.sample(elapsed));
                if sampler.is_done(elapsed) {
                    break;
                }
            }
            on_done(job).await;
        });

        Ok(job)
    }

    /// Mark `id` as finished. Returns false for a job that is not the active one.
    pub fn finish(&mut self, id: JobId) -> bool {
        if self.active == Some(id) {
            self.active = None;
            info!(job = id.0, "transition finished");
            true
        } else {
            false
        }
    }
}

/// Position every screen relative to the view offset.
pub fn apply_offset(scene: &dyn Scene, registry: &ScreenRegistry, offset: f32) {
    for screen in ScreenId::ALL {
        scene.set_transform_x(registry.handle(screen), registry.home_x(screen) - offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessScene;

    #[test]
    fn test_ease_endpoints_exact_and_bounded() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        for i in 0..=100 {
            let v = ease_in_out_cubic(i as f32 / 100.0);
            assert!((0.0..=1.0).contains(&v));
        }
        assert_eq!(ease_in_out_cubic(1.4), 1.0);
    }

    #[test]
    fn test_sampler_hits_end_exactly() {
        let sampler = Sampler {
            start: 390.0,
            end: 780.0,
            duration: Duration::from_millis(300),
            easing: ease_in_out_cubic,
        };
        assert_eq!(sampler.sample(Duration::ZERO), 390.0);
        let mid = sampler.sample(Duration::from_millis(150));
        assert!(mid > 390.0 && mid < 780.0);
        assert_eq!(sampler.sample(Duration::from_millis(300)), 780.0);
        assert_eq!(sampler.sample(Duration::from_secs(5)), 780.0);
    }

    #[test]
    fn test_zero_duration_sampler_is_immediately_done() {
        let sampler = Sampler {
            start: 0.0,
            end: 10.0,
            duration: Duration::ZERO,
            easing: linear,
        };
        assert!(sampler.is_done(Duration::ZERO));
        assert_eq!(sampler.sample(Duration::ZERO), 10.0);
    }

    fn engine(scene: Arc<HeadlessScene>) -> TransitionEngine {
        let registry = ScreenRegistry::resolve(scene.as_ref(), 390.0).unwrap();
        TransitionEngine::new(
            scene,
            registry,
            Duration::from_millis(300),
            Duration::from_millis(16),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_job_rejected_while_active() {
        let scene = Arc::new(HeadlessScene::with_lens_nodes(390.0));
        let mut engine = engine(scene.clone());
        let (tx, mut rx) = tokio::sync::mpsc::channel(4);

        let tx1 = tx.clone();
        let job = engine
            .animate(ScreenId::Opening, ScreenId::Settings, move |job| async move {
                let _ = tx1.send(job.id).await;
            })
            .unwrap();

        let second = engine.animate(ScreenId::Settings, ScreenId::Main, |_| async {});
        assert!(matches!(second, Err(LensError::TransitionBusy)));

        let done = rx.recv().await.unwrap();
        assert_eq!(done, job.id);
        assert!(engine.finish(done));
        assert!(!engine.is_busy());

        // Settings is now centered, the others sit one width away
        assert_eq!(scene.node("settings-screen").unwrap().x, 0.0);
        assert_eq!(scene.node("opening-screen").unwrap().x, -390.0);
        assert_eq!(scene.node("main-screen").unwrap().x, 390.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_ignores_stale_ids() {
        let scene = Arc::new(HeadlessScene::with_lens_nodes(390.0));
        let mut engine = engine(scene);
        let job = engine
            .animate(ScreenId::Opening, ScreenId::Settings, |_| async {})
            .unwrap();
        assert!(!engine.finish(JobId(job.id.0 + 7)));
        assert!(engine.is_busy());
        assert!(engine.finish(job.id));
    }
}
