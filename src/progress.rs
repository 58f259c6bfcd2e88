//! Progress-callback trait for per-scene rendering events.
//!
//! Inject an [`Arc<dyn RenderProgress>`] via
//! [`crate::config::PipelineConfigBuilder::progress`] to receive events as
//! the renderer works through the scene list. The CLI forwards them to an
//! indicatif progress bar; library callers can forward them anywhere.
//!
//! Scenes are rendered strictly one at a time, so callbacks arrive in
//! scene order from a single task. The trait is still `Send + Sync` so a
//! hook can be shared with whatever thread observes it.

use std::sync::Arc;

/// Called by the renderer as it processes each scene.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait RenderProgress: Send + Sync {
    /// Called once before any scene is rendered.
    fn on_render_start(&self, total_scenes: usize) {
        let _ = total_scenes;
    }

    /// Called before a scene's assets are generated.
    fn on_scene_start(&self, scene_id: u32, title: &str, total_scenes: usize) {
        let _ = (scene_id, title, total_scenes);
    }

    /// Called when a scene clip has been encoded.
    ///
    /// `clip_secs` is the actual clip length, which may exceed the scene's
    /// nominal duration when the synthesized audio runs longer.
    fn on_scene_complete(&self, scene_id: u32, total_scenes: usize, clip_secs: f64) {
        let _ = (scene_id, total_scenes, clip_secs);
    }

    /// Called once after the final video has been concatenated.
    fn on_render_complete(&self, total_scenes: usize) {
        let _ = total_scenes;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgress;

impl RenderProgress for NoopProgress {}

/// Convenience alias matching the type stored in [`crate::config::PipelineConfig`].
pub type ProgressHook = Arc<dyn RenderProgress>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        scenes: AtomicUsize,
        done: AtomicUsize,
    }

    impl RenderProgress for Counting {
        fn on_scene_complete(&self, _scene_id: u32, _total: usize, _clip_secs: f64) {
            self.scenes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_render_complete(&self, total: usize) {
            self.done.store(total, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_hook_does_not_panic() {
        let hook = NoopProgress;
        hook.on_render_start(2);
        hook.on_scene_start(1, "Introduction", 2);
        hook.on_scene_complete(1, 2, 8.0);
        hook.on_render_complete(2);
    }

    #[test]
    fn counting_hook_receives_events() {
        let hook = Counting {
            scenes: AtomicUsize::new(0),
            done: AtomicUsize::new(0),
        };
        hook.on_scene_complete(1, 2, 8.0);
        hook.on_scene_complete(2, 2, 9.5);
        hook.on_render_complete(2);
        assert_eq!(hook.scenes.load(Ordering::SeqCst), 2);
        assert_eq!(hook.done.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn arc_dyn_hook_works() {
        let hook: ProgressHook = Arc::new(NoopProgress);
        hook.on_render_start(5);
    }
}
