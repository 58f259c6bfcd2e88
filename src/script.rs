//! The script data model: the sole persisted artifact between the
//! generation and rendering stages.
//!
//! A [`Script`] is an ordered sequence of [`Scene`] records plus aggregate
//! metadata, serialized as pretty JSON (`video_script.json` by default).
//! The JSON field names are part of the interface: a script produced by
//! `pdf2video generate` can be hand-edited and fed back to
//! `pdf2video render`.
//!
//! Invariants enforced by [`Script::validate`]:
//! * scene ids are unique and strictly ascending,
//! * every duration is positive,
//! * `total_duration` equals the sum of scene durations,
//! * `scene_count` equals the number of scenes.

use serde::{Deserialize, Serialize};

/// Pose of the cartoon presenter composited onto every scene.
///
/// Exactly three poses exist; the renderer draws a different arm/mouth
/// arrangement for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarAction {
    /// Waving arm; used by the fixed introduction scene.
    Greeting,
    /// Pointing arm with an open mouth; used by every content scene.
    Explaining,
    /// Arms crossed; used by the fixed conclusion scene.
    Concluding,
}

/// One segment of the output video: its own background image, avatar pose,
/// narration audio, and duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// 1-based position in the video. Unique and strictly ascending.
    pub scene_id: u32,
    /// Display title, drawn in the banner of the background image.
    pub title: String,
    /// Narration text passed to speech synthesis. At most 300 chars.
    pub narration: String,
    /// Nominal duration in seconds; the rendered clip runs for
    /// `max(duration, synthesized audio length)`.
    pub duration: u32,
    /// Free-text description of the intended backdrop, chosen by keyword.
    pub image_prompt: String,
    /// Avatar pose for this scene.
    pub character_action: AvatarAction,
}

/// The ordered collection of scenes plus aggregate metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub title: String,
    /// Sum of all scene durations in seconds.
    pub total_duration: u32,
    pub scene_count: usize,
    pub scenes: Vec<Scene>,
}

impl Script {
    /// Assemble a script from scenes, computing the aggregate fields.
    pub fn from_scenes(title: impl Into<String>, scenes: Vec<Scene>) -> Self {
        let total_duration = scenes.iter().map(|s| s.duration).sum();
        let scene_count = scenes.len();
        Self {
            title: title.into(),
            total_duration,
            scene_count,
            scenes,
        }
    }

    /// Check the structural invariants, returning a human-readable
    /// description of the first violation.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.scene_count != self.scenes.len() {
            return Err(format!(
                "scene_count is {} but the script has {} scenes",
                self.scene_count,
                self.scenes.len()
            ));
        }
        let sum: u32 = self.scenes.iter().map(|s| s.duration).sum();
        if self.total_duration != sum {
            return Err(format!(
                "total_duration is {} but scene durations sum to {}",
                self.total_duration, sum
            ));
        }
        let mut prev_id: Option<u32> = None;
        for scene in &self.scenes {
            if scene.duration == 0 {
                return Err(format!("scene {} has zero duration", scene.scene_id));
            }
            if let Some(prev) = prev_id {
                if scene.scene_id <= prev {
                    return Err(format!(
                        "scene ids must be unique and strictly ascending, got {} after {}",
                        scene.scene_id, prev
                    ));
                }
            }
            prev_id = Some(scene.scene_id);
        }
        Ok(())
    }
}
