pub mod art;
pub mod story;
pub mod view;

use crate::{
    error::{DoodleError, Result},
    gemini::DoodleClient,
    models::{GenerationRequest, RenderedArtwork, UploadedImage, WorkflowMode},
    session::Session,
};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub use art::{art_prompt, ART_IDLE_LABEL};
pub use story::{story_prompt, STORY_IDLE_LABEL};
pub use view::WorkflowView;

pub const RESOLVING_LABEL: &str = "🔍 Searching for the best AI model...";

/// Idle -> AwaitingModel -> AwaitingGeneration -> [AwaitingSecondaryAsset] -> Done.
/// Any failure goes back to Idle once the alert is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    AwaitingModel,
    AwaitingGeneration,
    AwaitingSecondaryAsset,
    Done,
}

/// What the user typed: the key and the free-text plot or action, both trimmed.
#[derive(Debug, Clone, Default)]
pub struct WorkflowInput {
    api_key: String,
    plot: String,
}

impl WorkflowInput {
    pub fn new(api_key: impl Into<String>, plot: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into().trim().to_string(),
            plot: plot.into().trim().to_string(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn plot(&self) -> &str {
        &self.plot
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Story(String),
    Art(RenderedArtwork),
}

/// Holds the view busy for its lifetime; on drop the trigger is re-enabled,
/// its label restored and the loading indicator hidden.
pub struct BusyGuard<'a, V: WorkflowView + ?Sized> {
    view: &'a mut V,
    idle_label: &'static str,
}

impl<'a, V: WorkflowView + ?Sized> BusyGuard<'a, V> {
    pub fn new(view: &'a mut V, idle_label: &'static str) -> Self {
        view.set_busy(true);
        view.hide_result();
        Self { view, idle_label }
    }
}

impl<V: WorkflowView + ?Sized> Deref for BusyGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.view
    }
}

impl<V: WorkflowView + ?Sized> DerefMut for BusyGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.view
    }
}

impl<V: WorkflowView + ?Sized> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_busy(false);
        self.view.set_trigger_label(self.idle_label);
    }
}

/// Both generation workflows over one client.
#[derive(Clone)]
pub struct Workflow {
    client: DoodleClient,
    output_dir: PathBuf,
}

impl Workflow {
    pub fn new(client: DoodleClient, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
        }
    }

    pub fn client(&self) -> &DoodleClient {
        &self.client
    }

    pub async fn run<V: WorkflowView + ?Sized>(
        &self,
        mode: WorkflowMode,
        session: &mut Session,
        input: &WorkflowInput,
        view: &mut V,
    ) -> Result<WorkflowOutcome> {
        match mode {
            WorkflowMode::Story => self
                .run_story(session, input, view)
                .await
                .map(WorkflowOutcome::Story),
            WorkflowMode::Art => self
                .run_art(session, input, view)
                .await
                .map(WorkflowOutcome::Art),
        }
    }

    pub async fn run_story<V: WorkflowView + ?Sized>(
        &self,
        session: &Session,
        input: &WorkflowInput,
        view: &mut V,
    ) -> Result<String> {
        let run_id = Uuid::new_v4();
        let image = check_preconditions(session, input, view)?;
        log::info!("[run:{}] Story workflow started", run_id);

        let mut view = BusyGuard::new(view, STORY_IDLE_LABEL);
        let result = self.story_steps(image, input, &mut *view).await;
        settle(&mut *view, result, run_id)
    }

    /// Render artwork and record it in the session as the image on show.
    pub async fn run_art<V: WorkflowView + ?Sized>(
        &self,
        session: &mut Session,
        input: &WorkflowInput,
        view: &mut V,
    ) -> Result<RenderedArtwork> {
        let run_id = Uuid::new_v4();
        let image = check_preconditions(session, input, view)?;
        log::info!("[run:{}] Art workflow started", run_id);

        let artwork = {
            let mut view = BusyGuard::new(view, ART_IDLE_LABEL);
            let result = self.art_steps(image, input, &mut *view).await;
            settle(&mut *view, result, run_id)?
        };
        session.set_artwork(artwork.clone());
        Ok(artwork)
    }

    /// Save the artwork currently shown in the session.
    pub async fn download_image(&self, session: &Session) -> Result<PathBuf> {
        self.download_image_to(session, &self.output_dir).await
    }

    pub async fn download_image_to(&self, session: &Session, dir: &Path) -> Result<PathBuf> {
        let artwork = session.artwork().ok_or(DoodleError::NoArtwork)?;
        self.client.image().download(&artwork.url, dir).await
    }

    async fn resolve_model<V: WorkflowView + ?Sized>(&self, api_key: &str, view: &mut V) -> String {
        view.set_state(WorkflowState::AwaitingModel);
        view.set_trigger_label(RESOLVING_LABEL);
        let model = self.client.resolver().resolve(api_key).await;
        view.set_trigger_label(&format!("✨ Casting magic with {}...", model));
        model
    }

    async fn story_steps<V: WorkflowView + ?Sized>(
        &self,
        image: &UploadedImage,
        input: &WorkflowInput,
        view: &mut V,
    ) -> Result<String> {
        let model = self.resolve_model(&input.api_key, view).await;

        view.set_state(WorkflowState::AwaitingGeneration);
        let request = GenerationRequest {
            instruction_text: story_prompt(&input.plot),
            image: image.clone(),
        };
        let story = self
            .client
            .text()
            .generate(&input.api_key, &model, &request)
            .await?;

        view.show_story(&story);
        Ok(story)
    }

    async fn art_steps<V: WorkflowView + ?Sized>(
        &self,
        image: &UploadedImage,
        input: &WorkflowInput,
        view: &mut V,
    ) -> Result<RenderedArtwork> {
        let model = self.resolve_model(&input.api_key, view).await;

        view.set_state(WorkflowState::AwaitingGeneration);
        let request = GenerationRequest {
            instruction_text: art_prompt(&input.plot),
            image: image.clone(),
        };
        let prompt = self
            .client
            .text()
            .generate(&input.api_key, &model, &request)
            .await?
            .trim()
            .to_string();
        if prompt.is_empty() {
            return Err(DoodleError::EmptyGenerationResult);
        }
        log::info!("Image prompt: {}", prompt);
        view.show_image_prompt(&prompt);

        view.set_state(WorkflowState::AwaitingSecondaryAsset);
        let artwork = self.client.image().artwork_for(&prompt);
        log::debug!("Rendering seed {} at {}", artwork.seed, artwork.url);
        let bytes = self.client.image().preload(&artwork).await?;

        view.show_artwork(&artwork, &bytes);
        Ok(artwork)
    }
}

fn check_preconditions<'s, V: WorkflowView + ?Sized>(
    session: &'s Session,
    input: &WorkflowInput,
    view: &mut V,
) -> Result<&'s UploadedImage> {
    let checked = if input.api_key().is_empty() {
        Err(DoodleError::MissingCredential)
    } else {
        session.image().ok_or(DoodleError::MissingInput)
    };
    if let Err(e) = &checked {
        log::warn!("Workflow blocked: {}", e);
        view.alert(&e.to_string());
    }
    checked
}

fn settle<T, V: WorkflowView + ?Sized>(view: &mut V, result: Result<T>, run_id: Uuid) -> Result<T> {
    match &result {
        Ok(_) => {
            log::info!("[run:{}] Workflow finished", run_id);
            view.set_state(WorkflowState::Done);
        }
        Err(e) => {
            log::error!("[run:{}] Workflow failed: {}", run_id, e);
            view.alert(&format!("Something went wrong: {}", e));
            view.set_state(WorkflowState::Idle);
        }
    }
    result
}
