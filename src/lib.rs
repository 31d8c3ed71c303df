//! Doodle-to-story and doodle-to-art workflows over Gemini and Pollinations.
//!
//! ```no_run
//! use doodlegen::{Config, DoodleClient, Session, Workflow, WorkflowInput, WorkflowMode};
//! # async fn demo(view: &mut impl doodlegen::WorkflowView) -> doodlegen::Result<()> {
//! let config = Config::from_env();
//! let workflow = Workflow::new(DoodleClient::new(&config)?, config.output_dir.clone());
//!
//! let mut session = Session::new();
//! session.set_image_from_path("cat.png").await?;
//! let input = WorkflowInput::new("my-api-key", "the cat goes to the moon");
//! workflow.run(WorkflowMode::Story, &mut session, &input, view).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod session;
pub mod transport;
pub mod workflow;

pub use config::{Config, GeminiConfig, PollinationsConfig};
pub use error::{DoodleError, Result};
pub use gemini::{DoodleClient, ImageClient, ModelResolver, TextClient};
pub use models::{
    GenerationRequest, ModelPolicy, ModelPreference, RenderedArtwork, UploadedImage, WorkflowMode,
};
pub use session::Session;
pub use workflow::{Workflow, WorkflowInput, WorkflowOutcome, WorkflowState, WorkflowView};
