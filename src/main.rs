use doodlegen::{
    logger::{self, LogLevel, LoggerConfig},
    Config, DoodleClient, RenderedArtwork, Session, Workflow, WorkflowInput, WorkflowMode,
    WorkflowOutcome, WorkflowState, WorkflowView,
};
use std::env;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal stand-in for the page: labels, spinner line, markdown result.
struct ConsoleView {
    skin: MadSkin,
}

impl ConsoleView {
    fn new() -> Self {
        let mut skin = MadSkin::default();
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Blue);
        skin.bold.set_fg(Color::White);
        skin.italic.set_fg(Color::Magenta);
        Self { skin }
    }
}

impl WorkflowView for ConsoleView {
    fn set_busy(&mut self, busy: bool) {
        if busy {
            println!("⏳ Working...");
        }
    }

    fn set_trigger_label(&mut self, label: &str) {
        println!("[ {} ]", label);
    }

    fn set_state(&mut self, state: WorkflowState) {
        log::debug!("State: {:?}", state);
    }

    fn hide_result(&mut self) {}

    fn show_story(&mut self, markdown: &str) {
        println!();
        self.skin.print_text(markdown);
    }

    fn show_image_prompt(&mut self, prompt: &str) {
        println!("🖌️  Prompt: {}", prompt);
    }

    fn show_artwork(&mut self, artwork: &RenderedArtwork, image: &[u8]) {
        println!("🖼️  {} (seed {}, {} bytes)", artwork.url, artwork.seed, image.len());
    }

    fn alert(&mut self, message: &str) {
        eprintln!("🚨 {}", message);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_loaded = dotenv::dotenv().is_ok();

    let level = if env::var("DOODLE_DEBUG").is_ok() {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    logger::init_with_config(LoggerConfig::new().with_level(level))?;

    if env_loaded {
        log::info!("✅ .env file loaded");
    } else {
        log::warn!("No .env file found, using system environment variables");
    }

    let config = Config::from_env();
    logger::log_config_info(&config);

    let mode: WorkflowMode = env::var("DOODLE_MODE")
        .unwrap_or_else(|_| "story".to_string())
        .parse()?;
    let input = WorkflowInput::new(
        config.gemini.api_key.clone().unwrap_or_default(),
        env::var("DOODLE_PLOT").unwrap_or_default(),
    );

    let mut session = Session::new();
    match env::var("DOODLE_IMAGE") {
        Ok(path) => {
            let image = session.set_image_from_path(&path).await?;
            println!("🖼️  Preview: {} ({})", path, image.media_type);
        }
        Err(_) => log::warn!("DOODLE_IMAGE is not set"),
    }

    let workflow = Workflow::new(DoodleClient::new(&config)?, config.output_dir.clone());
    let mut view = ConsoleView::new();

    // Alerts already went to the view; the exit code still reflects the outcome.
    let outcome = workflow.run(mode, &mut session, &input, &mut view).await?;

    if let WorkflowOutcome::Art(_) = outcome {
        let path = workflow.download_image(&session).await?;
        println!("💾 Saved to {}", path.display());
    }

    Ok(())
}
