pub const STORY_IDLE_LABEL: &str = "✨ Cast the magic: write a story";
pub const FREE_PLOT: &str = "anything you like";

/// Picture-book author instructions around the user's plot.
pub fn story_prompt(plot: &str) -> String {
    let plot = plot.trim();
    let plot = if plot.is_empty() { FREE_PLOT } else { plot };
    format!(
        "You are a children's picture-book author. Look at this doodle.\n\
         1. Identify the main character and its features.\n\
         2. Work in this plot: \"{}\".\n\
         3. Write a warm fairy tale of about 300 words.\n\
         4. Format the story in Markdown.",
        plot
    )
}
