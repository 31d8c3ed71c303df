pub const ART_IDLE_LABEL: &str = "🎨 Cast the magic: paint it";
pub const ART_STYLE: &str =
    "3D Pixar-style animation render, soft cinematic lighting, vibrant colors, highly detailed";
pub const FREE_SCENE: &str = "standing happily in a colorful magical garden";

/// Asks the vision model for a single English text-to-image prompt.
pub fn art_prompt(action: &str) -> String {
    let action = action.trim();
    let action = if action.is_empty() { FREE_SCENE } else { action };
    format!(
        "Look at this child's doodle and write ONE English prompt for an image generator.\n\
         - Describe the character's visual features precisely: colors, species or character type, body shape.\n\
         - Render it in this style: {}.\n\
         - The character is doing this, in this setting: \"{}\".\n\
         Output only the prompt text, with no preamble, quotes or explanation.",
        ART_STYLE, action
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_and_style_embedded() {
        let prompt = art_prompt("flying over the moon");
        assert!(prompt.contains("\"flying over the moon\""));
        assert!(prompt.contains(ART_STYLE));
        assert!(prompt.contains("Output only the prompt text"));
    }

    #[test]
    fn test_blank_action_falls_back() {
        assert!(art_prompt("").contains(FREE_SCENE));
    }
}
