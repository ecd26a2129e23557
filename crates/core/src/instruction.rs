//! Model-instruction builder.
//!
//! Maps (theme, per-shot prompt, options) to the natural-language
//! instruction sent to the generation backend. This is the entire
//! controllable surface of generation quality: every template leads with
//! facial-identity preservation, then layers in the per-shot prompt and
//! the theme's option text. Pure string assembly: no I/O, no session
//! state beyond the arguments.

use crate::options::{ThemeOptions, LOOKBOOK_STYLE_OTHER};
use crate::prompt::ResolvedPrompt;
use crate::theme::{
    THEME_DECADES, THEME_EIGHTIES_MALL, THEME_FIGURINES, THEME_HAIR_STYLER, THEME_HEADSHOTS,
    THEME_IMPOSSIBLE_SELFIES, THEME_STYLE_LOOKBOOK,
};

/// Hairstyles that describe length only; for these the person's own hair
/// texture is preserved.
const LENGTH_ONLY_STYLES: &[&str] = &["Short", "Medium", "Long"];

/// Build the instruction for one shot.
///
/// `album_style` is the run-wide generated style text; it is only
/// consulted by the theme that shares one style across all shots and is
/// empty for every other run.
pub fn build_instruction(
    theme_key: &str,
    prompt: &ResolvedPrompt,
    options: &ThemeOptions,
    album_style: &str,
) -> String {
    match theme_key {
        THEME_DECADES => format!(
            "The highest priority is to maintain the exact facial features, likeness, \
             perceived gender, framing, and composition of the person in the provided \
             reference photo. Keeping the original photo's composition, change the \
             person's hair, clothing, and accessories, as well as the photo's \
             background, to match the style of the {}. Do not alter the person's core \
             facial structure.",
            prompt.id
        ),
        THEME_IMPOSSIBLE_SELFIES => format!(
            "The highest priority is to maintain the exact facial features, likeness, \
             and perceived gender of the person in the provided reference photo. \
             Keeping the original photo's composition as much as possible, place the \
             person into the following scene, changing their clothing, hair, and the \
             background to match: {}. Do not alter the person's core facial structure.",
            prompt.text
        ),
        THEME_HAIR_STYLER => hair_styler_instruction(prompt, options),
        THEME_HEADSHOTS => {
            let pose = if options.headshot_pose == "Forward" {
                "facing forward towards the camera"
            } else {
                "posed at a slight angle to the camera"
            };
            format!(
                "The highest priority is to maintain the exact facial features, \
                 likeness, and perceived gender of the person in the provided \
                 reference photo. Transform the image into a professional headshot. \
                 The person should be {pose} with a \"{}\" expression. They should be \
                 {}. Please maintain the original hairstyle from the photo. The \
                 background should be a clean, neutral, out-of-focus studio \
                 background (like light gray, beige, or white). Do not alter the \
                 person's core facial structure. The final image should be a \
                 well-lit, high-quality professional portrait.",
                options.headshot_expression, prompt.text
            )
        }
        THEME_EIGHTIES_MALL => format!(
            "The highest priority is to maintain the exact facial features, likeness, \
             and perceived gender of the person in the provided reference photo. \
             Transform the image into a photo from a single 1980s mall photoshoot. \
             The overall style for the entire photoshoot is: \"{album_style}\". For \
             this specific photo, the person should be in {}. The person's hair and \
             clothing should be 80s style and be consistent across all photos in this \
             set. The background and lighting must also match the overall style for \
             every photo.",
            prompt.text
        ),
        THEME_STYLE_LOOKBOOK => {
            let style = if options.lookbook_style == LOOKBOOK_STYLE_OTHER {
                options.custom_lookbook_style.as_str()
            } else {
                options.lookbook_style.as_str()
            };
            format!(
                "The highest priority is to maintain the exact facial features, \
                 likeness, and perceived gender of the person in the provided \
                 reference photo. Transform the image into a high-fashion lookbook \
                 photo. The overall fashion style for the entire lookbook is \
                 \"{style}\". For this specific photo, create a unique, stylish \
                 outfit that fits the overall style, and place the person in {} in a \
                 suitable, fashionable setting. The person's hair and makeup should \
                 also complement the style. Each photo in the lookbook should feature \
                 a different outfit. Do not alter the person's core facial structure.",
                prompt.text
            )
        }
        THEME_FIGURINES => format!(
            "The highest priority is to maintain the exact facial features and \
             likeness of the person in the provided reference photo. Transform the \
             person into a miniature figurine based on the following description, \
             placing it in a realistic environment: {}. The final image should look \
             like a real photograph of a physical object. Do not alter the person's \
             core facial structure.",
            prompt.text
        ),
        // Unknown theme: generic fallback on the raw prompt text only.
        _ => format!(
            "Create an image based on the reference photo and this prompt: {}",
            prompt.text
        ),
    }
}

fn hair_styler_instruction(prompt: &ResolvedPrompt, options: &ThemeOptions) -> String {
    let mut instruction = format!(
        "The highest priority is to maintain the exact facial features, likeness, and \
         perceived gender of the person in the provided reference photo. Keeping the \
         original photo's composition, style the person's hair to be a perfect \
         example of {}. If the person's hair already has this style, enhance and \
         perfect it. Do not alter the person's core facial structure, clothing, or \
         the background.",
        prompt.text
    );

    if LENGTH_ONLY_STYLES.contains(&prompt.id.as_str()) {
        instruction.push_str(
            " Maintain the person's original hair texture (e.g., straight, wavy, curly).",
        );
    }

    match options.hair_colors.as_slice() {
        [] => {}
        [color] => {
            instruction.push_str(&format!(" The hair color should be {color}."));
        }
        [first, second, ..] => {
            instruction.push_str(&format!(
                " The hair should be a mix of two colors: {first} and {second}."
            ));
        }
    }

    instruction
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
