//! Instruction prompt sent to the generative service.

/// Calibration sample showing the expected markup: one inline background
/// color per rhyme group, `<br>` at line ends.
pub const WORKED_EXAMPLE: &str = concat!(
  r#"Like <span style="background-color:#E06666">Red</span> <span style="background-color:#6AA84F">Rover</span>, so you <span style="background-color:#99CCEE">know</span> what I <span style="background-color:#D39A3D">meant</span><br>"#,
  "\n",
  r#"But I <span style="background-color:#99CCEE">roll</span> <span style="background-color:#6AA84F">over</span> my <span style="background-color:#D39A3D">opponents</span> instead<br>"#,
  "\n",
  r#"<span style="background-color:#FFD700">Makin’</span> <span style="background-color:#C27BA0">dog</span> <span style="background-color:#99CCEE">sounds</span> ’cause I gotta keep<br>"#,
  "\n",
  r#"<span style="background-color:#FFD700">breakin’</span> these <span style="background-color:#D39A3D">bars</span> <span style="background-color:#E06666">down</span><br>"#,
  "\n",
  r#"I’ll <span style="background-color:#99CCEE">go</span> <span style="background-color:#99CCEE">slow</span> for the <span style="background-color:#D39A3D">speds</span>"#,
);

const INSTRUCTIONS: &str = r#"You are a rhyme analysis assistant. Read the lyrics below and return them as HTML with every rhyme highlighted.

Rules:

1. Rhyme groups
   - Put words and sounds that rhyme in the same group: perfect rhymes, slant rhymes, assonance and consonance.
   - Every member of a group shares one background color; different groups use different colors.

2. Markup
   - Wrap each rhyming word or phrase in a span with an inline background color, for example:
     <span style="background-color:#FF9999">red</span>
   - Keep colors consistent across the whole text.

3. Accuracy
   - Judge rhymes by sound (phonemes), not only spelling.
   - Include multi-syllable, internal and near rhymes.

4. Formatting
   - Keep the original line breaks, punctuation and spacing.
   - The only change to the text is the added color spans.

5. Output only valid HTML. No explanations, markdown fences or commentary.

Here is how a rap verse should be highlighted:
"#;

/// Builds the complete prompt for `lyrics`.
///
/// The lyrics are embedded verbatim.
#[must_use]
pub fn build_rhyme_prompt(lyrics: &str) -> String {
  format!(
    "{INSTRUCTIONS}\n{WORKED_EXAMPLE}\n\nLyrics to analyze:\n{lyrics}\n\nReturn only the HTML with the spans, no explanations."
  )
}
