//! Fixed prompt templates, one per language-model stage.
//!
//! The templates are the stage contract: everything a later stage knows
//! about an earlier one travels inside these strings, because the gateway
//! keeps no conversation state between calls.

use crate::types::ChartKind;

/// Prompt for the analyze stage. Embeds the raw submission verbatim.
pub fn analysis_prompt(raw_data: &str) -> String {
    format!(
        "Analyze the following data and provide:\n\
         1. Data type (percentages, comparisons, time series, etc.)\n\
         2. Key statistical insights\n\
         3. Suggested visualization type\n\n\
         Data: {raw_data}"
    )
}

/// Prompt for the classify stage. Embeds the analysis context and the closed
/// chart menu; the model is asked to answer with the type alone.
pub fn classify_prompt(context: &str) -> String {
    let menu = ChartKind::ALL
        .iter()
        .map(|kind| format!("- {}", kind.menu_label()))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Based on this data analysis, recommend the best chart type:\n\
         {context}\n\n\
         Possible types:\n\
         {menu}\n\n\
         Respond with ONLY the chart type."
    )
}

/// Prompt for the script stage. Few-shot: two worked examples of turning a
/// data summary into a short list of animation scenes.
pub fn scene_prompt(context: &str) -> String {
    format!(
        "Write a short list of animation scenes for an infographic video.\n\
         Each scene is one plain sentence describing what appears on screen.\n\n\
         Example 1\n\
         Data summary: monthly revenue for one year, steady growth with a spike in November.\n\
         Scenes:\n\
         Scene 1: The title \"Revenue, Jan-Dec\" fades in at the top.\n\
         Scene 2: Axes draw themselves, then a line traces left to right through the twelve points.\n\
         Scene 3: The November point flashes and a callout shows its value.\n\
         Scene 4: The line settles and the yearly total appears below the chart.\n\n\
         Example 2\n\
         Data summary: three spending categories as percentages of a whole.\n\
         Scenes:\n\
         Scene 1: The title \"Where the Money Goes\" fades in.\n\
         Scene 2: A circle grows from the center and splits into three colored slices.\n\
         Scene 3: Each slice's label and percentage slide in next to it.\n\
         Scene 4: The largest slice pulls out slightly and pulses once.\n\n\
         Now write the scenes for this data.\n\
         Data summary: {context}\n\
         Scenes:"
    )
}

/// Prompt for the synthesize stage. Embeds every prior artifact plus the
/// execution constraints: the reply is written to a scene file and run with
/// no human edits, so it must be self-contained and free of the two literal
/// sequences that break downstream processing.
pub fn synthesis_prompt(context: &str, scenes: &str, viz_type: &str) -> String {
    format!(
        "You are a highly experienced animation developer.\n\n\
         Generate complete animation-engine scene code for a {viz_type} visualization \
         with these requirements:\n\
         - Data summary: {context}\n\
         - Follow this scene outline:\n\
         {scenes}\n\
         - Animated, professional look with a clean, modern color palette\n\
         - Smooth transitions, clear labels and a title\n\
         - Include every import statement\n\
         - Reference no external asset files; the code must be self-contained\n\n\
         Avoid using these symbols: $, ```\n\n\
         The code will be executed directly, with no human edits. It must be complete \
         and runnable exactly as you provide it.\n\
         Provide ONLY the scene source code. DO NOT USE A MARKDOWN CODE BLOCK OR ANYTHING ELSE."
    )
}
