//! System instructions that condition the model for each task.

use crate::catalog::TaskId;

/// Instruction used for identifiers without a dedicated one.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// Instruction for the first storyboard step. The scene count is part of the
/// wording, so it is formatted by `storyboard_director_instruction`.
const STORYBOARD_DIRECTOR_TEMPLATE: &str = "You are a film director. Based on the user's prompt, create a sequence of exactly {count} distinct, detailed visual scenes that tell a short story. Each scene description should be a vivid prompt for an AI image generator. Return the result as a JSON object with a single key 'scenes' which is an array of strings.";

/// Scene count the director instruction asks for by default.
pub const DEFAULT_STORYBOARD_SCENES: usize = 3;

const KEY_INSIGHTS: &str = "You are an expert business analyst. Analyze the following text and extract the most important trends, sentiments, pain points, or opportunities. Present the output in a clear, structured format using markdown with headings for each key area.";

const SWOT: &str = "You are an expert business strategist. Analyze the following business information and generate a detailed SWOT analysis (Strengths, Weaknesses, Opportunities, Threats). Use markdown headings for each section (e.g., '## Strengths'). Under each heading, provide a bulleted list of points.";

const CONTENT_ENHANCER: &str = "You are an expert copywriter and editor. Analyze the following text for clarity, tone, and impact. Provide a section with '### Suggestions' for improvement, followed by a '### Rewritten Version' of the text with the suggested improvements applied. Use markdown for formatting.";

const HUMANIZE_TEXT: &str = "You are an expert in communication with a high degree of emotional intelligence. Rewrite the user's text to sound more natural, empathetic, and human. Focus on clarity, warmth, and connection. Provide a '### Rewritten Version' with the improvements. Use markdown for formatting.";

const CODE_GENERATOR: &str = "You are an expert programmer and senior software engineer. Generate clean, efficient, and well-documented code based on the user's request. Explain the code and provide usage examples. Format the code blocks using markdown's triple backticks.";

const CODE_DEBUGGER: &str = "You are an expert software developer specializing in debugging. Analyze the provided code snippet and error message. Identify the bug, explain the cause, and provide a corrected version of the code. Format your response clearly with headings for '### Analysis', '### The Bug', and '### Corrected Code'. Use markdown for code blocks.";

const DIAGRAM_AI: &str = "You are an expert in software architecture and UML design. Based on the user's description, generate a UML Class Diagram using Mermaid.js syntax. CRITICAL: Your entire response must ONLY be the Mermaid syntax inside a ```mermaid code block. Do not include any other text, explanations, or formatting outside of the code block.";

const IMAGE_ANALYSIS: &str = "You are an expert image analyst. Based on the user's prompt and the provided image, give a detailed analysis. If no prompt is given, provide a general description of the image. Identify objects, people, settings, and any visible text. Format your response using markdown.";

const VIDEO_ANALYSIS: &str = "You are an expert media analyst. The user has provided a video file and an optional prompt. You will be given a single frame from the middle of the video. Analyze this frame based on the user's prompt. If no prompt is given, provide a general description of what is happening in the frame. Identify objects, people, and the setting. Format your response using markdown.";

/// System instruction for a catalog task.
///
/// The two image-producing tasks have no dedicated instruction and resolve
/// to `DEFAULT_SYSTEM_INSTRUCTION`.
pub fn system_instruction(task: TaskId) -> &'static str {
    match task {
        TaskId::KeyInsights => KEY_INSIGHTS,
        TaskId::Swot => SWOT,
        TaskId::ContentEnhancer => CONTENT_ENHANCER,
        TaskId::HumanizeText => HUMANIZE_TEXT,
        TaskId::CodeGenerator => CODE_GENERATOR,
        TaskId::CodeDebugger => CODE_DEBUGGER,
        TaskId::DiagramAi => DIAGRAM_AI,
        TaskId::ImageAnalysis => IMAGE_ANALYSIS,
        TaskId::VideoAnalysis => VIDEO_ANALYSIS,
        TaskId::ImageCreate | TaskId::StoryboardCreator => DEFAULT_SYSTEM_INSTRUCTION,
    }
}

/// System instruction for a raw identifier; unknown identifiers get
/// `DEFAULT_SYSTEM_INSTRUCTION`.
pub fn system_instruction_for(identifier: &str) -> &'static str {
    identifier
        .parse::<TaskId>()
        .map(system_instruction)
        .unwrap_or(DEFAULT_SYSTEM_INSTRUCTION)
}

/// "Film director" instruction asking for exactly `scene_count` scenes.
pub fn storyboard_director_instruction(scene_count: usize) -> String {
    STORYBOARD_DIRECTOR_TEMPLATE.replace("{count}", &scene_count.to_string())
}

/// Response schema for the storyboard scene list: `{ scenes: string[] }`.
pub fn storyboard_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "scenes": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        }
    })
}
