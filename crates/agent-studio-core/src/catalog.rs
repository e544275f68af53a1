//! Static table of the tasks a user can pick.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a user-selectable task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskId {
    KeyInsights,
    Swot,
    ContentEnhancer,
    HumanizeText,
    CodeGenerator,
    CodeDebugger,
    DiagramAi,
    ImageAnalysis,
    ImageCreate,
    VideoAnalysis,
    StoryboardCreator,
}

impl TaskId {
    /// Every task, in catalog order.
    pub const ALL: [TaskId; 11] = [
        TaskId::KeyInsights,
        TaskId::Swot,
        TaskId::ContentEnhancer,
        TaskId::HumanizeText,
        TaskId::CodeGenerator,
        TaskId::CodeDebugger,
        TaskId::DiagramAi,
        TaskId::ImageAnalysis,
        TaskId::ImageCreate,
        TaskId::VideoAnalysis,
        TaskId::StoryboardCreator,
    ];

    /// Stable kebab-case slug used on the command line and in logs.
    pub fn slug(&self) -> &'static str {
        match self {
            TaskId::KeyInsights => "key-insights",
            TaskId::Swot => "swot",
            TaskId::ContentEnhancer => "content-enhancer",
            TaskId::HumanizeText => "humanize-text",
            TaskId::CodeGenerator => "code-generator",
            TaskId::CodeDebugger => "code-debugger",
            TaskId::DiagramAi => "diagram-ai",
            TaskId::ImageAnalysis => "image-analysis",
            TaskId::ImageCreate => "image-create",
            TaskId::VideoAnalysis => "video-analysis",
            TaskId::StoryboardCreator => "storyboard-creator",
        }
    }

    /// Catalog entry for this task.
    pub fn task(&self) -> &'static Task {
        // TASKS is declared in the same order as TaskId::ALL.
        &TASKS[*self as usize]
    }

    /// Which result shape this task produces.
    pub fn family(&self) -> TaskFamily {
        match self {
            TaskId::ImageCreate => TaskFamily::ImageCreate,
            TaskId::StoryboardCreator => TaskFamily::Storyboard,
            _ => TaskFamily::Text,
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Returned when a string does not name a catalog task.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task: {0}")]
pub struct UnknownTask(pub String);

impl FromStr for TaskId {
    type Err = UnknownTask;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        TaskId::ALL
            .into_iter()
            .find(|id| id.slug() == wanted)
            .ok_or_else(|| UnknownTask(s.to_string()))
    }
}

/// What kind of input a task accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Image,
    Video,
}

impl InputKind {
    /// True for tasks that take an uploaded file.
    pub fn takes_file(&self) -> bool {
        matches!(self, InputKind::Image | InputKind::Video)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Image => "image",
            InputKind::Video => "video",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result shape family. Each family maps to exactly one
/// `GenerationResult` variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskFamily {
    Text,
    ImageCreate,
    Storyboard,
}

/// Display metadata for one task.
#[derive(Debug, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: &'static str,
    pub description: &'static str,
    /// Icon name for front ends that render one.
    pub icon: &'static str,
    pub placeholder: &'static str,
    pub accepts: InputKind,
}

/// The catalog, in display order.
pub static TASKS: [Task; 11] = [
    Task {
        id: TaskId::KeyInsights,
        title: "Key Insights",
        description: "Extract trends, sentiments, and opportunities from text.",
        icon: "light-bulb",
        placeholder: "Paste customer feedback, market research, or meeting transcripts here to extract key insights...",
        accepts: InputKind::Text,
    },
    Task {
        id: TaskId::Swot,
        title: "SWOT Analysis",
        description: "Generate a SWOT analysis from business descriptions.",
        icon: "bar-chart",
        placeholder: "Provide a description of your business, a competitor analysis, or a project plan to generate a SWOT analysis...",
        accepts: InputKind::Text,
    },
    Task {
        id: TaskId::ContentEnhancer,
        title: "Content Enhancer",
        description: "Improve clarity, tone, and impact of your writing.",
        icon: "sparkles",
        placeholder: "Enter marketing copy, customer service scripts, or any text you want to refine for better communication...",
        accepts: InputKind::Text,
    },
    Task {
        id: TaskId::HumanizeText,
        title: "Humanize Text",
        description: "Rewrite text to sound more natural and empathetic.",
        icon: "humanize",
        placeholder: "Paste your corporate jargon, technical writing, or any text you want to make more human-friendly...",
        accepts: InputKind::Text,
    },
    Task {
        id: TaskId::CodeGenerator,
        title: "Code Generator",
        description: "Create code from a natural language description.",
        icon: "code",
        placeholder: "Describe the function or component you want to build. For example, \"Create a React button component with a loading state\" or \"Write a Python function to sort a list of objects by a specific key\"...",
        accepts: InputKind::Text,
    },
    Task {
        id: TaskId::CodeDebugger,
        title: "Code Debugger",
        description: "Find and fix bugs in your code snippets.",
        icon: "shield-exclamation",
        placeholder: "Paste a code snippet and the error message you are receiving. The AI will analyze it and suggest a fix...",
        accepts: InputKind::Text,
    },
    Task {
        id: TaskId::DiagramAi,
        title: "Diagram AI",
        description: "Generate UML class diagrams from a description.",
        icon: "diagram",
        placeholder: "Describe the classes, attributes, and relationships for your diagram. E.g., 'A Customer has a name and email, and can have many Orders. An Order has an ID and a total amount.'",
        accepts: InputKind::Text,
    },
    Task {
        id: TaskId::ImageAnalysis,
        title: "Image Analysis",
        description: "Describe contents, extract text, or identify objects in an image.",
        icon: "image",
        placeholder: "Optionally provide a prompt to guide the analysis, e.g., \"What brand of car is this?\" or \"Extract all text from this screenshot.\"...",
        accepts: InputKind::Image,
    },
    Task {
        id: TaskId::ImageCreate,
        title: "Image Creator AI",
        description: "Generate a unique image from a text description.",
        icon: "image-create",
        placeholder: "Describe the image you want to create. Be detailed! E.g., \"A photorealistic image of a red panda wearing a tiny chef hat, cooking a miniature pizza\"...",
        accepts: InputKind::Text,
    },
    Task {
        id: TaskId::VideoAnalysis,
        title: "Video Analysis",
        description: "Analyze a single frame from a video to describe its contents.",
        icon: "video",
        placeholder: "Optionally provide a prompt to guide the analysis of a frame from your video...",
        accepts: InputKind::Video,
    },
    Task {
        id: TaskId::StoryboardCreator,
        title: "AI Storyboard Creator",
        description: "Generate a sequence of images from a story prompt.",
        icon: "video-create",
        placeholder: "Describe a short story or scene. The AI will create a sequence of images to visualize it. E.g., \"A robot exploring a mysterious, glowing cave\"...",
        accepts: InputKind::Text,
    },
];
