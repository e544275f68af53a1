/// Google Generative Language API (Gemini text models, Imagen image models).
pub mod gemini;
