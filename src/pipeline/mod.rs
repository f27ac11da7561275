pub mod llm; // Remote model clients (Gemini, OpenRouter) + mocks
pub mod vision; // Image → MaterialAnalysis, colour heuristic fallback
pub mod safety; // Hazard classifier
pub mod rag; // CPCB regulatory lookup
pub mod instructions; // Disposal steps, hazard contract
pub mod facilities; // Recycler catalog + ranking
pub mod processor; // Pipeline orchestrator

pub use processor::*;
