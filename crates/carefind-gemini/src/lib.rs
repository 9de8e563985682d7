//! Minimal client for the Gemini `generateContent` REST endpoint.
//!
//! Covers the two shapes carefind needs: a text prompt with the Google Maps
//! grounding tool, and an inline image with a declared JSON response schema.

pub mod client;
pub mod error;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GroundingChunk, GroundingMetadata, InlineData, LatLng, MapsReference, Part, RetrievalConfig,
    ReviewSnippet, Tool, ToolConfig, WebReference,
};
