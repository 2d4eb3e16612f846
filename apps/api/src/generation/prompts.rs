// Prompt constants for the bullet-generation endpoint.

/// System prompt for the work-log → bullet-point completion call.
pub const BULLET_SYSTEM: &str = "You are a professional resume writing assistant. \
    Convert user work logs into concise, impactful resume bullet points.";
