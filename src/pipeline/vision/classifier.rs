use std::sync::Arc;

use image::ImageFormat;
use serde_json::{Map, Value};

use super::heuristic::{average_rgb, classify_by_color};
use super::VisionError;
use crate::models::{
    clamp_confidence, AnalysisSource, MaterialAnalysis, MaterialCategory, RecyclabilityStatus,
};
use crate::pipeline::llm::{coerce_string_list, parse_json_object, LlmError, VisionModel};

const VISION_PROMPT: &str = "\
Analyze this waste image. Return JSON only:
{
    \"material_type\": \"string\",
    \"confidence_score\": integer 0-100,
    \"hazardous_indicators\": [\"list of strings\"],
    \"recyclability_status\": \"Recyclable|Non-recyclable|Hazardous\",
    \"description\": \"Technical description\",
    \"material_category\": \"Plastic|Glass|Metal|Paper|Electronic|Chemical|Mixed\",
    \"sustainability_nudge\": \"Impact statement\"
}";

const DEFAULT_MIME: &str = "image/jpeg";

/// Image bytes → `MaterialAnalysis`.
///
/// Tries the vision model when one is configured. Any model failure
/// (transport, quota, malformed output) falls through to the colour
/// heuristic unless `strict` is set, in which case it is returned.
pub struct VisionClassifier {
    model: Option<Arc<dyn VisionModel>>,
    strict: bool,
}

impl VisionClassifier {
    pub fn new(model: Option<Arc<dyn VisionModel>>, strict: bool) -> Self {
        Self { model, strict }
    }

    /// Heuristic-only classifier.
    pub fn offline() -> Self {
        Self::new(None, false)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn analyze(
        &self,
        image_bytes: &[u8],
        filename: Option<&str>,
    ) -> Result<MaterialAnalysis, VisionError> {
        let _span = tracing::info_span!(
            "vision_analyze",
            image_size = image_bytes.len(),
            strict = self.strict,
        )
        .entered();
        let start = std::time::Instant::now();

        let decoded = image::load_from_memory(image_bytes)
            .map_err(|e| VisionError::UndecodableImage(e.to_string()))?;

        if let Some(model) = &self.model {
            let mime = sniff_mime(image_bytes, filename);
            match primary_analysis(model.as_ref(), image_bytes, &mime) {
                Ok(analysis) => {
                    tracing::info!(
                        material = %analysis.material_type,
                        confidence = analysis.confidence_score,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Vision model classified image"
                    );
                    return Ok(analysis);
                }
                Err(e) if self.strict => {
                    tracing::error!(error = %e, "Vision model failed in strict mode");
                    return Err(VisionError::PrimaryFailed(e));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Vision model failed, using colour heuristic");
                }
            }
        }

        let avg = average_rgb(&decoded);
        let analysis = classify_by_color(avg, filename);
        tracing::info!(
            r = avg[0],
            g = avg[1],
            b = avg[2],
            material = %analysis.material_type,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Colour heuristic classified image"
        );
        Ok(analysis)
    }
}

fn primary_analysis(
    model: &dyn VisionModel,
    image_bytes: &[u8],
    mime: &str,
) -> Result<MaterialAnalysis, LlmError> {
    let raw = model.describe_image(VISION_PROMPT, image_bytes, mime)?;
    parse_analysis(&raw)
}

/// Parse the model's JSON answer. Missing required keys count as a
/// malformed response.
pub fn parse_analysis(raw: &str) -> Result<MaterialAnalysis, LlmError> {
    let map = parse_json_object(raw)?;

    let material_type = required_str(&map, "material_type")?;
    let confidence = map
        .get("confidence_score")
        .and_then(confidence_value)
        .ok_or_else(|| missing("confidence_score"))?;
    let recyclability = required_str(&map, "recyclability_status")?;
    let category = required_str(&map, "material_category")?;

    Ok(MaterialAnalysis {
        material_type,
        material_category: MaterialCategory::from_label(&category),
        confidence_score: clamp_confidence(confidence),
        hazardous_indicators: coerce_string_list(map.get("hazardous_indicators")),
        description: optional_str(&map, "description"),
        recyclability_status: RecyclabilityStatus::from_label(&recyclability),
        sustainability_nudge: optional_str(&map, "sustainability_nudge"),
        analysis_source: AnalysisSource::PrimaryModel,
    })
}

fn required_str(map: &Map<String, Value>, key: &str) -> Result<String, LlmError> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| missing(key))
}

fn optional_str(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Accepts integers, floats (rounded) and numeric strings.
fn confidence_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s
            .trim()
            .trim_end_matches('%')
            .parse::<f64>()
            .ok()
            .map(|f| f.round() as i64),
        _ => None,
    }
}

fn missing(key: &str) -> LlmError {
    LlmError::MalformedResponse(format!("missing required key '{key}'"))
}

/// Mime type from the image magic bytes, else the filename extension.
pub fn sniff_mime(image_bytes: &[u8], filename: Option<&str>) -> String {
    let sniffed = match image::guess_format(image_bytes) {
        Ok(ImageFormat::Png) => Some("image/png"),
        Ok(ImageFormat::Jpeg) => Some("image/jpeg"),
        Ok(ImageFormat::Tiff) => Some("image/tiff"),
        _ => None,
    };
    if let Some(mime) = sniffed {
        return mime.to_string();
    }
    filename
        .and_then(|f| mime_guess::from_path(f).first())
        .filter(|m| m.type_() == mime_guess::mime::IMAGE)
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| DEFAULT_MIME.to_string())
}
