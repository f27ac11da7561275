//! Deterministic colour-histogram classifier used whenever the vision
//! model is unavailable. Pure arithmetic over decoded pixels: the same
//! image always yields the same record.

use image::imageops::FilterType;
use image::DynamicImage;

use super::templates::{
    MaterialTemplate, CARDBOARD, ELECTRONICS, GLASS_BOTTLE, METAL_CAN, PLASTIC_BOTTLE, WHITE_PAPER,
};
use crate::models::{AnalysisSource, MaterialAnalysis};

/// Side of the square thumbnail the mean colour is computed over.
pub const SAMPLE_SIZE: u32 = 50;

const GREY_TOLERANCE: i32 = 20;
const BRIGHT_LEVEL: i32 = 200;
const MID_LEVEL: i32 = 100;

/// Integer mean of each RGB channel over a `SAMPLE_SIZE` thumbnail.
pub fn average_rgb(image: &DynamicImage) -> [u8; 3] {
    let rgb = image.to_rgb8();
    let thumb = image::imageops::resize(&rgb, SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Triangle);

    let mut totals = [0u64; 3];
    for pixel in thumb.pixels() {
        for (total, channel) in totals.iter_mut().zip(pixel.0.iter()) {
            *total += u64::from(*channel);
        }
    }
    let count = u64::from(thumb.width()) * u64::from(thumb.height());
    if count == 0 {
        return [0, 0, 0];
    }
    totals.map(|t| (t / count) as u8)
}

/// Classify by mean colour. `filename` only disambiguates bright white
/// items (paper vs. HDPE plastic).
pub fn classify_by_color(avg: [u8; 3], filename: Option<&str>) -> MaterialAnalysis {
    let [r, g, b] = avg.map(i32::from);

    let (template, material_type, description): (MaterialTemplate, &str, String) =
        if (r - g).abs() < GREY_TOLERANCE && (g - b).abs() < GREY_TOLERANCE {
            if r > BRIGHT_LEVEL {
                let is_paper = filename.is_some_and(|f| f.to_lowercase().contains("paper"));
                (
                    if is_paper { WHITE_PAPER } else { PLASTIC_BOTTLE },
                    "HDPE Plastic / White Paper",
                    "High-reflectivity material detected. Likely HDPE plastic container or bleached paper product.".into(),
                )
            } else if r > MID_LEVEL {
                (
                    METAL_CAN,
                    "Aluminum / Steel",
                    "Metallic surface detected via color histogram. Likely aluminum can or steel enclosure.".into(),
                )
            } else {
                (
                    ELECTRONICS,
                    "E-Waste / ABS Plastic",
                    "Dark, non-reflective material. Consistent with electronic casings or industrial plastics.".into(),
                )
            }
        } else if r > b + 40 && g > b + 20 {
            (
                CARDBOARD,
                CARDBOARD.material_type,
                "Cellulosic fiber signature detected (Brown/Beige). High probability of corrugated cardboard or kraft paper.".into(),
            )
        } else if g > r + 20 && g > b + 20 {
            (
                GLASS_BOTTLE,
                "Green Glass / Organic",
                "High green channel intensity. Consistent with glass bottles or organic biomass.".into(),
            )
        } else if b > r && b > g {
            (
                PLASTIC_BOTTLE,
                "PET Plastic (Blue Tint)",
                "Blue spectrum dominance detected. Common in commercial PET water containers.".into(),
            )
        } else {
            (
                PLASTIC_BOTTLE,
                PLASTIC_BOTTLE.material_type,
                format!(
                    "Mixed material composition detected (RGB: {r},{g},{b}). Classified as General Plastic for sorting."
                ),
            )
        };

    MaterialAnalysis {
        material_type: material_type.to_string(),
        material_category: template.material_category,
        confidence_score: template.confidence_score,
        hazardous_indicators: template
            .hazardous_indicators
            .iter()
            .map(|s| s.to_string())
            .collect(),
        description,
        recyclability_status: template.recyclability_status,
        sustainability_nudge: fallback_nudge(material_type),
        analysis_source: AnalysisSource::DeterministicFallback,
    }
}

pub fn fallback_nudge(material_type: &str) -> String {
    format!("Recycling this {material_type} reduces emissions compared to virgin production.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaterialCategory, RecyclabilityStatus};
    use image::{Rgb, RgbImage};

    fn solid(r: u8, g: u8, b: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(120, 80, Rgb([r, g, b])))
    }

    #[test]
    fn average_of_solid_image_is_its_colour() {
        assert_eq!(average_rgb(&solid(30, 30, 32)), [30, 30, 32]);
        assert_eq!(average_rgb(&solid(200, 150, 90)), [200, 150, 90]);
    }

    #[test]
    fn average_of_split_image() {
        let mut img = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        for x in 50..100 {
            for y in 0..100 {
                img.put_pixel(x, y, Rgb([200, 200, 200]));
            }
        }
        let [r, g, b] = average_rgb(&DynamicImage::ImageRgb8(img));
        assert!((95..=105).contains(&r), "got {r}");
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn dark_grey_is_ewaste() {
        let a = classify_by_color([30, 30, 32], None);
        assert_eq!(a.material_type, "E-Waste / ABS Plastic");
        assert_eq!(a.material_category, MaterialCategory::Electronic);
        assert_eq!(a.recyclability_status, RecyclabilityStatus::Hazardous);
        assert_eq!(a.hazardous_indicators, vec!["Heavy Metals"]);
        assert_eq!(a.analysis_source, AnalysisSource::DeterministicFallback);
    }

    #[test]
    fn mid_grey_is_metal() {
        let a = classify_by_color([150, 150, 155], None);
        assert_eq!(a.material_type, "Aluminum / Steel");
        assert_eq!(a.confidence_score, 98);
    }

    #[test]
    fn bright_white_uses_filename_hint() {
        let plastic = classify_by_color([240, 240, 240], Some("IMG_001.jpg"));
        assert_eq!(plastic.material_category, MaterialCategory::Plastic);
        assert_eq!(plastic.confidence_score, 95);

        let paper = classify_by_color([240, 240, 240], Some("Old_Paper_Stack.png"));
        assert_eq!(paper.material_category, MaterialCategory::Paper);
        assert_eq!(paper.confidence_score, 88);
        assert_eq!(paper.material_type, "HDPE Plastic / White Paper");
    }

    #[test]
    fn brown_is_cardboard() {
        let a = classify_by_color([180, 140, 90], None);
        assert_eq!(a.material_type, "Corrugated Cardboard");
        assert_eq!(a.material_category, MaterialCategory::Paper);
    }

    #[test]
    fn green_is_glass() {
        let a = classify_by_color([40, 140, 60], None);
        assert_eq!(a.material_type, "Green Glass / Organic");
        assert_eq!(a.material_category, MaterialCategory::Glass);
    }

    #[test]
    fn blue_is_pet() {
        let a = classify_by_color([40, 90, 200], None);
        assert_eq!(a.material_type, "PET Plastic (Blue Tint)");
    }

    #[test]
    fn otherwise_generic_plastic_with_rgb_in_description() {
        let a = classify_by_color([200, 60, 80], None);
        assert_eq!(a.material_type, "PET Plastic");
        assert!(a.description.contains("RGB: 200,60,80"));
    }

    #[test]
    fn nudge_names_the_material() {
        let a = classify_by_color([150, 150, 150], None);
        assert_eq!(
            a.sustainability_nudge,
            "Recycling this Aluminum / Steel reduces emissions compared to virgin production."
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let img = solid(123, 77, 201);
        let first = classify_by_color(average_rgb(&img), Some("a.png"));
        let second = classify_by_color(average_rgb(&img), Some("a.png"));
        assert_eq!(first, second);
    }
}
