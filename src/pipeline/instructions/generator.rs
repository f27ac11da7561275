use std::sync::Arc;

use super::contract::enforce_hazard_contract;
use super::prompt::build_instruction_prompt;
use super::templates::template_instructions;
use crate::models::{
    ComplianceInfo, InstructionPayload, InstructionSource, MaterialAnalysis, SafetyAssessment,
};
use crate::pipeline::llm::{coerce_string_list, parse_json_object, LlmError, TextModel};

/// Disposal instructions for one analysed item. Never fails: any model
/// failure yields the hazard-conditioned template.
pub struct InstructionGenerator {
    model: Option<Arc<dyn TextModel>>,
}

impl InstructionGenerator {
    pub fn new(model: Option<Arc<dyn TextModel>>) -> Self {
        Self { model }
    }

    /// Template-only generator.
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn generate(
        &self,
        analysis: &MaterialAnalysis,
        safety: &SafetyAssessment,
        compliance: &ComplianceInfo,
        city: Option<&str>,
    ) -> InstructionPayload {
        let _span = tracing::info_span!(
            "generate_instructions",
            material = %analysis.material_type,
            hazardous = safety.is_hazardous,
        )
        .entered();
        let start = std::time::Instant::now();

        let Some(model) = &self.model else {
            tracing::debug!("No instruction model configured, using template");
            return template_instructions(safety.is_hazardous, &analysis.sustainability_nudge);
        };

        let prompt = build_instruction_prompt(analysis, safety, compliance, city);
        let result = model
            .generate(&prompt)
            .and_then(|raw| normalize_response(&raw, &analysis.sustainability_nudge));

        match result {
            Ok(mut payload) => {
                if safety.is_hazardous {
                    let repairs = enforce_hazard_contract(&mut payload);
                    if repairs > 0 {
                        tracing::warn!(
                            repairs,
                            model = model.model_name(),
                            "Model instructions broke the hazardous handling contract, repaired"
                        );
                    }
                }
                tracing::info!(
                    steps = payload.instructions.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Instructions generated"
                );
                payload
            }
            Err(e) => {
                tracing::warn!(error = %e, "Instruction model failed, using template");
                template_instructions(safety.is_hazardous, &analysis.sustainability_nudge)
            }
        }
    }
}

/// Parse the model's JSON answer. Scalars become one-element lists, a
/// missing nudge falls back to `upstream_nudge`. An answer without any
/// instruction step is malformed.
pub fn normalize_response(raw: &str, upstream_nudge: &str) -> Result<InstructionPayload, LlmError> {
    let map = parse_json_object(raw)?;

    let instructions = coerce_string_list(map.get("instructions"));
    if instructions.is_empty() {
        return Err(LlmError::MalformedResponse(
            "response has no instructions".into(),
        ));
    }

    let nudge = map
        .get("nudge")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(upstream_nudge)
        .to_string();

    Ok(InstructionPayload {
        instructions,
        do_not: coerce_string_list(map.get("do_not")),
        nudge,
        provenance: InstructionSource::Model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AnalysisSource, ComplianceSource, HazardCategory, MaterialCategory, RecyclabilityStatus,
        RiskLevel,
    };
    use crate::pipeline::instructions::{satisfies_hazard_contract, NO_HOUSEHOLD_BINS};
    use crate::pipeline::llm::MockTextModel;

    fn analysis() -> MaterialAnalysis {
        MaterialAnalysis {
            material_type: "Paint Can".into(),
            material_category: MaterialCategory::Chemical,
            confidence_score: 80,
            hazardous_indicators: vec![],
            description: "Half-used solvent paint can".into(),
            recyclability_status: RecyclabilityStatus::Hazardous,
            sustainability_nudge: "Upstream nudge".into(),
            analysis_source: AnalysisSource::PrimaryModel,
        }
    }

    fn safety(hazardous: bool) -> SafetyAssessment {
        SafetyAssessment {
            is_hazardous: hazardous,
            risk_level: if hazardous { RiskLevel::Medium } else { RiskLevel::Low },
            hazard_categories: if hazardous { vec![HazardCategory::Chemicals] } else { vec![] },
            safety_guidelines: vec![],
            signal_count: usize::from(hazardous),
            confidence: 80,
        }
    }

    fn compliance() -> ComplianceInfo {
        ComplianceInfo {
            material_type: "Paint Can".into(),
            guidelines: "Hazardous waste goes to a TSDF.".into(),
            sources: vec![],
            compliance_requirements: vec![],
            citations: vec![],
            provenance: ComplianceSource::ModelOnly,
        }
    }

    fn generate(model: MockTextModel, hazardous: bool) -> InstructionPayload {
        InstructionGenerator::new(Some(Arc::new(model))).generate(
            &analysis(),
            &safety(hazardous),
            &compliance(),
            Some("Mumbai"),
        )
    }

    #[test]
    fn model_answer_is_used() {
        let payload = generate(
            MockTextModel::new(
                r#"```json
                {"instructions": ["Rinse it.", "Drop at a recycler."], "do_not": ["Don't burn."], "nudge": "Nice."}
                ```"#,
            ),
            false,
        );
        assert_eq!(payload.provenance, InstructionSource::Model);
        assert_eq!(payload.instructions, vec!["Rinse it.", "Drop at a recycler."]);
        assert_eq!(payload.do_not, vec!["Don't burn."]);
        assert_eq!(payload.nudge, "Nice.");
    }

    #[test]
    fn scalar_fields_are_coerced_and_nudge_falls_back() {
        let payload = normalize_response(
            r#"{"instructions": "Take it to a kabadiwala.", "do_not": "Do not burn."}"#,
            "Upstream nudge",
        )
        .unwrap();
        assert_eq!(payload.instructions, vec!["Take it to a kabadiwala."]);
        assert_eq!(payload.do_not, vec!["Do not burn."]);
        assert_eq!(payload.nudge, "Upstream nudge");
    }

    #[test]
    fn missing_instructions_is_malformed() {
        assert!(matches!(
            normalize_response(r#"{"do_not": []}"#, ""),
            Err(LlmError::MalformedResponse(_))
        ));
    }

    #[test]
    fn hazardous_model_output_is_repaired() {
        let payload = generate(
            MockTextModel::new(
                r#"{"instructions": ["Close the lid.", "Put it in the general waste bin."], "do_not": ["Do not pour into drains."]}"#,
            ),
            true,
        );
        assert_eq!(payload.provenance, InstructionSource::Model);
        assert!(satisfies_hazard_contract(&payload));
        assert!(payload.do_not.contains(&NO_HOUSEHOLD_BINS.to_string()));
        assert!(payload.do_not.contains(&"Do not pour into drains.".to_string()));
        assert!(!payload.instructions.iter().any(|s| s.contains("general waste bin")));
    }

    #[test]
    fn hazardous_failure_uses_hazard_template() {
        let payload = generate(MockTextModel::failing(LlmError::Timeout(60)), true);
        assert_eq!(payload.provenance, InstructionSource::Template);
        assert!(satisfies_hazard_contract(&payload));
        assert_eq!(payload.nudge, "Upstream nudge");
    }

    #[test]
    fn non_json_answer_uses_template() {
        let payload = generate(MockTextModel::new("Just recycle it."), false);
        assert_eq!(payload.provenance, InstructionSource::Template);
        assert!(payload.do_not.contains(&"Never mix with wet waste.".to_string()));
    }

    #[test]
    fn hazard_invariant_holds_on_every_path() {
        let replies = [
            MockTextModel::new(r#"{"instructions": ["Bin it."], "do_not": []}"#),
            MockTextModel::new(
                r#"{"instructions": ["Wear gloves.", "Throw it in the trash with your household waste.", "Or hand it to an authorized collector."], "do_not": ["Never use household bins."]}"#,
            ),
            MockTextModel::new(
                r#"{"instructions": ["Dispose of it with household waste."], "do_not": []}"#,
            ),
            MockTextModel::new(r#"{"instructions": ["Put it in the garbage."], "do_not": []}"#),
            MockTextModel::new(r#"{"instructions": ["Put it in the bin."], "do_not": []}"#),
            MockTextModel::new(r#"{"instructions": ["Wear gloves.", "Use an authorized handler."], "do_not": ["Never use household bins."]}"#),
            MockTextModel::new("garbage"),
            MockTextModel::failing(LlmError::Api { status: 429, body: "quota".into() }),
        ];
        for model in replies {
            let payload = generate(model, true);
            assert!(!payload.do_not.is_empty());
            assert!(
                !payload
                    .instructions
                    .iter()
                    .any(|s| s.contains("trash") || s.contains("garbage") || s.contains("bin.")),
                "{payload:?}"
            );
            assert!(satisfies_hazard_contract(&payload), "{payload:?}");
        }
        let offline = InstructionGenerator::offline().generate(
            &analysis(),
            &safety(true),
            &compliance(),
            None,
        );
        assert!(satisfies_hazard_contract(&offline));
    }

    #[test]
    fn prompt_reaches_model() {
        let model = Arc::new(MockTextModel::new(r#"{"instructions": ["Recycle."]}"#));
        InstructionGenerator::new(Some(model.clone())).generate(
            &analysis(),
            &safety(false),
            &compliance(),
            Some("Mumbai"),
        );
        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains("city: Mumbai"));
        assert!(prompt.contains("guidelines: Hazardous waste goes to a TSDF."));
    }
}
