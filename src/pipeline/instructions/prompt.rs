use crate::models::{ComplianceInfo, MaterialAnalysis, SafetyAssessment};

const INSTRUCTION_PREAMBLE: &str = "\
You are Circular AI, a waste-to-resource assistant.
Return STRICT JSON only with keys: instructions (list of strings), do_not (list of strings), \
nudge (string).
Constraints:
- Use ONLY the provided guidelines if available.
- If hazardous is true, never suggest general bins or household disposal.
- If hazardous, include PPE and authorized facility handling steps.
- Keep instructions short and actionable.
";

/// Inputs are inserted verbatim in one pass, so braces in model text stay literal.
pub fn build_instruction_prompt(
    analysis: &MaterialAnalysis,
    safety: &SafetyAssessment,
    compliance: &ComplianceInfo,
    city: Option<&str>,
) -> String {
    let city = city.map(str::trim).filter(|c| !c.is_empty()).unwrap_or("unknown");
    format!(
        "{INSTRUCTION_PREAMBLE}\nInputs:\n\
         material_type: {}\n\
         description: {}\n\
         city: {city}\n\
         hazardous: {}\n\
         risk_level: {}\n\
         guidelines: {}\n",
        analysis.material_type,
        analysis.description,
        safety.is_hazardous,
        safety.risk_level,
        compliance.guidelines,
    )
}
