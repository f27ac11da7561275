/// Context placeholder used when no retrieval backend is available.
pub const CONTEXT_UNAVAILABLE: &str = "Context unavailable (LLM Mode)";

/// Context placeholder when retrieval ran but matched nothing.
pub const NO_MATCHING_PASSAGES: &str = "No matching CPCB passages were found.";

/// Source label for answers produced without retrieved passages.
pub const MODEL_KNOWLEDGE_SOURCE: &str = "AI Knowledge Base";

const LEGAL_PROMPT_TEMPLATE: &str = "\
You are an expert in Indian environmental law, specifically the CPCB 2016 Waste Management Rules.
Use the following pieces of context from the CPCB guidelines to answer the user's question about waste disposal compliance.

Context: {context}

Question: {question}

Instructions:
1. Provide specific citations from the CPCB rules if available
2. Include relevant section/chapter numbers
3. Explain the compliance requirements clearly
4. Mention penalties or consequences if applicable
5. If the context doesn't contain the answer, say \"Information not available in current CPCB database\"

Answer:";

pub fn build_legal_prompt(context: &str, question: &str) -> String {
    LEGAL_PROMPT_TEMPLATE
        .replace("{context}", context)
        .replace("{question}", question)
}

pub fn disposal_question(material_type: &str) -> String {
    format!(
        "What are the CPCB guidelines for disposing of {material_type} waste according to the 2016 Waste Management Rules?"
    )
}

pub fn hazard_protocol_question(material_description: &str) -> String {
    format!(
        "What are the emergency handling and disposal protocols for {material_description} under CPCB 2016 hazardous waste rules?"
    )
}

pub fn epr_question(product_category: &str) -> String {
    format!(
        "What are the Extended Producer Responsibility (EPR) obligations for {product_category} under CPCB 2016 rules?"
    )
}
