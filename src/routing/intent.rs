//! Keyword intent classifier
//!
//! Messages are lower-cased and scanned for claim keywords first, then sales
//! keywords. Anything else is neutral.

use crate::types::IntentCategory;

/// Words that indicate a claim (accident, collision, theft)
pub const CLAIM_KEYWORDS: [&str; 4] = ["sinistro", "batida", "roubo", "acidente"];

/// Words that indicate a sales conversation
pub const SALES_KEYWORDS: [&str; 7] = [
    "comprar",
    "cotação",
    "cotacao",
    "renovar",
    "reativar",
    "simulação",
    "simulacao",
];

/// Classify a customer message
pub fn classify_intent(message: &str) -> IntentCategory {
    let lowered = message.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if mentions(&CLAIM_KEYWORDS) {
        IntentCategory::Sinistro
    } else if mentions(&SALES_KEYWORDS) {
        IntentCategory::Vendas
    } else {
        IntentCategory::Neutro
    }
}
