//! Flow selection for an incoming customer message

use crate::routing::intent::classify_intent;
use crate::types::{CustomerProfile, Flow, IntentCategory, RouteDecision};
use tracing::debug;

/// Pick the flow for a classified message.
///
/// Claims always go to a claim flow; whether it is the full claim process or
/// identity intake depends on the customer holding an active policy. Known
/// customers without an active policy are offered reactivation before any
/// sales or triage flow.
pub fn select_flow(intent: IntentCategory, customer: Option<&CustomerProfile>) -> Flow {
    let has_active_policy = customer.map(|c| c.has_active_policy);

    match (intent, has_active_policy) {
        (IntentCategory::Sinistro, Some(true)) => Flow::Sinistro,
        (IntentCategory::Sinistro, _) => Flow::SinistroIntake,
        (_, Some(false)) => Flow::Reativacao,
        (IntentCategory::Vendas, _) => Flow::Vendas,
        _ => Flow::Triagem,
    }
}

/// Route a message from a (possibly unknown) customer
pub fn decide_route(customer: Option<CustomerProfile>, message: &str) -> RouteDecision {
    let intent = classify_intent(message);
    let flow = select_flow(intent, customer.as_ref());

    debug!(
        "Routed message with intent {} to {:?} (known customer: {})",
        intent,
        flow,
        customer.is_some()
    );

    RouteDecision::for_flow(flow, customer)
}
