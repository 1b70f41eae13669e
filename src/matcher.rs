use log::info;

use crate::registry::{self, Gate, SchemaDefinition};

/// First named schema whose gate holds, else `custom_import`.
pub fn match_schema<S: AsRef<str>>(headers: &[S]) -> &'static SchemaDefinition {
    let lowered = lowercase_headers(headers);
    let matched = registry::all_schemas()
        .iter()
        .copied()
        .find(|schema| schema.gate.is_some_and(|gate| gate_holds(&gate, &lowered)))
        .unwrap_or_else(registry::custom_import);
    info!("Matched upload headers to schema '{}'", matched.name);
    matched
}

pub fn gate_holds(gate: &Gate, lowered_headers: &[String]) -> bool {
    match gate {
        Gate::Keyword(keywords) => lowered_headers
            .iter()
            .any(|header| keywords.iter().any(|keyword| header.contains(keyword))),
        Gate::All(gates) => gates.iter().all(|g| gate_holds(g, lowered_headers)),
        Gate::Any(gates) => gates.iter().any(|g| gate_holds(g, lowered_headers)),
    }
}

pub(crate) fn lowercase_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    headers.iter().map(|h| h.as_ref().to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowered(headers: &[&str]) -> Vec<String> {
        lowercase_headers(headers)
    }

    #[test]
    fn keyword_gate_uses_substring_containment() {
        let gate = Gate::Keyword(&["vendor", "payee"]);
        assert!(gate_holds(&gate, &lowered(&["Vendor Name"])));
        assert!(!gate_holds(&gate, &lowered(&["Source"])));
    }

    #[test]
    fn nested_gates_combine() {
        let gate = Gate::All(&[
            Gate::Keyword(&["guest"]),
            Gate::Any(&[Gate::Keyword(&["start"]), Gate::Keyword(&["end"])]),
        ]);
        assert!(gate_holds(&gate, &lowered(&["Guest", "Trip End"])));
        assert!(!gate_holds(&gate, &lowered(&["Guest", "Total"])));
    }
}
