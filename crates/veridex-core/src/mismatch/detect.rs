//! Mismatch detection: facts vs template, out come typed discrepancies.
//!
//! Four independent checks, concatenated in a fixed order. A permission
//! or API absent from both the facts and the template is not notable and
//! produces nothing.

use std::collections::BTreeSet;

use crate::behavior::model::BehaviorTemplate;
use crate::facts::model::ArtifactFacts;
use crate::mismatch::model::{Discrepancy, DiscrepancyKind};
use crate::mismatch::{DANGEROUS_APIS, DANGEROUS_PERMISSIONS};

pub fn detect(facts: &ArtifactFacts, template: &BehaviorTemplate) -> Vec<Discrepancy> {
    let mut discrepancies = Vec::new();
    discrepancies.extend(unexpected_permissions(facts, template));
    discrepancies.extend(missing_core_permissions(facts, template));
    discrepancies.extend(unexpected_apis(facts, template));
    discrepancies.extend(obfuscation_signals(facts));
    discrepancies
}

/// Dangerous permissions requested outside the expected set. +2 each.
fn unexpected_permissions(
    facts: &ArtifactFacts,
    template: &BehaviorTemplate,
) -> Vec<Discrepancy> {
    facts
        .permissions
        .iter()
        .filter(|permission| {
            !template.expected_permissions.contains(*permission)
                && DANGEROUS_PERMISSIONS.contains(&permission.as_str())
        })
        .map(|permission| Discrepancy {
            kind: DiscrepancyKind::UnexpectedPermission,
            description: format!(
                "{permission} is not an expected permission for a {} app",
                template.category
            ),
            severity: 2,
        })
        .collect()
}

/// Core permissions the artifact fails to request. -1 each.
fn missing_core_permissions(
    facts: &ArtifactFacts,
    template: &BehaviorTemplate,
) -> Vec<Discrepancy> {
    template
        .core_permissions
        .iter()
        .filter(|permission| !facts.permissions.contains(*permission))
        .map(|permission| Discrepancy {
            kind: DiscrepancyKind::MissingCorePermission,
            description: format!("Missing core permission: {permission}"),
            severity: -1,
        })
        .collect()
}

/// Dangerous APIs observed that match nothing in the expected set. +1
/// each. Both comparisons are case-insensitive substring matches.
fn unexpected_apis(facts: &ArtifactFacts, template: &BehaviorTemplate) -> Vec<Discrepancy> {
    facts
        .api_calls
        .iter()
        .filter(|api| {
            let api_lower = api.to_lowercase();
            let expected = template
                .expected_apis
                .iter()
                .any(|expected| api_lower.contains(&expected.to_lowercase()));
            let dangerous = DANGEROUS_APIS
                .iter()
                .any(|dangerous| api_lower.contains(&dangerous.to_lowercase()));
            !expected && dangerous
        })
        .map(|api| Discrepancy {
            kind: DiscrepancyKind::UnexpectedApi,
            description: format!("API outside declared function: {api}"),
            severity: 1,
        })
        .collect()
}

/// Every recorded obfuscation signal. +2 each.
fn obfuscation_signals(facts: &ArtifactFacts) -> Vec<Discrepancy> {
    facts
        .obfuscation_signals
        .iter()
        .map(|signal| Discrepancy {
            kind: DiscrepancyKind::ObfuscationSignal,
            description: format!("Obfuscation indicator: {signal}"),
            severity: 2,
        })
        .collect()
}

/// Permissions matching the dangerous table by case-insensitive
/// substring. This looser matching serves batch reporting, where declared
/// names may carry the `android.permission.` prefix.
pub fn flag_dangerous_permissions(permissions: &BTreeSet<String>) -> Vec<String> {
    permissions
        .iter()
        .filter(|permission| {
            let lower = permission.to_lowercase();
            DANGEROUS_PERMISSIONS
                .iter()
                .any(|dangerous| lower.contains(&dangerous.to_lowercase()))
        })
        .cloned()
        .collect()
}
