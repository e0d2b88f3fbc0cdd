//! Static category knowledge: keyword rules and behavior templates.
//!
//! Both tables are immutable process-lifetime configuration. Keyword rules
//! are evaluated in table order with first-match-wins semantics, so the
//! order below is part of the observable contract.

use std::collections::BTreeSet;

use crate::behavior::model::{BehaviorTemplate, Category};
use crate::package::PackageMetadata;

/// Keyword rules, evaluated in order against lowercased name, package id
/// and description. The first category with any hit wins.
const KEYWORD_RULES: &[(Category, &[&str])] = &[
    (
        Category::Camera,
        &["camera", "photo", "picture", "selfie", "snap", "filter"],
    ),
    (
        Category::Social,
        &["chat", "social", "friend", "message", "facebook", "twitter", "instagram"],
    ),
    (
        Category::Game,
        &["game", "play", "puzzle", "racing", "adventure", "strategy"],
    ),
    (Category::Music, &["music", "audio", "player", "song", "sound"]),
    (Category::Video, &["video", "movie", "player", "youtube", "stream"]),
    (
        Category::Productivity,
        &["office", "document", "pdf", "editor", "note"],
    ),
    (
        Category::Communication,
        &["call", "sms", "email", "messenger", "whatsapp"],
    ),
    (
        Category::Finance,
        &["bank", "money", "payment", "wallet", "finance"],
    ),
    (
        Category::Health,
        &["health", "fitness", "medical", "doctor", "exercise"],
    ),
    (
        Category::Shopping,
        &["shop", "buy", "store", "cart", "purchase", "amazon"],
    ),
    (
        Category::Utility,
        &["utility", "tool", "manager", "cleaner", "battery"],
    ),
];

struct TemplateRow {
    category: Category,
    permissions: &'static [&'static str],
    apis: &'static [&'static str],
    core: &'static [&'static str],
}

/// Categories without a row fall back to the OTHER row.
const TEMPLATES: &[TemplateRow] = &[
    TemplateRow {
        category: Category::Camera,
        permissions: &["CAMERA", "WRITE_EXTERNAL_STORAGE", "READ_MEDIA_IMAGES"],
        apis: &["android.hardware.Camera", "MediaStore", "BitmapFactory"],
        core: &["CAMERA"],
    },
    TemplateRow {
        category: Category::Social,
        permissions: &["INTERNET", "READ_CONTACTS", "WRITE_EXTERNAL_STORAGE", "CAMERA"],
        apis: &["HttpURLConnection", "ContactsContract", "MediaStore"],
        core: &["INTERNET"],
    },
    TemplateRow {
        category: Category::Game,
        permissions: &["INTERNET", "WRITE_EXTERNAL_STORAGE", "READ_MEDIA_AUDIO"],
        apis: &["MediaPlayer", "SoundPool", "HttpURLConnection"],
        core: &[],
    },
    TemplateRow {
        category: Category::Communication,
        permissions: &["SEND_SMS", "CALL_PHONE", "READ_CONTACTS", "INTERNET"],
        apis: &["SmsManager", "TelecomManager", "ContactsContract"],
        core: &["SEND_SMS", "CALL_PHONE"],
    },
    TemplateRow {
        category: Category::Other,
        permissions: &["INTERNET"],
        apis: &[],
        core: &[],
    },
];

/// Applies the keyword rules to identity metadata.
///
/// Pure function of the lowercased inputs; identical metadata always
/// resolves to the identical category.
pub fn match_category(identity: &PackageMetadata) -> Option<Category> {
    let name = identity.name.to_lowercase();
    let package = identity.package.to_lowercase();
    let description = identity
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| {
            keywords.iter().any(|keyword| {
                name.contains(keyword) || package.contains(keyword) || description.contains(keyword)
            })
        })
        .map(|(category, _)| *category)
}

/// Builds the static template for a category.
///
/// Core permissions are folded into the expected set so the
/// core-subset-of-expected invariant holds by construction.
pub fn template_for(category: Category) -> BehaviorTemplate {
    let row = TEMPLATES
        .iter()
        .find(|row| row.category == category)
        .unwrap_or_else(|| {
            TEMPLATES
                .iter()
                .find(|row| row.category == Category::Other)
                .expect("OTHER template row must exist")
        });

    let mut expected_permissions: BTreeSet<String> =
        row.permissions.iter().map(|p| p.to_string()).collect();
    let core_permissions: BTreeSet<String> = row.core.iter().map(|p| p.to_string()).collect();
    expected_permissions.extend(core_permissions.iter().cloned());

    BehaviorTemplate {
        category,
        expected_permissions,
        expected_apis: row.apis.iter().map(|a| a.to_string()).collect(),
        core_permissions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str, package: &str, description: Option<&str>) -> PackageMetadata {
        PackageMetadata {
            name: name.into(),
            package: package.into(),
            description: description.map(str::to_string),
            version: None,
        }
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let id = identity("SELFIE Studio", "com.example.studio", None);
        assert_eq!(match_category(&id), Some(Category::Camera));
    }

    #[test]
    fn keyword_match_inspects_package_and_description() {
        let by_package = identity("Blob", "com.example.racing.pro", None);
        assert_eq!(match_category(&by_package), Some(Category::Game));

        let by_description = identity("Blob", "com.example.blob", Some("a mobile banking client"));
        assert_eq!(match_category(&by_description), Some(Category::Finance));
    }

    #[test]
    fn first_matching_rule_wins_in_table_order() {
        // "photo" hits the CAMERA rule and "editor" the PRODUCTIVITY
        // rule; CAMERA comes first in the table.
        let id = identity("Photo Editor", "com.example.photoeditor", None);
        assert_eq!(match_category(&id), Some(Category::Camera));
    }

    #[test]
    fn player_keyword_resolves_to_game_via_play() {
        // "player" contains "play", so the earlier GAME rule wins over
        // the MUSIC and VIDEO rules that list "player" outright.
        let id = identity("Mega Player", "com.example.megaplayer", None);
        assert_eq!(match_category(&id), Some(Category::Game));
    }

    #[test]
    fn unmatched_identity_yields_none() {
        let id = identity("Zzzz", "com.example.zzzz", None);
        assert_eq!(match_category(&id), None);
    }

    #[test]
    fn category_matching_is_idempotent() {
        let id = identity("Fitness Coach", "com.example.coach", Some("daily exercise plans"));
        assert_eq!(match_category(&id), match_category(&id));
    }

    #[test]
    fn templates_keep_core_within_expected() {
        for category in Category::ALL {
            let template = template_for(*category);
            assert!(
                template
                    .core_permissions
                    .is_subset(&template.expected_permissions),
                "core not within expected for {category}"
            );
        }
    }

    #[test]
    fn uncovered_category_falls_back_to_other_profile() {
        let template = template_for(Category::Weather);
        assert_eq!(template.category, Category::Weather);
        assert!(template.expected_permissions.contains("INTERNET"));
        assert!(template.core_permissions.is_empty());
    }

    #[test]
    fn communication_template_has_sms_core() {
        let template = template_for(Category::Communication);
        assert!(template.core_permissions.contains("SEND_SMS"));
        assert!(template.core_permissions.contains("CALL_PHONE"));
        assert!(template.expected_permissions.contains("SEND_SMS"));
    }
}
